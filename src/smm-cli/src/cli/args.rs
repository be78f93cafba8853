//! CLI argument structures and parsing.

use clap::{Args, Parser, Subcommand};

use crate::bot_cmd::BotCli;
use crate::channel_cmd::ChannelCli;
use crate::login::{LoginCommand, RegisterCommand};
use crate::open_cmd::OpenCommand;
use crate::org_cmd::OrgCli;

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Color output mode for CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Automatically detect if output is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// SMM console: manage organizations, bots and channels from the terminal.
#[derive(Debug, Parser)]
#[command(name = "smm", author, version, about, long_about = None)]
pub struct Cli {
    /// Backend API URL; a path such as `/api` is joined to the configured origin
    #[arg(long = "backend-url", global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Log level
    #[arg(long = "log-level", global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Enable trace-level logging
    #[arg(long = "trace", global = true)]
    pub trace: bool,

    /// Control color output: auto (default), always, or never
    #[arg(long = "color", global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level: flags first, then `SMM_LOG_LEVEL`, then `--log-level`.
    pub fn effective_log_level(&self, env_level: Option<&str>) -> LogLevel {
        if self.trace {
            LogLevel::Trace
        } else if self.verbose {
            LogLevel::Debug
        } else {
            env_level
                .and_then(LogLevel::from_str_loose)
                .unwrap_or(self.log_level)
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register(RegisterCommand),

    /// Sign in and store the session token
    Login(LoginCommand),

    /// Remove the stored session token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check that the stored session is still valid
    Check,

    /// Manage organizations
    #[command(visible_alias = "orgs")]
    Org(OrgCli),

    /// Manage organization bots
    #[command(visible_alias = "bots")]
    Bot(BotCli),

    /// Manage organization channels
    #[command(visible_alias = "channels")]
    Channel(ChannelCli),

    /// Resolve a console path and show the page it opens
    Open(OpenCommand),
}

/// Output format shared by listing commands.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
