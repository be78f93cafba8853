//! `smm` entry point.

use clap::Parser;

use smm_cli::cli::{Cli, ColorMode, dispatch_command};
use smm_cli::styled_output::print_error;

/// Environment variable selecting the log level.
const LOG_LEVEL_ENV: &str = "SMM_LOG_LEVEL";

fn init_logging(cli: &Cli) {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let level = cli.effective_log_level(env_level.as_deref()).as_filter_str();
    let explicit = cli.trace || cli.verbose || env_level.is_some();

    // RUST_LOG directives apply unless a level was asked for explicitly.
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !explicit && !directives.is_empty() => directives,
        _ => level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter.as_str())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // SAFETY: Environment variable mutations happen early before threads spawn
    match cli.color {
        ColorMode::Never => unsafe { std::env::set_var("NO_COLOR", "1") },
        ColorMode::Always => unsafe { std::env::remove_var("NO_COLOR") },
        ColorMode::Auto => {}
    }

    init_logging(&cli);

    if let Err(e) = dispatch_command(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
