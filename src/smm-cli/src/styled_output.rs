//! Styled CLI output.
//!
//! Status lines go to stderr with a short tag; data goes to stdout
//! unstyled so it can be piped. Colors are dropped when `NO_COLOR` is set
//! or the stream is not a terminal.

use std::io::IsTerminal;

/// Check if colors should be disabled based on NO_COLOR env var.
fn colors_disabled() -> bool {
    std::env::var("NO_COLOR")
        .map(|v| !v.is_empty() && v != "0" && v.to_lowercase() != "false")
        .unwrap_or(false)
}

fn use_colors(stderr: bool) -> bool {
    if colors_disabled() {
        return false;
    }
    if stderr {
        std::io::stderr().is_terminal()
    } else {
        std::io::stdout().is_terminal()
    }
}

mod palette {
    pub const SUCCESS: &str = "\x1b[38;2;0;245;212m";
    pub const ERROR: &str = "\x1b[38;2;255;107;107m";
    pub const WARNING: &str = "\x1b[38;2;255;200;87m";
    pub const INFO: &str = "\x1b[38;2;72;202;228m";
    pub const DIM: &str = "\x1b[38;2;130;154;177m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Message type for styled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl MessageType {
    fn icon(self) -> &'static str {
        match self {
            MessageType::Success => "[OK]",
            MessageType::Error => "[ERROR]",
            MessageType::Warning => "[WARN]",
            MessageType::Info => "[INFO]",
            MessageType::Dim => "-",
        }
    }

    fn color(self) -> &'static str {
        match self {
            MessageType::Success => palette::SUCCESS,
            MessageType::Error => palette::ERROR,
            MessageType::Warning => palette::WARNING,
            MessageType::Info => palette::INFO,
            MessageType::Dim => palette::DIM,
        }
    }
}

fn format_with(msg_type: MessageType, message: &str, colored: bool) -> String {
    if colored {
        format!(
            "{}{} {}{}",
            msg_type.color(),
            msg_type.icon(),
            message,
            palette::RESET
        )
    } else {
        format!("{} {}", msg_type.icon(), message)
    }
}

/// Format a message for stderr.
pub fn format_styled(msg_type: MessageType, message: &str) -> String {
    format_with(msg_type, message, use_colors(true))
}

fn print_styled(msg_type: MessageType, message: &str) {
    eprintln!("{}", format_styled(msg_type, message));
}

pub fn print_success(message: &str) {
    print_styled(MessageType::Success, message);
}

pub fn print_error(message: &str) {
    print_styled(MessageType::Error, message);
}

pub fn print_warning(message: &str) {
    print_styled(MessageType::Warning, message);
}

pub fn print_info(message: &str) {
    print_styled(MessageType::Info, message);
}

pub fn print_dim(message: &str) {
    print_styled(MessageType::Dim, message);
}

/// Bold text for stdout headings.
pub fn bold(text: &str) -> String {
    if use_colors(false) {
        format!("{}{}{}", palette::BOLD, text, palette::RESET)
    } else {
        text.to_string()
    }
}
