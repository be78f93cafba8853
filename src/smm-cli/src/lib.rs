//! SMM console command-line interface.
//!
//! - `cli/` - Argument parsing and dispatch
//! - `context` - Configuration, session and client resolved at startup
//! - `*_cmd.rs`, `login.rs` - Individual command implementations

pub mod bot_cmd;
pub mod channel_cmd;
pub mod cli;
pub mod context;
pub mod login;
pub mod open_cmd;
pub mod org_cmd;
pub mod styled_output;
