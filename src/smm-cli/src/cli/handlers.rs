//! Command dispatch.

use anyhow::Result;

use super::args::{Cli, Commands};
use crate::context::AppContext;
use crate::login::{run_check, run_login, run_logout, run_register, run_whoami};

/// Run the parsed command.
pub async fn dispatch_command(cli: Cli) -> Result<()> {
    let ctx = AppContext::load(cli.backend_url.as_deref())?;

    match cli.command {
        Commands::Register(cmd) => run_register(&ctx, cmd).await,
        Commands::Login(cmd) => run_login(&ctx, cmd).await,
        Commands::Logout => run_logout(&ctx),
        Commands::Whoami => run_whoami(&ctx).await,
        Commands::Check => run_check(&ctx).await,
        Commands::Org(org_cli) => org_cli.run(&ctx).await,
        Commands::Bot(bot_cli) => bot_cli.run(&ctx).await,
        Commands::Channel(channel_cli) => channel_cli.run(&ctx).await,
        Commands::Open(open_cmd) => open_cmd.run(&ctx).await,
    }
}
