//! Bot commands.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};

use crate::cli::OutputArgs;
use crate::context::AppContext;
use crate::login::require_token;
use crate::org_cmd::print_json;
use crate::styled_output::{print_dim, print_success};

#[derive(Debug, Parser)]
pub struct BotCli {
    #[command(subcommand)]
    pub subcommand: BotSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum BotSubcommand {
    /// List the bots of an organization
    #[command(visible_alias = "ls")]
    List(BotListArgs),

    /// Register a bot from its token
    Add(BotAddArgs),
}

#[derive(Debug, Args)]
pub struct BotListArgs {
    /// Organization id
    #[arg(long)]
    pub org: i64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct BotAddArgs {
    /// Organization id
    #[arg(long)]
    pub org: i64,

    /// Bot token issued by the messaging platform
    pub token: String,
}

impl BotCli {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        require_token(ctx)?;
        match self.subcommand {
            BotSubcommand::List(args) => {
                let Some(bots) = ctx.client.get_organization_bots(args.org).await? else {
                    bail!("Bots of organization {} are not available", args.org);
                };
                if args.output.json {
                    return print_json(&bots);
                }
                if bots.is_empty() {
                    print_dim("No bots registered.");
                }
                for bot in &bots {
                    println!("{}", bot.id);
                }
                Ok(())
            }
            BotSubcommand::Add(args) => {
                let id = ctx
                    .client
                    .create_organization_bot(args.org, &args.token)
                    .await?;
                print_success(&format!("Bot {id} added to organization {}.", args.org));
                Ok(())
            }
        }
    }
}
