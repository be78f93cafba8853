//! Channel commands.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use smm_client::Channel;

use crate::cli::OutputArgs;
use crate::context::AppContext;
use crate::login::require_token;
use crate::org_cmd::print_json;
use crate::styled_output::{print_dim, print_success, print_warning};

#[derive(Debug, Parser)]
pub struct ChannelCli {
    #[command(subcommand)]
    pub subcommand: ChannelSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ChannelSubcommand {
    /// List the channels of an organization
    #[command(visible_alias = "ls")]
    List(ChannelListArgs),

    /// Link a channel through one of the organization's bots
    Add(ChannelAddArgs),

    /// Unlink a channel
    #[command(visible_alias = "rm")]
    Remove(ChannelRemoveArgs),
}

#[derive(Debug, Args)]
pub struct ChannelListArgs {
    /// Organization id
    #[arg(long)]
    pub org: i64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ChannelAddArgs {
    /// Organization id
    #[arg(long)]
    pub org: i64,

    /// Bot that administers the channel
    #[arg(long)]
    pub bot: i64,

    /// Channel id (may be negative)
    #[arg(allow_negative_numbers = true)]
    pub channel_id: i64,
}

#[derive(Debug, Args)]
pub struct ChannelRemoveArgs {
    /// Organization id
    #[arg(long)]
    pub org: i64,

    /// Channel id (may be negative)
    #[arg(allow_negative_numbers = true)]
    pub channel_id: i64,
}

impl ChannelCli {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        require_token(ctx)?;
        match self.subcommand {
            ChannelSubcommand::List(args) => {
                let Some(channels) = ctx.client.get_channels(args.org).await? else {
                    bail!("Channels of organization {} are not available", args.org);
                };
                if args.output.json {
                    return print_json(&channels);
                }
                print_channels(&channels);
                Ok(())
            }
            ChannelSubcommand::Add(args) => {
                let body = ctx
                    .client
                    .add_channel(args.org, args.channel_id, args.bot)
                    .await?;
                match body.get("reason").and_then(|r| r.as_str()) {
                    Some(reason) if !reason.is_empty() => {
                        print_warning(&format!("Backend answered: {reason}"));
                    }
                    _ => print_success(&format!(
                        "Channel {} linked through bot {}.",
                        args.channel_id, args.bot
                    )),
                }
                Ok(())
            }
            ChannelSubcommand::Remove(args) => {
                match ctx.client.delete_channel(args.org, args.channel_id).await? {
                    Some(remaining) => {
                        print_success(&format!("Channel {} removed.", args.channel_id));
                        print_channels(&remaining);
                        Ok(())
                    }
                    None => bail!("Channel {} could not be removed", args.channel_id),
                }
            }
        }
    }
}

fn print_channels(channels: &[Channel]) {
    if channels.is_empty() {
        print_dim("No channels linked.");
        return;
    }
    for channel in channels {
        println!("{}", format_channel_line(channel));
    }
}

fn format_channel_line(channel: &Channel) -> String {
    match channel.bot_id {
        Some(bot) => format!("{}  (bot {bot})", channel.id),
        None => channel.id.to_string(),
    }
}
