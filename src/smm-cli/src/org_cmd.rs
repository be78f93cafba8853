//! Organization commands.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use smm_client::{Organization, OrganizationUser};

use crate::cli::OutputArgs;
use crate::context::AppContext;
use crate::login::require_token;
use crate::styled_output::{bold, print_dim, print_success};

#[derive(Debug, Parser)]
pub struct OrgCli {
    #[command(subcommand)]
    pub subcommand: OrgSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum OrgSubcommand {
    /// List your organizations
    #[command(visible_alias = "ls")]
    List(OutputArgs),

    /// Create an organization
    Create(OrgCreateArgs),

    /// Show organization details
    Show(OrgShowArgs),

    /// List organization members and their rights
    Users(OrgShowArgs),
}

#[derive(Debug, Args)]
pub struct OrgCreateArgs {
    pub name: String,

    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
}

#[derive(Debug, Args)]
pub struct OrgShowArgs {
    /// Organization id
    pub id: i64,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl OrgCli {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        require_token(ctx)?;
        match self.subcommand {
            OrgSubcommand::List(output) => {
                let orgs = ctx.client.get_organizations().await?;
                if output.json {
                    return print_json(&orgs);
                }
                if orgs.is_empty() {
                    print_dim("No organizations yet. Create one with `smm org create <NAME>`.");
                    return Ok(());
                }
                for org in &orgs {
                    println!("{}", format_org_line(org));
                }
                Ok(())
            }
            OrgSubcommand::Create(args) => {
                let org = ctx
                    .client
                    .create_organization(&args.name, &args.description)
                    .await?;
                print_success(&format!("Created organization {} (id {}).", org.name, org.id));
                Ok(())
            }
            OrgSubcommand::Show(args) => {
                let Some(info) = ctx.client.get_organization_info(args.id).await? else {
                    bail!("Organization {} not found", args.id);
                };
                if args.output.json {
                    return print_json(&info);
                }
                println!("{}", bold(info.name.as_deref().unwrap_or("(unnamed)")));
                if let Some(id) = info.id {
                    println!("id: {id}");
                }
                if let Some(description) = info.description.as_deref().filter(|d| !d.is_empty()) {
                    println!("{description}");
                }
                for (key, value) in &info.extra {
                    println!("{key}: {value}");
                }
                Ok(())
            }
            OrgSubcommand::Users(args) => {
                let Some(users) = ctx.client.get_organization_users(args.id).await? else {
                    bail!("Members of organization {} are not available", args.id);
                };
                if args.output.json {
                    return print_json(&users);
                }
                for user in &users {
                    println!("{}", format_member_line(user));
                }
                Ok(())
            }
        }
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_org_line(org: &Organization) -> String {
    match org.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => format!("{:>6}  {}  {}", org.id, org.name, description),
        None => format!("{:>6}  {}", org.id, org.name),
    }
}

/// Rights grantable to others are marked with `*`.
fn format_member_line(member: &OrganizationUser) -> String {
    let rights: Vec<String> = member
        .rights
        .iter()
        .map(|r| {
            if r.can_grant {
                format!("{}*", r.name)
            } else {
                r.name.clone()
            }
        })
        .collect();
    format!(
        "{:>6}  {}  [{}]",
        member.user.id,
        member.user.name,
        rights.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use smm_client::{UserPublicProfile, UserRight};

    #[test]
    fn test_format_org_line() {
        let org = Organization {
            id: 7,
            name: "Acme".to_string(),
            description: Some(String::new()),
        };
        assert_eq!(format_org_line(&org), "     7  Acme");
    }

    #[test]
    fn test_format_member_line_marks_grantable() {
        let member = OrganizationUser {
            user: UserPublicProfile {
                id: 1,
                name: "Alice".to_string(),
            },
            rights: vec![
                UserRight {
                    name: "owner".to_string(),
                    can_grant: true,
                },
                UserRight {
                    name: "posts".to_string(),
                    can_grant: false,
                },
            ],
        };
        assert_eq!(format_member_line(&member), "     1  Alice  [owner*, posts]");
    }
}
