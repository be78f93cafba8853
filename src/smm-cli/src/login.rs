//! Account and session commands.

use std::io::{BufRead, IsTerminal};

use anyhow::{Context, Result, bail};
use clap::Args;
use smm_login::{ExposeSecret, safe_format_key};

use crate::context::AppContext;
use crate::styled_output::{print_dim, print_info, print_success, print_warning};

/// Environment variable consulted when no password flag is given.
pub const PASSWORD_ENV: &str = "SMM_PASSWORD";

#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Account login
    pub login: String,

    /// Password (prefer --password-stdin or SMM_PASSWORD)
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true, conflicts_with = "password_stdin")]
    pub password: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long = "password-stdin")]
    pub password_stdin: bool,
}

impl CredentialArgs {
    fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        if !self.password_stdin && std::io::stdin().is_terminal() {
            bail!("No password given. Use --password-stdin or set {PASSWORD_ENV}.");
        }
        read_password(std::io::stdin().lock())
    }
}

fn read_password(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    Ok(password)
}

#[derive(Debug, Args)]
pub struct LoginCommand {
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Debug, Args)]
pub struct RegisterCommand {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Display name
    #[arg(long)]
    pub name: String,
}

pub async fn run_login(ctx: &AppContext, cmd: LoginCommand) -> Result<()> {
    let password = cmd.credentials.resolve_password()?;
    ctx.client
        .login(&cmd.credentials.login, &password)
        .await
        .context("Login failed")?;
    print_success(&format!("Logged in as {}.", cmd.credentials.login));
    print_token_location(ctx);
    Ok(())
}

pub async fn run_register(ctx: &AppContext, cmd: RegisterCommand) -> Result<()> {
    let password = cmd.credentials.resolve_password()?;
    ctx.client
        .register(&cmd.credentials.login, &password, &cmd.name)
        .await
        .context("Registration failed")?;
    print_success(&format!(
        "Account {} created and signed in.",
        cmd.credentials.login
    ));
    print_token_location(ctx);
    Ok(())
}

fn print_token_location(ctx: &AppContext) {
    if let Some(token) = ctx.session.token() {
        print_dim(&format!(
            "Token {} stored in {}",
            safe_format_key(token.expose_secret()),
            ctx.dirs.home.display()
        ));
    }
}

pub fn run_logout(ctx: &AppContext) -> Result<()> {
    if ctx.client.logout()? {
        print_success("Logged out.");
    } else {
        print_info("Not logged in.");
    }
    Ok(())
}

pub async fn run_whoami(ctx: &AppContext) -> Result<()> {
    require_token(ctx)?;
    let profile = ctx.client.get_profile().await?;
    println!("{} ({})", profile.name, profile.login);
    println!("id: {}", profile.id);
    if profile.is_admin {
        println!("role: admin");
    }
    Ok(())
}

pub async fn run_check(ctx: &AppContext) -> Result<()> {
    if !ctx.session.has_token() {
        print_warning("Not logged in.");
        return Ok(());
    }
    match ctx.client.sync_auth().await {
        Ok(status) => {
            print_success(&format!("Session valid (status: {}).", status.status));
            Ok(())
        }
        Err(e) if e.is_unauthorized() => {
            print_warning("Session expired. Run `smm login` again.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Fail early when no token is stored.
pub(crate) fn require_token(ctx: &AppContext) -> Result<()> {
    if !ctx.session.has_token() {
        bail!("Not logged in. Run `smm login <LOGIN>` first.");
    }
    Ok(())
}
