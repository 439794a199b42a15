//! Refresh token command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, session: &CliSession) -> Result<()> {
    if session.refresh_token().is_none() {
        bail!("No active session. Run 'authsvc login' first.");
    }

    eprintln!("{}", "Refreshing access token...".dimmed());

    session
        .refresh_access_token()
        .await
        .context("Failed to refresh access token")?;

    output::success("Access token refreshed");
    Ok(())
}
