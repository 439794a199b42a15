//! Logout command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, session: &CliSession) -> Result<()> {
    if !session.is_authenticated() && session.refresh_token().is_none() {
        eprintln!("{}", "Not logged in.".dimmed());
        return Ok(());
    }

    eprintln!("{}", "Logging out...".dimmed());

    match session.logout().await {
        Ok(response) => output::success(&response.message),
        Err(e) => {
            output::warning(&format!("Remote logout failed: {}", e));
            output::success("Local session cleared");
        }
    }

    Ok(())
}
