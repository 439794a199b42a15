//! Sessions command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct SessionsArgs {
    /// Print the raw list as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SessionsArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let sessions = session
        .list_sessions()
        .await
        .context("Failed to list sessions")?;

    if args.json {
        return output::json_pretty(&sessions);
    }

    if sessions.is_empty() {
        eprintln!("{}", "No sessions found.".dimmed());
        return Ok(());
    }

    for (i, s) in sessions.iter().enumerate() {
        if i > 0 {
            println!();
        }
        output::field("ID", &s.id.to_string());
        output::optional_field("Website", s.website_name.as_deref());
        output::optional_field("IP", s.ip_address.as_deref());
        output::field(
            "Last activity",
            &s.last_activity.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        );
        output::field(
            "Expires",
            &s.expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        );
        output::flag("Active", s.is_active);
    }

    Ok(())
}
