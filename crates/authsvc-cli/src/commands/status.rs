//! Status command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub async fn run(_args: StatusArgs, session: &CliSession) -> Result<()> {
    output::field("Service", session.base_url().as_str());
    output::field("Session file", &session.path().display().to_string());
    output::flag("Authenticated", session.is_authenticated());
    output::flag("Refresh token", session.refresh_token().is_some());

    Ok(())
}
