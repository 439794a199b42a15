//! Check permission command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct CheckPermissionArgs {
    /// Permission codename, e.g. edit_article
    pub codename: String,

    /// Website UUID to check against
    #[arg(long)]
    pub website_id: Option<String>,
}

pub async fn run(args: CheckPermissionArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let granted = session
        .check_permission(&args.codename, args.website_id.as_deref())
        .await
        .context("Failed to check permission")?;

    output::field("Permission", &args.codename);
    output::flag("Granted", granted);

    Ok(())
}
