//! Permissions command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct PermissionsArgs {
    /// Website UUID to resolve local permissions for
    #[arg(long)]
    pub website_id: Option<String>,

    /// Print the raw summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: PermissionsArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let summary = session
        .permissions(args.website_id.as_deref())
        .await
        .context("Failed to fetch permissions")?;

    if args.json {
        return output::json_pretty(&summary);
    }

    output::field("User", &summary.user_email);
    output::optional_field("Website", summary.website_name.as_deref());
    output::field("Roles", &summary.roles.join(", "));
    output::field("Global", &summary.global_permissions.join(", "));
    output::field("Local", &summary.local_permissions.join(", "));

    Ok(())
}
