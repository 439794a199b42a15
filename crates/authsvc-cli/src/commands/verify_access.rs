//! Verify access command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use authsvc_core::Error;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct VerifyAccessArgs {
    /// Website UUID
    #[arg(long)]
    pub website_id: String,
}

pub async fn run(args: VerifyAccessArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    match session.verify_access(&args.website_id).await {
        Ok(response) => {
            output::flag("Access", response.has_access);
            output::field("Website", &response.website.name);
            output::optional_field("Domain", response.website.domain.as_deref());
            output::field("User", &response.user.email);
            Ok(())
        }
        Err(Error::Request(e)) if e.status == 403 => {
            output::flag("Access", false);
            if let Some(message) = e.payload.message() {
                output::field("Reason", &message);
            }
            bail!("Access to website {} denied", args.website_id)
        }
        Err(e) => Err(e).context("Failed to verify access"),
    }
}
