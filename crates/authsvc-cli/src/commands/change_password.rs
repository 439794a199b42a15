//! Change password command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ChangePasswordArgs {
    /// Current password
    #[arg(long)]
    pub old_password: String,

    /// New password
    #[arg(long)]
    pub new_password: String,
}

pub async fn run(args: ChangePasswordArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let response = session
        .change_password(&args.old_password, &args.new_password)
        .await
        .context("Failed to change password")?;

    output::success(&response.message);
    Ok(())
}
