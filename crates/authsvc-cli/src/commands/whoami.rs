//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use authsvc_core::UserProfile;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the raw profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let profile = session.profile().await.context("Failed to fetch profile")?;

    if args.json {
        return output::json_pretty(&profile);
    }

    print_profile(&profile);
    Ok(())
}

pub(super) fn print_profile(profile: &UserProfile) {
    output::field("ID", &profile.id.to_string());
    output::field("Email", &profile.email);
    output::field("Username", &profile.username);
    output::optional_field("Name", Some(profile.full_name.trim()));
    output::optional_field("Phone", profile.phone.as_deref());
    output::optional_field("City", profile.city.as_deref());
    output::optional_field("Company", profile.company.as_deref());
    output::flag("Verified", profile.is_verified);
    output::flag("Profile completed", profile.profile_completed);
    output::field(
        "Joined",
        &profile.date_joined.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
}
