//! Update profile command implementation.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;

use authsvc_core::ProfileUpdate;

use crate::output;
use crate::session::CliSession;

use super::whoami::print_profile;

#[derive(Args, Debug)]
pub struct UpdateProfileArgs {
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub street_number: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,

    #[arg(long)]
    pub company: Option<String>,
}

impl From<UpdateProfileArgs> for ProfileUpdate {
    fn from(args: UpdateProfileArgs) -> Self {
        ProfileUpdate {
            username: args.username,
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            street: args.street,
            street_number: args.street_number,
            city: args.city,
            postal_code: args.postal_code,
            country: args.country,
            date_of_birth: args.date_of_birth,
            company: args.company,
        }
    }
}

pub async fn run(args: UpdateProfileArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let update = ProfileUpdate::from(args);
    if update.is_empty() {
        bail!("Nothing to update. Pass at least one field, e.g. --city.");
    }

    let profile = session
        .update_profile(&update)
        .await
        .context("Failed to update profile")?;

    output::success("Profile updated");
    println!();
    print_profile(&profile);

    Ok(())
}
