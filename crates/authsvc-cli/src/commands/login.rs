//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use authsvc_core::Credentials;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "AUTHSVC_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, session: &CliSession) -> Result<()> {
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    session
        .login(&credentials)
        .await
        .context("Failed to login")?;
    session.remember_url()?;

    output::success("Logged in successfully");
    println!();
    output::field("Email", &args.email);
    output::field("Service", session.base_url().as_str());

    Ok(())
}
