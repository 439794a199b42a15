//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use authsvc_core::RegisterRequest;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "AUTHSVC_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

pub async fn run(args: RegisterArgs, session: &CliSession) -> Result<()> {
    let mut request = RegisterRequest::new(&args.email, &args.username, &args.password);
    if let Some(first_name) = args.first_name {
        request = request.first_name(first_name);
    }
    if let Some(last_name) = args.last_name {
        request = request.last_name(last_name);
    }
    if let Some(phone) = args.phone {
        request = request.phone(phone);
    }

    eprintln!("{}", "Creating account...".dimmed());

    let registered = session
        .register(&request)
        .await
        .context("Failed to register")?;
    session.remember_url()?;

    output::success("Account created and logged in");
    println!();
    output::field("ID", &registered.user.id.to_string());
    output::field("Email", &registered.user.email);
    output::field("Username", &registered.user.username);
    if !registered.message.is_empty() {
        output::field("Message", &registered.message);
    }

    Ok(())
}
