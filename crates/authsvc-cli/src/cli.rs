//! CLI argument definitions.

use clap::Parser;

use crate::commands::Command;

/// Command-line client for the auth service.
#[derive(Parser, Debug)]
#[command(name = "authsvc")]
#[command(author, version = env!("AUTHSVC_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Service base URL (defaults to the URL of the stored session)
    #[arg(long, env = "AUTHSVC_URL", global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}
