//! Subcommand implementations.

mod change_password;
mod check_permission;
mod login;
mod logout;
mod permissions;
mod refresh_token;
mod register;
mod sessions;
mod status;
mod update_profile;
mod verify_access;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use crate::output;
use crate::session::{Access, CliSession};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password
    Login(login::LoginArgs),

    /// Create an account and log in
    Register(register::RegisterArgs),

    /// End the session on the service and locally
    Logout(logout::LogoutArgs),

    /// Show the stored session without contacting the service
    Status(status::StatusArgs),

    /// Display the profile of the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Update profile fields
    UpdateProfile(update_profile::UpdateProfileArgs),

    /// Change the account password
    ChangePassword(change_password::ChangePasswordArgs),

    /// Check access to a website
    VerifyAccess(verify_access::VerifyAccessArgs),

    /// List effective permissions
    Permissions(permissions::PermissionsArgs),

    /// Check a single permission
    CheckPermission(check_permission::CheckPermissionArgs),

    /// List tracked website sessions
    Sessions(sessions::SessionsArgs),

    /// Exchange the refresh token for a new access token
    RefreshToken(refresh_token::RefreshTokenArgs),
}

pub async fn handle(command: Command, url: Option<&str>) -> Result<()> {
    let starts_session = matches!(command, Command::Login(_) | Command::Register(_));
    let access = if starts_session {
        Access::Replace
    } else {
        Access::Stored
    };
    let session = CliSession::open(url, access)?;

    let result = match command {
        Command::Login(args) => login::run(args, &session).await,
        Command::Register(args) => register::run(args, &session).await,
        Command::Logout(args) => logout::run(args, &session).await,
        Command::Status(args) => status::run(args, &session).await,
        Command::Whoami(args) => whoami::run(args, &session).await,
        Command::UpdateProfile(args) => update_profile::run(args, &session).await,
        Command::ChangePassword(args) => change_password::run(args, &session).await,
        Command::VerifyAccess(args) => verify_access::run(args, &session).await,
        Command::Permissions(args) => permissions::run(args, &session).await,
        Command::CheckPermission(args) => check_permission::run(args, &session).await,
        Command::Sessions(args) => sessions::run(args, &session).await,
        Command::RefreshToken(args) => refresh_token::run(args, &session).await,
    };

    if !starts_session
        && let Err(e) = &result
        && requires_login(e)
    {
        output::warning("Session expired. Run 'authsvc login' to start a new one.");
    }
    result
}

fn requires_login(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<authsvc_core::Error>()
            .is_some_and(authsvc_core::Error::requires_login)
    })
}
