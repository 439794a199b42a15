//! Endpoint contracts and the convenience calls built on
//! [`SessionManager::dispatch`](crate::SessionManager::dispatch).

mod accounts;
pub(crate) mod endpoints;
mod permissions;
mod types;

pub use endpoints::{
    CHANGE_PASSWORD, CHECK_PERMISSION, LOGIN, LOGOUT, MY_PERMISSIONS, PROFILE, REGISTER,
    SESSIONS, TOKEN_REFRESH, VERIFY_ACCESS,
};
pub use types::{
    MessageResponse, PermissionCheck, PermissionsSummary, ProfileUpdate, RegisterRequest,
    RegisterResponse, UserProfile, UserSession, VerifyAccessResponse, Website,
};
