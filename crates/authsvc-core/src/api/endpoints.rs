//! Endpoint paths and request/response types of the auth service.

use serde::{Deserialize, Serialize};

use crate::tokens::AccessToken;

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const REGISTER: &str = "/api/accounts/register/";
pub const LOGIN: &str = "/api/accounts/login/";
pub const LOGOUT: &str = "/api/accounts/logout/";
pub const TOKEN_REFRESH: &str = "/api/accounts/token/refresh/";
pub const PROFILE: &str = "/api/accounts/profile/";
pub const CHANGE_PASSWORD: &str = "/api/accounts/change-password/";
pub const VERIFY_ACCESS: &str = "/api/accounts/verify-access/";
pub const SESSIONS: &str = "/api/accounts/sessions/";
pub const MY_PERMISSIONS: &str = "/api/permissions/check/me/";
pub const CHECK_PERMISSION: &str = "/api/permissions/check-permission/";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for token refresh and logout.
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: Option<&'a str>,
}

/// Response from token refresh.
#[derive(Debug, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access: AccessToken,
}

/// Request body for change-password.
#[derive(Serialize)]
pub(crate) struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
    pub new_password2: &'a str,
}

/// Request body for verify-access.
#[derive(Debug, Serialize)]
pub(crate) struct VerifyAccessRequest<'a> {
    pub website_id: &'a str,
}

/// Request body for check-permission.
#[derive(Debug, Serialize)]
pub(crate) struct CheckPermissionRequest<'a> {
    pub permission_codename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_id: Option<&'a str>,
}
