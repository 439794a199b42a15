//! Typed result contracts of the service endpoints.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tokens::Tokens;

/// A plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Account data as returned by profile, registration and access checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub profile_completed: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    pub date_joined: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Registration form.
///
/// `password2` is the confirmation field the service checks; [`RegisterRequest::new`]
/// fills it with the same password.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            email: email.into(),
            username: username.into(),
            password2: password.clone(),
            password,
            first_name: None,
            last_name: None,
            phone: None,
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Response from registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub user: UserProfile,
    pub tokens: Tokens,
    #[serde(default)]
    pub message: String,
}

/// Partial profile update; unset fields are left untouched by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A website registered with the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Website {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub auto_register_users: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response from verify-access.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyAccessResponse {
    pub has_access: bool,
    pub user: UserProfile,
    pub website: Website,
}

/// Effective permissions of the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionsSummary {
    pub user_id: Uuid,
    pub user_email: String,
    #[serde(default)]
    pub website_id: Option<String>,
    #[serde(default)]
    pub website_name: Option<String>,
    #[serde(default)]
    pub global_permissions: Vec<String>,
    #[serde(default)]
    pub local_permissions: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl PermissionsSummary {
    /// True if the codename is granted globally or for the queried website.
    pub fn grants(&self, codename: &str) -> bool {
        self.global_permissions.iter().any(|p| p == codename)
            || self.local_permissions.iter().any(|p| p == codename)
    }
}

/// Response from check-permission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionCheck {
    pub has_permission: bool,
    #[serde(default)]
    pub permission_codename: Option<String>,
    #[serde(default)]
    pub website_id: Option<String>,
}

/// A tracked login session on a website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: Uuid,
    pub user_email: String,
    #[serde(default)]
    pub website_name: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
}

/// The sessions endpoint is paginated by default but may be configured not to be.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SessionListBody {
    Paged { results: Vec<UserSession> },
    Plain(Vec<UserSession>),
}

impl SessionListBody {
    pub(crate) fn into_sessions(self) -> Vec<UserSession> {
        match self {
            SessionListBody::Paged { results } => results,
            SessionListBody::Plain(sessions) => sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_json() -> serde_json::Value {
        json!({
            "id": "0b9f4a4e-2c55-4a7e-9a51-0d7f3c8f2a10",
            "email": "alice@example.com",
            "username": "alice",
            "first_name": "Alice",
            "last_name": "Liddell",
            "full_name": "Alice Liddell",
            "phone": "",
            "street": null,
            "date_of_birth": "1990-05-04",
            "profile_completed": true,
            "is_active": true,
            "is_verified": false,
            "date_joined": "2024-01-02T10:00:00.123456Z",
            "last_login": null,
            "lexware_contact_id": null
        })
    }

    #[test]
    fn profile_tolerates_nulls_and_unknown_fields() {
        let profile: UserProfile = serde_json::from_value(profile_json()).unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.street, None);
        assert_eq!(
            profile.date_of_birth,
            Some(NaiveDate::from_ymd_opt(1990, 5, 4).unwrap())
        );
        assert!(profile.last_login.is_none());
    }

    #[test]
    fn register_request_confirms_password() {
        let request = RegisterRequest::new("alice@example.com", "alice", "pw12345678")
            .first_name("Alice");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["password2"], "pw12345678");
        assert_eq!(body["first_name"], "Alice");
        assert!(body.get("phone").is_none());
        assert!(!format!("{:?}", request).contains("pw12345678"));
    }

    #[test]
    fn profile_update_serializes_only_set_fields() {
        let update = ProfileUpdate {
            city: Some("Berlin".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"city": "Berlin"}));
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn permissions_summary_grants() {
        let summary: PermissionsSummary = serde_json::from_value(json!({
            "user_id": "0b9f4a4e-2c55-4a7e-9a51-0d7f3c8f2a10",
            "user_email": "alice@example.com",
            "website_id": null,
            "website_name": null,
            "global_permissions": ["manage_users"],
            "local_permissions": ["edit_article"],
            "roles": ["Blog Editor"]
        }))
        .unwrap();
        assert!(summary.grants("manage_users"));
        assert!(summary.grants("edit_article"));
        assert!(!summary.grants("delete_article"));
    }

    #[test]
    fn session_list_accepts_paged_and_plain_bodies() {
        let session = json!({
            "id": "5f0c7a52-8f2d-4c1e-b7f0-3f7a9e1d2c44",
            "user_email": "alice@example.com",
            "website_name": "Blog",
            "ip_address": "127.0.0.1",
            "created_at": "2024-01-02T10:00:00Z",
            "last_activity": "2024-01-02T11:00:00Z",
            "expires_at": "2024-01-03T10:00:00+01:00",
            "is_active": true
        });

        let paged: SessionListBody =
            serde_json::from_value(json!({"count": 1, "next": null, "results": [session.clone()]}))
                .unwrap();
        assert_eq!(paged.into_sessions().len(), 1);

        let plain: SessionListBody = serde_json::from_value(json!([session])).unwrap();
        let sessions = plain.into_sessions();
        assert_eq!(sessions[0].website_name.as_deref(), Some("Blog"));
    }
}
