//! authsvc-core - Client session management for the auth service.
//!
//! All authenticated operations flow through a [`SessionManager`], which
//! owns the access/refresh token pair, mirrors it into a [`TokenStore`],
//! and sends requests through an injected [`Transport`]. When the service
//! rejects an access token with `401`, the manager exchanges the refresh
//! token for a new one and retries the request once.

pub mod api;
pub mod credentials;
pub mod error;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use api::{
    MessageResponse, PermissionCheck, PermissionsSummary, ProfileUpdate, RegisterRequest,
    RegisterResponse, UserProfile, UserSession, VerifyAccessResponse, Website,
};
pub use credentials::Credentials;
pub use error::{Error, ErrorPayload, RefreshError, RequestError, StorageError, TransportError};
pub use session::{RequestOptions, SessionManager};
pub use store::{MemoryStore, NoopStore};
pub use tokens::{AccessToken, RefreshToken, Tokens};
pub use traits::{TokenStore, Transport};
pub use types::{Headers, HttpRequest, HttpResponse, Method, ServiceUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
