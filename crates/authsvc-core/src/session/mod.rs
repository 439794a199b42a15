//! Session management for authenticated requests.

mod options;
mod state;


use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace, warn};

use crate::Result;
use crate::api::endpoints::{LOGIN, LOGOUT, REGISTER, RefreshRequest, RefreshResponse, TOKEN_REFRESH};
use crate::api::{MessageResponse, RegisterRequest, RegisterResponse};
use crate::credentials::Credentials;
use crate::error::{Error, RefreshError};
use crate::store::NoopStore;
use crate::tokens::{AccessToken, RefreshToken, Tokens};
use crate::traits::{TokenStore, Transport};
use crate::types::{Headers, HttpRequest, HttpResponse, ServiceUrl};

pub use options::RequestOptions;

use state::{ClearOnDrop, CredentialState};

/// Whether a request carries the bearer access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

/// Client-side session for the auth service.
///
/// Holds the access/refresh token pair, attaches the access token to
/// requests, and when the service answers `401` exchanges the refresh token
/// for a new access token and retries the request once.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Concurrent dispatches that hit an expired token each
/// run their own refresh exchange; nothing coalesces them.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use authsvc_core::{Credentials, MemoryStore, SessionManager, ServiceUrl, Transport};
///
/// # async fn example(transport: Arc<dyn Transport>) -> authsvc_core::Result<()> {
/// let base = ServiceUrl::new("https://auth.example.com")?;
/// let session = SessionManager::new(base, transport, MemoryStore::new());
///
/// session.login(&Credentials::new("alice@example.com", "secret")).await?;
/// let profile = session.profile().await?;
/// println!("Logged in as: {}", profile.email);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    base_url: ServiceUrl,
    transport: Arc<dyn Transport>,
    state: CredentialState,
}

impl SessionManager {
    /// Create a session manager and hydrate its credentials from `store`.
    ///
    /// No network call is made.
    pub fn new(
        base_url: ServiceUrl,
        transport: impl Transport + 'static,
        store: impl TokenStore + 'static,
    ) -> Self {
        let state = CredentialState::hydrate(Arc::new(store));
        Self {
            inner: Arc::new(SessionInner {
                base_url,
                transport: Arc::new(transport),
                state,
            }),
        }
    }

    /// Create a session manager whose credentials live only in memory.
    pub fn in_memory(base_url: ServiceUrl, transport: impl Transport + 'static) -> Self {
        Self::new(base_url, transport, NoopStore)
    }

    /// Returns the service base URL.
    pub fn base_url(&self) -> &ServiceUrl {
        &self.inner.base_url
    }

    /// True iff an access token is held. The token is not validated.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.access_token().is_some()
    }

    /// Returns the current access token.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.inner.state.access_token()
    }

    /// Returns the current refresh token.
    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.inner.state.refresh_token()
    }

    /// Perform an authenticated request against `base_url + path`.
    ///
    /// A `401` while a refresh token is held triggers one refresh and one
    /// retry of the same request.
    ///
    /// # Errors
    ///
    /// - [`Error::Request`] if the final response is not 2xx
    /// - [`Error::Refresh`] if a `401` was met and the refresh itself failed
    /// - [`Error::Decode`] if a 2xx body does not match `R`
    /// - [`Error::Transport`] if the service could not be reached
    #[instrument(skip(self, options), fields(method = %options.method()))]
    pub async fn dispatch<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R> {
        let mut response = self.send(path, &options, Auth::Bearer).await?;

        if response.status == 401 {
            if self.inner.state.refresh_token().is_some() {
                info!("Access token rejected, refreshing");
                self.refresh_access_token().await?;
                response = self.send(path, &options, Auth::Bearer).await?;
            } else {
                debug!("Access token rejected and no refresh token held");
            }
        }

        decode(response)
    }

    /// Authenticate with email and password and store the issued tokens.
    ///
    /// The request never carries a bearer token and is not retried.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Tokens> {
        info!("Logging in");

        let options = RequestOptions::post().json(credentials)?;
        let response = self.send(LOGIN, &options, Auth::Anonymous).await?;
        let tokens: Tokens = decode(response)?;

        self.inner.state.set_pair(&tokens);
        debug!("Login succeeded");
        Ok(tokens)
    }

    /// Create an account and store the tokens issued with it.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        info!("Registering account");

        let options = RequestOptions::post().json(request)?;
        let response = self.send(REGISTER, &options, Auth::Anonymous).await?;
        let registered: RegisterResponse = decode(response)?;

        self.inner.state.set_pair(&registered.tokens);
        debug!(user_id = %registered.user.id, "Registration succeeded");
        Ok(registered)
    }

    /// Invalidate the refresh token on the service and end the local session.
    ///
    /// Local credentials and the store are cleared whatever the outcome of
    /// the remote call, including when the returned future is dropped.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<MessageResponse> {
        let _clear = ClearOnDrop(&self.inner.state);
        info!("Logging out");

        let refresh = self.inner.state.refresh_token();
        let options = RequestOptions::post().json(&RefreshRequest {
            refresh: refresh.as_ref().map(RefreshToken::as_str),
        })?;

        let result = self.dispatch(LOGOUT, options).await;
        if let Err(e) = &result {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }
        result
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// On failure the stale refresh token is kept; deciding to log out is
    /// left to the caller. If the session is logged out or replaced while
    /// the request is in flight, the new token is discarded and
    /// [`RefreshError::Superseded`] is returned.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> Result<AccessToken> {
        let refresh = self
            .inner
            .state
            .refresh_token()
            .ok_or(RefreshError::MissingRefreshToken)?;

        info!("Refreshing access token");

        let options = RequestOptions::post().json(&RefreshRequest {
            refresh: Some(refresh.as_str()),
        })?;

        let response = match self.send(TOKEN_REFRESH, &options, Auth::Anonymous).await {
            Ok(response) => response,
            Err(Error::Transport(e)) => return Err(RefreshError::Unreachable(e).into()),
            Err(e) => return Err(e),
        };

        if !response.is_success() {
            let error = response.into_request_error();
            warn!(status = error.status, "Refresh token rejected");
            return Err(RefreshError::Rejected {
                status: error.status,
                payload: error.payload,
            }
            .into());
        }

        let body: RefreshResponse = response
            .json()
            .map_err(|e| RefreshError::InvalidResponse(e.to_string()))?;

        if !self.inner.state.set_access(body.access.clone(), &refresh) {
            return Err(RefreshError::Superseded.into());
        }
        debug!("Access token refreshed");
        Ok(body.access)
    }

    /// Build headers for one attempt.
    ///
    /// Defaults: JSON content type and, for [`Auth::Bearer`], the current
    /// access token. Caller headers are applied on top, except for the
    /// content type since bodies are always JSON.
    fn headers(&self, options: &RequestOptions, auth: Auth) -> Result<Headers> {
        let mut headers = Headers::new();
        headers.insert("content-type", "application/json")?;

        if auth == Auth::Bearer
            && let Some(token) = self.inner.state.access_token()
        {
            headers.insert("authorization", token.bearer())?;
        }

        let mut caller = options.caller_headers()?;
        if caller.remove("content-type").is_some() {
            trace!("Ignoring caller content-type header");
        }
        headers.merge(&caller);
        Ok(headers)
    }

    async fn send(&self, path: &str, options: &RequestOptions, auth: Auth) -> Result<HttpResponse> {
        let url = self
            .inner
            .base_url
            .endpoint_with_query(path, options.query_pairs())?;

        let request = HttpRequest {
            method: options.method(),
            url,
            headers: self.headers(options, auth)?,
            body: options.body().map(str::to_string),
        };

        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.inner.transport.send(request).await?;
        trace!(status = response.status, "Received response");
        Ok(response)
    }
}

/// Turn the final response of a dispatch into a typed result.
fn decode<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
    if response.is_success() {
        response.json()
    } else {
        Err(response.into_request_error().into())
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.inner.base_url)
            .field("authenticated", &self.is_authenticated())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
