//! authsvc-http - reqwest transport for the authsvc session client.

mod transport;

pub use transport::{HttpTransport, HttpTransportBuilder};

use authsvc_core::{ServiceUrl, SessionManager, TokenStore, TransportError};

/// Create a session manager that talks to `base_url` over HTTP.
///
/// Credentials are hydrated from `store`; no request is sent.
pub fn connect(
    base_url: ServiceUrl,
    store: impl TokenStore + 'static,
) -> Result<SessionManager, TransportError> {
    let transport = HttpTransport::new()?;
    Ok(SessionManager::new(base_url, transport, store))
}
