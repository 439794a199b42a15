//! CLI session backed by the on-disk token store.

pub mod storage;

use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::debug;

use authsvc_core::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use authsvc_core::{ServiceUrl, SessionManager, TokenStore};
use authsvc_file::FileTokenStore;
use authsvc_http::HttpTransport;

use crate::output;

/// Session manager plus the file its tokens are persisted in.
#[derive(Debug)]
pub struct CliSession {
    manager: SessionManager,
    store: Arc<FileTokenStore>,
}

/// How a run may use the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Use the stored tokens only when they belong to the target service.
    Stored,
    /// Start a new session; on success it replaces the stored one.
    Replace,
}

impl CliSession {
    /// Open the stored session.
    ///
    /// The service URL is taken from `url` if given, else from the stored
    /// session, else the default local deployment. With [`Access::Stored`],
    /// a `url` naming a different service than the stored tokens belong to
    /// opens an anonymous session so the tokens never leave for that host.
    pub fn open(url: Option<&str>, access: Access) -> Result<Self> {
        let store = Arc::new(storage::open_store()?);
        let stored_url = stored_url(&store)?;
        let base_url = match url {
            Some(url) => ServiceUrl::new(url).context("Invalid service URL")?,
            None => stored_url.clone(),
        };
        debug!(url = %base_url, path = %store.path().display(), "Opening session");

        let foreign = base_url != stored_url && has_tokens(&store)?;
        let manager = if foreign && access == Access::Stored {
            output::warning(&format!(
                "Stored session belongs to {}; not sending its tokens to {}",
                stored_url, base_url
            ));
            let transport = HttpTransport::new().context("Failed to create HTTP client")?;
            SessionManager::in_memory(base_url, transport)
        } else {
            authsvc_http::connect(base_url, store.clone()).context("Failed to create HTTP client")?
        };

        Ok(Self { manager, store })
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Remember the service URL for later invocations.
    pub fn remember_url(&self) -> Result<()> {
        self.store
            .set(storage::SERVICE_URL_KEY, self.manager.base_url().as_str())
            .context("Failed to save session")
    }

    pub fn require_login(&self) -> Result<()> {
        if !self.manager.is_authenticated() {
            bail!("No active session. Run 'authsvc login' first.");
        }
        Ok(())
    }
}

impl Deref for CliSession {
    type Target = SessionManager;

    fn deref(&self) -> &SessionManager {
        &self.manager
    }
}

/// The service the stored tokens belong to.
///
/// Tokens saved without a URL were issued by the default deployment.
fn stored_url(store: &FileTokenStore) -> Result<ServiceUrl> {
    let stored = store
        .get(storage::SERVICE_URL_KEY)
        .context("Failed to read session file")?;

    match stored {
        Some(url) => ServiceUrl::new(&url).context("Invalid service URL in session file"),
        None => Ok(ServiceUrl::default()),
    }
}

fn has_tokens(store: &FileTokenStore) -> Result<bool> {
    for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
        if store.get(key).context("Failed to read session file")?.is_some() {
            return Ok(true);
        }
    }
    Ok(false)
}
