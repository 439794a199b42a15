//! In-memory credentials and their persisted mirror.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::tokens::{AccessToken, RefreshToken, Tokens};
use crate::traits::TokenStore;

#[derive(Debug, Default)]
struct SessionTokens {
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
}

/// Credentials held by a session manager.
///
/// Every mutation updates memory and the store under the same write lock,
/// so the store never sees interleaved updates. The lock is never held
/// across an await point.
pub(crate) struct CredentialState {
    tokens: RwLock<SessionTokens>,
    store: Arc<dyn TokenStore>,
}

impl CredentialState {
    /// Load credentials from the store. Unreadable entries count as absent.
    pub(crate) fn hydrate(store: Arc<dyn TokenStore>) -> Self {
        let access_token = read_key(store.as_ref(), ACCESS_TOKEN_KEY).map(AccessToken::new);
        let refresh_token = read_key(store.as_ref(), REFRESH_TOKEN_KEY).map(RefreshToken::new);

        debug!(
            has_access = access_token.is_some(),
            has_refresh = refresh_token.is_some(),
            "Hydrated credentials from store"
        );

        Self {
            tokens: RwLock::new(SessionTokens {
                access_token,
                refresh_token,
            }),
            store,
        }
    }

    pub(crate) fn access_token(&self) -> Option<AccessToken> {
        let tokens = self.tokens.read().unwrap_or_else(PoisonError::into_inner);
        tokens.access_token.clone()
    }

    pub(crate) fn refresh_token(&self) -> Option<RefreshToken> {
        let tokens = self.tokens.read().unwrap_or_else(PoisonError::into_inner);
        tokens.refresh_token.clone()
    }

    /// Replace both tokens, as after login or registration.
    pub(crate) fn set_pair(&self, pair: &Tokens) {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        tokens.access_token = Some(pair.access.clone());
        tokens.refresh_token = Some(pair.refresh.clone());

        let written = self
            .store
            .set(ACCESS_TOKEN_KEY, pair.access.as_str())
            .and_then(|()| self.store.set(REFRESH_TOKEN_KEY, pair.refresh.as_str()));

        if let Err(e) = written {
            warn!(error = %e, "Failed to persist tokens, clearing store");
            // A half-written pair must not survive a restart.
            self.remove_persisted();
        }
    }

    /// Replace only the access token minted from `used`.
    ///
    /// The token is dropped when the refresh token changed in the meantime
    /// (logout or a new login). Returns whether it was applied.
    pub(crate) fn set_access(&self, access: AccessToken, used: &RefreshToken) -> bool {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        if tokens.refresh_token.as_ref() != Some(used) {
            debug!("Credentials changed during refresh, dropping new access token");
            return false;
        }

        if let Err(e) = self.store.set(ACCESS_TOKEN_KEY, access.as_str()) {
            warn!(error = %e, "Failed to persist refreshed access token");
        }
        tokens.access_token = Some(access);
        true
    }

    /// Forget both tokens in memory and in the store.
    pub(crate) fn clear(&self) {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        tokens.access_token = None;
        tokens.refresh_token = None;
        self.remove_persisted();
    }

    fn remove_persisted(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(error = %e, key, "Failed to remove persisted token");
            }
        }
    }
}

fn read_key(store: &dyn TokenStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, key, "Failed to read persisted token");
            None
        }
    }
}

/// Clears the credentials when dropped.
///
/// Held for the duration of a logout so the local session ends on every
/// exit path, including a cancelled future.
pub(crate) struct ClearOnDrop<'a>(pub(crate) &'a CredentialState);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.0.clear();
        debug!("Local credentials cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::store::MemoryStore;

    /// Fails every write to the refresh key.
    struct BrokenRefreshStore(MemoryStore);

    impl TokenStore for BrokenRefreshStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == REFRESH_TOKEN_KEY {
                return Err(StorageError::Io {
                    path: "test".to_string(),
                    message: "disk full".to_string(),
                });
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    fn pair(access: &str, refresh: &str) -> Tokens {
        Tokens {
            access: AccessToken::new(access),
            refresh: RefreshToken::new(refresh),
        }
    }

    #[test]
    fn hydrates_present_and_absent_keys() {
        let store = Arc::new(MemoryStore::with_entries([(REFRESH_TOKEN_KEY, "R0")]));
        let state = CredentialState::hydrate(store);
        assert!(state.access_token().is_none());
        assert_eq!(state.refresh_token().unwrap().as_str(), "R0");
    }

    #[test]
    fn set_access_keeps_refresh() {
        let store = Arc::new(MemoryStore::new());
        let state = CredentialState::hydrate(store.clone());
        state.set_pair(&pair("A1", "R1"));
        assert!(state.set_access(AccessToken::new("A2"), &RefreshToken::new("R1")));

        assert_eq!(state.access_token().unwrap().as_str(), "A2");
        assert_eq!(state.refresh_token().unwrap().as_str(), "R1");
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("A2"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R1"));
    }

    #[test]
    fn set_access_dropped_after_clear() {
        let store = Arc::new(MemoryStore::new());
        let state = CredentialState::hydrate(store.clone());
        state.set_pair(&pair("A1", "R1"));
        state.clear();

        assert!(!state.set_access(AccessToken::new("A2"), &RefreshToken::new("R1")));
        assert!(state.access_token().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn set_access_dropped_after_new_login() {
        let store = Arc::new(MemoryStore::new());
        let state = CredentialState::hydrate(store.clone());
        state.set_pair(&pair("A1", "R1"));
        state.set_pair(&pair("B1", "S1"));

        assert!(!state.set_access(AccessToken::new("A2"), &RefreshToken::new("R1")));
        assert_eq!(state.access_token().unwrap().as_str(), "B1");
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("B1"));
    }

    #[test]
    fn half_written_pair_is_removed_from_store() {
        let store = Arc::new(BrokenRefreshStore(MemoryStore::new()));
        let state = CredentialState::hydrate(store.clone());
        state.set_pair(&pair("A1", "R1"));

        // Memory keeps working, the store is left empty rather than partial.
        assert_eq!(state.access_token().unwrap().as_str(), "A1");
        assert!(store.0.is_empty());
    }

    #[test]
    fn guard_clears_on_drop() {
        let store = Arc::new(MemoryStore::new());
        let state = CredentialState::hydrate(store.clone());
        state.set_pair(&pair("A1", "R1"));

        drop(ClearOnDrop(&state));

        assert!(state.access_token().is_none());
        assert!(state.refresh_token().is_none());
        assert!(store.is_empty());
    }
}
