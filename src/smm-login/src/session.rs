//! Session state shared by the API client and the navigation guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::SecretString;

use crate::storage::{MemoryStorage, Result, TokenStore};

/// Owns the persisted session token and the authentication flag.
///
/// Cloning is cheap and every clone observes the same flag, so the API
/// client and the router's guard can each hold one.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    authenticated: Arc<AtomicBool>,
}

impl SessionManager {
    /// Create a session over the given store.
    ///
    /// The flag starts raised when a token is already persisted.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let session = Self {
            store,
            authenticated: Arc::new(AtomicBool::new(false)),
        };
        let has_token = session.token().is_some();
        session.authenticated.store(has_token, Ordering::SeqCst);
        session
    }

    /// Session backed by [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Current token, read fresh from storage.
    ///
    /// A storage failure is logged and treated as "no token", which leaves
    /// outgoing requests unauthenticated.
    pub fn token(&self) -> Option<SecretString> {
        match self.store.load_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    /// Whether a token is persisted.
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a freshly issued token and raise the flag.
    ///
    /// An empty token counts as no token: the store is cleared and the flag
    /// dropped.
    pub fn store_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            self.store.clear_token()?;
            self.mark_unauthenticated();
            return Ok(());
        }
        self.store.save_token(&SecretString::from(token))?;
        self.mark_authenticated();
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    pub fn mark_authenticated(&self) {
        self.authenticated.store(true, Ordering::SeqCst);
    }

    /// Clear the flag. The stored token is left in place.
    pub fn mark_unauthenticated(&self) {
        if self.authenticated.swap(false, Ordering::SeqCst) {
            tracing::debug!("Session marked unauthenticated");
        }
    }

    /// Drop the stored token and clear the flag.
    ///
    /// Returns true if a token was removed.
    pub fn logout(&self) -> Result<bool> {
        self.mark_unauthenticated();
        let removed = self.store.clear_token()?;
        if removed {
            tracing::info!("Session token removed");
        }
        Ok(removed)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
