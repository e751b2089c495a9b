//! Session context owning the bearer token
//!
//! The token lives in one of two storage areas, chosen per login by the
//! "remember me" flag. Call sites receive a [`SessionContext`] explicitly
//! instead of reaching for global browser storage, so the same logic runs
//! against `localStorage`/`sessionStorage` in the browser and against
//! [`MemoryTokenStorage`] natively.

use crate::error::CoreResult;
use crate::types::{AUTH_TOKEN_KEY, JwtToken, StorageKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Key/value storage split into a local and a session area
pub trait TokenStorage: Send + Sync {
    /// Read a value, `None` when absent
    fn retrieve(&self, kind: StorageKind, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn store(&self, kind: StorageKind, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a value; removing an absent key is not an error
    fn clear(&self, kind: StorageKind, key: &str);
}

/// In-process storage, used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    entries: Mutex<HashMap<(StorageKind, String), String>>,
}

impl MemoryTokenStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn retrieve(&self, kind: StorageKind, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(&(kind, key.to_string())).cloned()
    }

    fn store(&self, kind: StorageKind, key: &str, value: &str) -> CoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert((kind, key.to_string()), value.to_string());
        Ok(())
    }

    fn clear(&self, kind: StorageKind, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(&(kind, key.to_string()));
    }
}

/// Explicit handle to the current authentication session
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn TokenStorage>,
}

impl SessionContext {
    /// Create a session over the given storage
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Create a session backed by [`MemoryTokenStorage`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::new()))
    }

    /// Current token; local storage wins over session storage
    pub fn token(&self) -> Option<JwtToken> {
        StorageKind::ALL.iter().find_map(|kind| {
            self.storage
                .retrieve(*kind, AUTH_TOKEN_KEY)
                .filter(|token| !token.is_empty())
                .map(JwtToken::from)
        })
    }

    /// Storage area currently holding a token, if any
    pub fn token_source(&self) -> Option<StorageKind> {
        StorageKind::ALL.into_iter().find(|kind| {
            self.storage
                .retrieve(*kind, AUTH_TOKEN_KEY)
                .is_some_and(|token| !token.is_empty())
        })
    }

    /// Persist a token in the area selected by `remember_me`
    ///
    /// Only one area is written; the other one is left untouched.
    pub fn store_token(&self, token: &JwtToken, remember_me: bool) -> CoreResult<()> {
        let kind = StorageKind::for_remember_me(remember_me);
        debug!(storage = %kind, "Storing authentication token");
        self.storage
            .store(kind, AUTH_TOKEN_KEY, token.as_str())
            .inspect_err(|e| warn!(storage = %kind, "Failed to store token: {e}"))
    }

    /// Remove the token from both areas
    pub fn clear(&self) {
        for kind in StorageKind::ALL {
            self.storage.clear(kind, AUTH_TOKEN_KEY);
        }
        debug!("Cleared authentication token");
    }

    /// Whether any token is stored
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Underlying storage
    pub fn storage(&self) -> &Arc<dyn TokenStorage> {
        &self.storage
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token_source", &self.token_source())
            .finish()
    }
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(session: &SessionContext, kind: StorageKind) -> Option<String> {
        session.storage().retrieve(kind, AUTH_TOKEN_KEY)
    }

    #[test]
    fn remember_me_stores_in_local_storage() {
        let session = SessionContext::in_memory();
        session
            .store_token(&JwtToken::new("persistent"), true)
            .unwrap();

        assert_eq!(
            stored(&session, StorageKind::Local).as_deref(),
            Some("persistent")
        );
        assert_eq!(stored(&session, StorageKind::Session), None);
        assert_eq!(session.token_source(), Some(StorageKind::Local));
    }

    #[test]
    fn without_remember_me_stores_in_session_storage() {
        let session = SessionContext::in_memory();
        session.store_token(&JwtToken::new("tab-only"), false).unwrap();

        assert_eq!(stored(&session, StorageKind::Local), None);
        assert_eq!(
            stored(&session, StorageKind::Session).as_deref(),
            Some("tab-only")
        );
        assert_eq!(session.token().unwrap().as_str(), "tab-only");
    }

    #[test]
    fn local_token_takes_precedence() {
        let session = SessionContext::in_memory();
        session.store_token(&JwtToken::new("session"), false).unwrap();
        session.store_token(&JwtToken::new("local"), true).unwrap();

        assert_eq!(session.token().unwrap().as_str(), "local");
    }

    #[test]
    fn clear_empties_both_areas() {
        let session = SessionContext::in_memory();
        session.store_token(&JwtToken::new("a"), true).unwrap();
        session.store_token(&JwtToken::new("b"), false).unwrap();

        session.clear();

        assert_eq!(stored(&session, StorageKind::Local), None);
        assert_eq!(stored(&session, StorageKind::Session), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let session = SessionContext::in_memory();
        session
            .storage()
            .store(StorageKind::Local, AUTH_TOKEN_KEY, "")
            .unwrap();
        session.store_token(&JwtToken::new("real"), false).unwrap();

        assert_eq!(session.token().unwrap().as_str(), "real");
        assert_eq!(session.token_source(), Some(StorageKind::Session));
    }

    #[test]
    fn clones_share_storage() {
        let session = SessionContext::in_memory();
        let other = session.clone();
        session.store_token(&JwtToken::new("shared"), true).unwrap();

        assert!(other.is_authenticated());
        assert_eq!(session, other);
        assert_ne!(session, SessionContext::in_memory());
    }
}
