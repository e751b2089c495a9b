//! Browser backed token storage

use coffee_core::{CoreError, CoreResult, StorageKind, TokenStorage};
use gloo::storage::{LocalStorage, SessionStorage, Storage, errors::StorageError};

/// `localStorage`/`sessionStorage` through gloo
///
/// Values are stored JSON encoded, as gloo does for every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStorage;

impl TokenStorage for BrowserTokenStorage {
    fn retrieve(&self, kind: StorageKind, key: &str) -> Option<String> {
        match kind {
            StorageKind::Local => LocalStorage::get(key).ok(),
            StorageKind::Session => SessionStorage::get(key).ok(),
        }
    }

    fn store(&self, kind: StorageKind, key: &str, value: &str) -> CoreResult<()> {
        match kind {
            StorageKind::Local => LocalStorage::set(key, value),
            StorageKind::Session => SessionStorage::set(key, value),
        }
        .map_err(|e| match e {
            StorageError::SerdeError(e) => CoreError::from(e),
            e => CoreError::storage(format!("{kind} storage: {e}")),
        })
    }

    fn clear(&self, kind: StorageKind, key: &str) {
        match kind {
            StorageKind::Local => LocalStorage::delete(key),
            StorageKind::Session => SessionStorage::delete(key),
        }
    }
}
