//! Browser LocalStorage backend

use web_sys::Storage;

use super::store::{KeyValueStore, StoreError};

/// `window.localStorage`, looked up on each call so a revoked storage degrades quietly
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage not available".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage not available".to_string()))?;
        storage
            .remove_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }
}
