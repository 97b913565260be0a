//! localStorage token store.
//! Persistent across reloads and shared by every tab of the origin.

use web_sys::Storage;

use docqa_core::ports::TokenStore;
use docqa_types::{ClientError, Result};

pub struct LocalStorageTokenStore {
    storage: Storage,
    key: String,
}

/// The origin's localStorage, if the browser exposes it.
pub(crate) fn local_storage() -> Result<Storage> {
    gloo_utils::window()
        .local_storage()
        .map_err(|e| ClientError::Storage(format!("{:?}", e)))?
        .ok_or_else(|| ClientError::Storage("localStorage not available".to_string()))
}

impl LocalStorageTokenStore {
    pub fn open(key: &str) -> Result<Self> {
        Ok(Self {
            storage: local_storage()?,
            key: key.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn read_token(&self) -> Result<Option<String>> {
        self.storage
            .get_item(&self.key)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn write_token(&self, token: &str) -> Result<()> {
        self.storage
            .set_item(&self.key, token)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn clear_token(&self) -> Result<()> {
        self.storage
            .remove_item(&self.key)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
