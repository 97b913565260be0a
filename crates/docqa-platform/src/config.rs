//! Client configuration from the browser.
//!
//! Build-time defaults can be overridden per browser by storing a JSON
//! object under `docqa:config` in localStorage, e.g.
//! `{"api_url": "https://qa.example.org"}`.

use docqa_types::{Result, config::ClientConfig};

use crate::storage::local::local_storage;

pub const CONFIG_STORAGE_KEY: &str = "docqa:config";

fn stored_override() -> Result<Option<ClientConfig>> {
    let raw = local_storage()?
        .get_item(CONFIG_STORAGE_KEY)
        .map_err(|e| docqa_types::ClientError::Storage(format!("{:?}", e)))?;
    raw.map(|data| ClientConfig::from_json(&data)).transpose()
}

/// Defaults, replaced by a valid stored override when present.
pub fn load_config() -> ClientConfig {
    match stored_override() {
        Ok(Some(config)) => {
            log::info!("Config override loaded from {}", CONFIG_STORAGE_KEY);
            config
        }
        Ok(None) => ClientConfig::default(),
        Err(e) => {
            log::warn!("Ignoring config override: {}", e);
            ClientConfig::default()
        }
    }
}
