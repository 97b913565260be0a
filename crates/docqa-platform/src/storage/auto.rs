//! Pick the best available token store.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;

use docqa_core::ports::TokenStore;

use super::{LocalStorageTokenStore, MemoryTokenStore};

/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_token_store(key: &str) -> Rc<dyn TokenStore> {
    match LocalStorageTokenStore::open(key) {
        Ok(store) => {
            log::info!("Token store: localStorage[{}]", store.key());
            Rc::new(store)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryTokenStore::new())
        }
    }
}
