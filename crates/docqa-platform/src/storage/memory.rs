//! In-memory token store.
//! Used when localStorage is unavailable; the session ends with the page.

use std::cell::RefCell;

use docqa_core::ports::TokenStore;
use docqa_types::Result;

pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            token: RefCell::new(None),
        }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn read_token(&self) -> Result<Option<String>> {
        Ok(self.token.borrow().clone())
    }

    fn write_token(&self, token: &str) -> Result<()> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        self.token.borrow_mut().take();
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
