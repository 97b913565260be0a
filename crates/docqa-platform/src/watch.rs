//! Cross-tab session sync.
//!
//! The browser fires `storage` on every *other* tab of the origin when
//! localStorage changes. The watcher raises a flag the app polls so a
//! login or logout in one tab is reflected in the rest.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;

use docqa_types::{ClientError, Result};

pub struct StorageWatcher {
    changed: Rc<Cell<bool>>,
    listener: Closure<dyn FnMut(StorageEvent)>,
}

impl StorageWatcher {
    /// Watch `key`; a full `localStorage.clear()` counts as a change too.
    pub fn new(key: &str, notify: impl Fn() + 'static) -> Result<Self> {
        let changed = Rc::new(Cell::new(false));
        let changed_clone = changed.clone();
        let key = key.to_string();

        let listener = Closure::<dyn FnMut(StorageEvent)>::new(move |event: StorageEvent| {
            let relevant = match event.key() {
                Some(k) => k == key,
                None => true,
            };
            if relevant {
                log::debug!("Token changed in another tab");
                changed_clone.set(true);
                notify();
            }
        });

        gloo_utils::window()
            .add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref())
            .map_err(|e| ClientError::JsInterop(format!("{:?}", e)))?;

        Ok(Self { changed, listener })
    }

    /// True once per batch of changes.
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }
}

impl Drop for StorageWatcher {
    fn drop(&mut self) {
        let _ = gloo_utils::window()
            .remove_event_listener_with_callback("storage", self.listener.as_ref().unchecked_ref());
    }
}
