//! Hash-based location, so the app works from any static file host.
//!
//! `#/admin` ↔ `/admin`; an empty hash is `/`.

/// Current route path taken from `location.hash`.
pub fn current_path() -> String {
    let hash = gloo_utils::window().location().hash().unwrap_or_default();
    let path = hash.trim_start_matches('#');
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Point `location.hash` at `path` unless it is already there.
pub fn set_path(path: &str) {
    if current_path() == path {
        return;
    }
    if let Err(e) = gloo_utils::window().location().set_hash(path) {
        log::warn!("Failed to update location: {:?}", e);
    }
}
