//! Blocking browser dialogs.

/// `window.confirm`; a dialog that cannot be shown counts as "cancel".
pub fn confirm(message: &str) -> bool {
    gloo_utils::window()
        .confirm_with_message(message)
        .unwrap_or(false)
}

pub fn alert(message: &str) {
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        log::warn!("alert() failed: {:?}", e);
    }
}
