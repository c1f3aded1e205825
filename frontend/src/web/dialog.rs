//! Native `confirm()` prompt.

/// `false` when the user cancels or the browser blocks the dialog.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
