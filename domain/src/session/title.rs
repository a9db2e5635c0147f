//! Session title derivation.

use crate::core::string::{ELLIPSIS, take_chars, truncate};

/// Title of a session that has not received a user turn yet.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Maximum number of prompt characters kept in a derived title.
pub const TITLE_MAX_CHARS: usize = 30;

/// Maximum width of a title in the session list, ellipsis included.
pub const SIDEBAR_LABEL_MAX_CHARS: usize = 20;

/// Derive a session title from the first user prompt.
///
/// Prompts of up to 30 characters are used verbatim; longer prompts keep
/// their first 30 characters followed by `...`.
pub fn derive_title(prompt: &str) -> String {
    let head = take_chars(prompt, TITLE_MAX_CHARS);
    if head.len() == prompt.len() {
        prompt.to_string()
    } else {
        format!("{}{}", head, ELLIPSIS)
    }
}

/// Shorten a title for the session list.
pub fn sidebar_label(title: &str) -> String {
    truncate(title, SIDEBAR_LABEL_MAX_CHARS)
}
