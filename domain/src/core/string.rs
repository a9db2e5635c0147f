//! String utilities for the domain layer.
//!
//! Lengths here are counted in Unicode scalar values, not bytes, so a title
//! never ends in the middle of a multi-byte character.

/// Ellipsis marker appended to shortened text.
pub const ELLIPSIS: &str = "...";

/// Return the prefix of `s` holding at most `max_chars` characters.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate a string to a maximum length with ellipsis.
///
/// The result is at most `max_chars` characters long, ellipsis included
/// (a limit below the ellipsis length still yields the bare ellipsis).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let keep = max_chars.saturating_sub(ELLIPSIS.len());
        format!("{}{}", take_chars(s, keep), ELLIPSIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_ascii() {
        assert_eq!(take_chars("hello world", 5), "hello");
        assert_eq!(take_chars("hi", 10), "hi");
        assert_eq!(take_chars("", 3), "");
    }

    #[test]
    fn test_take_chars_multibyte() {
        assert_eq!(take_chars("あのね", 2), "あの");
        assert_eq!(take_chars("👋🌍🎉", 1), "👋");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_counts_characters() {
        // 6 characters, 18 bytes: fits even though the byte length exceeds 10
        assert_eq!(truncate("日本語テスト", 10), "日本語テスト");
        assert_eq!(truncate("日本語テスト文字列", 7), "日本語テ...");
    }

    #[test]
    fn test_truncate_tiny_limit() {
        assert_eq!(truncate("abcdef", 2), "...");
    }
}
