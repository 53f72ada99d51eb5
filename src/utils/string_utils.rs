//! UTF-8-safe string truncation utilities
//!
//! Bookmark URLs are arbitrary user data and may contain multi-byte
//! characters, so log-friendly shortening must respect character boundaries.

use std::borrow::Cow;

use super::constants::URL_DISPLAY_CHARS;

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// Never panics, even on multi-byte characters.
///
/// # Examples
/// ```
/// # use bookmark_archiver::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("ünïcödé", 3), "ünï");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
#[must_use]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Shorten a URL for warnings: the first 50 characters followed by `...`.
///
/// URLs that already fit are returned unchanged without allocating.
///
/// # Examples
/// ```
/// # use bookmark_archiver::utils::display_url;
/// assert_eq!(display_url("https://example.com"), "https://example.com");
/// let long = format!("https://example.com/{}", "a".repeat(60));
/// assert_eq!(display_url(&long).chars().count(), 53);
/// ```
#[must_use]
pub fn display_url(url: &str) -> Cow<'_, str> {
    let head = safe_truncate_chars(url, URL_DISPLAY_CHARS);
    if head.len() == url.len() {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("{head}..."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        let text = "日本語のテキスト";
        assert_eq!(safe_truncate_chars(text, 3), "日本語");
    }

    #[test]
    fn display_url_keeps_exactly_fifty_chars() {
        let url = "x".repeat(50);
        assert_eq!(display_url(&url), url.as_str());

        let url = "y".repeat(51);
        let shown = display_url(&url);
        assert_eq!(shown, format!("{}...", "y".repeat(50)));
    }
}
