//! Common text helpers shared by the parsers and the CSV sink

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Trim and collapse every whitespace run (newlines included) into one space.
///
/// Applying it twice yields the same string as applying it once.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// First `max_chars` characters of `text` (characters, not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
