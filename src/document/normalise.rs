//! Text normalisation for indexing and search.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of whitespace collapsed to a single space
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalise text for the search index.
///
/// Lowercases, drops every character that is neither alphanumeric nor
/// whitespace, collapses whitespace runs to one space and trims. Blank input
/// gives an empty string.
///
/// # Examples
///
/// ```
/// use alto_text::document::normalise;
///
/// assert_eq!(normalise("  The Cat's\tHat! "), "the cats hat");
/// assert_eq!(normalise("--"), "");
/// ```
pub fn normalise(s: &str) -> String {
    if s.trim().is_empty() {
        return String::new();
    }
    let kept: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    RE_WHITESPACE.replace_all(kept.trim(), " ").into_owned()
}
