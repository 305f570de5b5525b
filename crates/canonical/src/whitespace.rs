//! Whitespace normalization.
//!
//! Collapsing happens before tokenization so that the canonical text, the
//! token stream, and any diagnostic output all agree on spacing.

/// Collapses repeated whitespace, trims edges, and normalizes newlines and
/// tabs to single spaces.
///
/// Splits on any Unicode whitespace sequence and rejoins with single ASCII
/// spaces. Returns the empty string for empty or whitespace-only input.
///
/// # Examples
///
/// ```
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello   world  "), "hello world");
/// assert_eq!(collapse_whitespace("hello\r\n\tworld"), "hello world");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
