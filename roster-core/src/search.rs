//! Substring search patterns
//!
//! All name searches compile to `column LIKE $n ESCAPE '\'`. The pattern is
//! built here so that `%`, `_` and `\` typed by a caller match literally.

/// Escape character used in every `LIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// Build a `LIKE` pattern matching any value that contains `needle`.
///
/// # Example
/// ```
/// use roster_core::like_contains;
///
/// assert_eq!(like_contains("Eng"), "%Eng%");
/// assert_eq!(like_contains("50%"), "%50\\%%");
/// assert_eq!(like_contains(""), "%%");
/// ```
pub fn like_contains(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
