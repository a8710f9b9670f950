//! Helpers for building SQL `LIKE` patterns from untrusted input.

/// Escape character used with `LIKE ... ESCAPE '\'`.
pub const LIKE_ESCAPE: char = '\\';

/// Escape `LIKE` metacharacters (`%`, `_`, and the escape itself) so that
/// `input` matches only literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Pattern matching any value that starts with `prefix` literally.
pub fn prefix_pattern(prefix: &str) -> String {
    format!("{}%", escape_like(prefix))
}
