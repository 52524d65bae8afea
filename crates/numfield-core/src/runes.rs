//! Rune-index helpers for caret arithmetic.
//!
//! Every caret offset in this crate is a rune index (character count), never
//! a byte index. These helpers cover the conversions a host binding needs
//! when its own text API is byte-addressed.

/// Count the number of Unicode characters (runes) in a string.
///
/// # Examples
///
/// ```
/// use numfield_core::runes::rune_count;
///
/// assert_eq!(rune_count("1,234"), 5);
/// assert_eq!(rune_count("1\u{00A0}234"), 5); // no-break space is one rune
/// ```
pub fn rune_count(s: &str) -> usize {
    s.chars().count()
}

/// Get the character at a specific rune index.
///
/// Returns `None` if the index is out of bounds.
pub fn char_at_rune_index(s: &str, index: usize) -> Option<char> {
    s.chars().nth(index)
}

/// Convert a rune index to a byte index.
///
/// Useful when the host text field is byte-addressed but caret positions
/// from this crate are rune-based. Indices past the end map to `s.len()`.
///
/// # Examples
///
/// ```
/// use numfield_core::runes::byte_index_from_rune_index;
///
/// assert_eq!(byte_index_from_rune_index("1,5", 2), 2);
/// assert_eq!(byte_index_from_rune_index("1٫5", 2), 3); // U+066B is 2 bytes
/// ```
pub fn byte_index_from_rune_index(s: &str, rune_index: usize) -> usize {
    s.char_indices()
        .nth(rune_index)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rune_count() {
        assert_eq!(rune_count(""), 0);
        assert_eq!(rune_count("1234"), 4);
        assert_eq!(rune_count("-1٫5"), 4);
    }

    #[test]
    fn test_char_at_rune_index() {
        assert_eq!(char_at_rune_index("1,234", 1), Some(','));
        assert_eq!(char_at_rune_index("1,234", 5), None);
        assert_eq!(char_at_rune_index("", 0), None);
    }

    #[test]
    fn test_byte_index_from_rune_index() {
        assert_eq!(byte_index_from_rune_index("1234", 2), 2);
        assert_eq!(byte_index_from_rune_index("1234", 10), 4);
        assert_eq!(byte_index_from_rune_index("1٫5", 1), 1);
        assert_eq!(byte_index_from_rune_index("1٫5", 2), 3);
    }
}
