//! Process-wide cache of compiled separator matchers.
//!
//! Stripping a grouping separator happens on every keystroke of every field,
//! so the per-separator matcher is compiled once and shared. The cache is
//! keyed by the separator character, populated lazily, and never evicted;
//! entries are immutable once inserted so concurrent readers across
//! independent fields are safe. The cache sits behind [`separator_matcher`]
//! so it could be swapped for a bounded cache without touching callers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// A compiled matcher for one separator character.
///
/// Compilation precomputes an ASCII lookup table; the common separators
/// (`,`, `.`, `'`, space) all take the table path.
#[derive(Debug)]
pub struct SeparatorMatcher {
    separator: char,
    ascii: [bool; 128],
}

impl SeparatorMatcher {
    fn compile(separator: char) -> Self {
        let mut ascii = [false; 128];
        if (separator as u32) < 128 {
            ascii[separator as usize] = true;
        }
        SeparatorMatcher { separator, ascii }
    }

    /// The separator character this matcher was compiled for.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Test a single character.
    #[inline]
    pub fn is_match(&self, c: char) -> bool {
        if (c as u32) < 128 {
            self.ascii[c as usize]
        } else {
            c == self.separator
        }
    }

    /// Remove every occurrence of the separator from `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use numfield_core::matcher::separator_matcher;
    ///
    /// let matcher = separator_matcher(',');
    /// assert_eq!(matcher.strip("1,234,567"), "1234567");
    /// ```
    pub fn strip(&self, text: &str) -> String {
        text.chars().filter(|&c| !self.is_match(c)).collect()
    }
}

static MATCHERS: OnceLock<Mutex<HashMap<char, Arc<SeparatorMatcher>>>> = OnceLock::new();

/// Get the shared matcher for `separator`, compiling it on first use.
pub fn separator_matcher(separator: char) -> Arc<SeparatorMatcher> {
    let cache = MATCHERS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut map = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    map.entry(separator)
        .or_insert_with(|| Arc::new(SeparatorMatcher::compile(separator)))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip() {
        let matcher = separator_matcher(',');
        assert_eq!(matcher.strip("1,234,567"), "1234567");
        assert_eq!(matcher.strip("no separators"), "no separators");
        assert_eq!(matcher.strip(""), "");
    }

    #[test]
    fn test_non_ascii_separator() {
        let matcher = separator_matcher('\u{00A0}');
        assert!(matcher.is_match('\u{00A0}'));
        assert!(!matcher.is_match(' '));
        assert_eq!(matcher.strip("1\u{00A0}234"), "1234");
    }

    #[test]
    fn test_cache_returns_same_entry() {
        let a = separator_matcher('.');
        let b = separator_matcher('.');
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.separator(), '.');
    }
}
