//! Free-form text to canonical numeric string.
//!
//! The sanitizer is an ordered pipeline of total stages: strip invisible
//! whitespace, drop grouping separators, expand compact then scientific
//! notation, filter invalid characters, enforce a single decimal separator,
//! and strip leading zeros. Every stage degrades to best-effort output on
//! malformed input; none of them can fail.

use crate::config::FormattingConfig;
use crate::matcher;
use crate::notation;

/// Invisible code points some mobile keyboards insert around digits.
const INVISIBLE_CHARS: &[char] = &[
    '\u{00A0}', // no-break space
    '\u{2007}', // figure space
    '\u{202F}', // narrow no-break space
    '\u{200B}', // zero width space
    '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}',
];

/// Decomposition of a sanitized numeric string.
///
/// `fraction` excludes the separator itself; an empty `fraction` with a
/// trailing separator in the source means the user just typed the separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericParts<'a> {
    /// `"-"` or `""`.
    pub sign: &'a str,
    /// Digits before the decimal separator.
    pub integer: &'a str,
    /// Digits after the decimal separator.
    pub fraction: &'a str,
}

/// Split a numeric string into sign, integer, and fractional digits.
///
/// # Examples
///
/// ```
/// use numfield_core::sanitize::decompose;
///
/// let parts = decompose("-12.34", '.');
/// assert_eq!(parts.sign, "-");
/// assert_eq!(parts.integer, "12");
/// assert_eq!(parts.fraction, "34");
/// ```
pub fn decompose(value: &str, decimal: char) -> NumericParts<'_> {
    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    match rest.char_indices().find(|&(_, c)| c == decimal) {
        Some((idx, c)) => NumericParts {
            sign,
            integer: &rest[..idx],
            fraction: &rest[idx + c.len_utf8()..],
        },
        None => NumericParts {
            sign,
            integer: rest,
            fraction: "",
        },
    }
}

/// Convert arbitrary input text into a canonical numeric string.
///
/// `strip_grouping` tells the sanitizer the text may already carry the
/// configured thousand separator (a reformatted field value, or a paste of
/// a formatted number); the separator is presentation, not data, and is
/// removed before expansion runs.
///
/// # Examples
///
/// ```
/// use numfield_core::{sanitize::sanitize, FormattingConfig};
///
/// let config = FormattingConfig::default();
/// assert_eq!(sanitize("1,234.50", &config, true), "1234.50");
/// assert_eq!(sanitize("1.5k", &config, true), "1500");
/// assert_eq!(sanitize("$ 12a", &config, true), "12");
/// ```
pub fn sanitize(input: &str, config: &FormattingConfig, strip_grouping: bool) -> String {
    let decimal = config.decimal_separator();
    let thousand = config.thousand_separator();

    // stage 1: invisible whitespace from mobile keyboards
    let mut value: String = input.chars().filter(|c| !INVISIBLE_CHARS.contains(c)).collect();

    // stage 2: grouping separators are presentation, not data
    if strip_grouping {
        value = matcher::separator_matcher(thousand).strip(&value);
    }

    // stage 3: compact suffixes, when enabled
    if config.enable_compact_notation() {
        value = notation::expand_compact(&value, decimal);
    }

    // stage 4: scientific notation, always
    value = notation::expand_scientific(&value, decimal);

    // stages 5 and 6: keep digits, one canonical decimal separator, and a
    // single leading sign; typed alternate separators normalize to the
    // canonical one, later separators are discarded from the tail
    let mut out = String::with_capacity(value.len());
    let mut seen_decimal = false;
    for c in value.chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if is_decimal_like(c, decimal, thousand) {
            if !seen_decimal {
                out.push(decimal);
                seen_decimal = true;
            }
        } else if c == '-' && out.is_empty() && config.enable_negative() {
            out.push('-');
        }
    }

    // stage 7: leading integer zeros
    if !config.enable_leading_zeros() {
        out = strip_leading_zeros(&out, decimal);
    }
    out
}

/// A character the user plausibly meant as the decimal separator. The
/// configured thousand separator never qualifies.
fn is_decimal_like(c: char, decimal: char, thousand: char) -> bool {
    c == decimal || ((c == '.' || c == ',') && c != thousand)
}

/// Strip leading zeros from the integer part only. A lone `0` integer and
/// all fractional zeros are preserved.
fn strip_leading_zeros(value: &str, decimal: char) -> String {
    let parts = decompose(value, decimal);
    let trimmed = parts.integer.trim_start_matches('0');
    let integer = if trimmed.is_empty() && !parts.integer.is_empty() {
        "0"
    } else {
        trimmed
    };
    let mut out = String::with_capacity(value.len());
    out.push_str(parts.sign);
    out.push_str(integer);
    if value.chars().any(|c| c == decimal) {
        out.push(decimal);
        out.push_str(parts.fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormattingConfig;

    fn default_config() -> FormattingConfig {
        FormattingConfig::default()
    }

    #[test]
    fn test_decompose() {
        let parts = decompose("12.34", '.');
        assert_eq!((parts.sign, parts.integer, parts.fraction), ("", "12", "34"));

        let parts = decompose("-5", '.');
        assert_eq!((parts.sign, parts.integer, parts.fraction), ("-", "5", ""));

        let parts = decompose(".5", '.');
        assert_eq!((parts.sign, parts.integer, parts.fraction), ("", "", "5"));

        let parts = decompose("7.", '.');
        assert_eq!((parts.sign, parts.integer, parts.fraction), ("", "7", ""));

        let parts = decompose("", '.');
        assert_eq!((parts.sign, parts.integer, parts.fraction), ("", "", ""));
    }

    #[test]
    fn test_invisible_whitespace_removed() {
        let config = default_config();
        assert_eq!(sanitize("1\u{00A0}234", &config, true), "1234");
        assert_eq!(sanitize("\u{200B}12\u{FEFF}", &config, true), "12");
    }

    #[test]
    fn test_grouping_separators_removed() {
        let config = default_config();
        assert_eq!(sanitize("1,234,567", &config, true), "1234567");
        // without the hint, separators are still not data
        assert_eq!(sanitize("1,234", &config, false), "1234");
    }

    #[test]
    fn test_expansion_stages() {
        let config = default_config();
        assert_eq!(sanitize("1.5k", &config, true), "1500");
        assert_eq!(sanitize("1.5e-7", &config, true), "0.00000015");
        assert_eq!(sanitize("2e5", &config, true), "200000");
    }

    #[test]
    fn test_compact_disabled() {
        let config = FormattingConfig::builder()
            .enable_compact_notation(false)
            .build()
            .unwrap();
        // the suffix is just an invalid character now
        assert_eq!(sanitize("1.5k", &config, true), "1.5");
    }

    #[test]
    fn test_invalid_characters_removed() {
        let config = default_config();
        assert_eq!(sanitize("$ 1a2b3", &config, true), "123");
        assert_eq!(sanitize("abc", &config, true), "");
        assert_eq!(sanitize("", &config, true), "");
    }

    #[test]
    fn test_single_decimal_separator() {
        let config = default_config();
        assert_eq!(sanitize("1.2.3", &config, true), "1.23");
        assert_eq!(sanitize("..5", &config, true), ".5");
        assert_eq!(sanitize("1.", &config, true), "1.");
    }

    #[test]
    fn test_alternate_decimal_normalized() {
        let config = FormattingConfig::builder()
            .decimal_separator(',')
            .thousand_separator('.')
            .build()
            .unwrap();
        // '.' is the thousand separator here, so it is presentation
        assert_eq!(sanitize("1.234,5", &config, true), "1234,5");
        // with a space for grouping, a typed '.' means the decimal point
        let config = FormattingConfig::builder()
            .decimal_separator(',')
            .thousand_separator(' ')
            .build()
            .unwrap();
        assert_eq!(sanitize("12.5", &config, true), "12,5");
    }

    #[test]
    fn test_negative_handling() {
        let config = default_config();
        assert_eq!(sanitize("-12", &config, true), "-12");
        assert_eq!(sanitize("--12", &config, true), "-12");
        assert_eq!(sanitize("1-2", &config, true), "12");
        assert_eq!(sanitize("-", &config, true), "-");

        let config = FormattingConfig::builder()
            .enable_negative(false)
            .build()
            .unwrap();
        assert_eq!(sanitize("-12", &config, true), "12");
    }

    #[test]
    fn test_leading_zeros() {
        let config = default_config();
        assert_eq!(sanitize("007", &config, true), "7");
        assert_eq!(sanitize("000", &config, true), "0");
        assert_eq!(sanitize("0.50", &config, true), "0.50");
        assert_eq!(sanitize("00.5", &config, true), "0.5");
        assert_eq!(sanitize("-007", &config, true), "-7");

        let config = FormattingConfig::builder()
            .enable_leading_zeros(true)
            .build()
            .unwrap();
        assert_eq!(sanitize("007", &config, true), "007");
    }
}
