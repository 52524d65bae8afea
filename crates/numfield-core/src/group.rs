//! Thousand grouping for the integer part of a numeric string.
//!
//! Grouping is presentation only: [`strip_separators`] is an exact left
//! inverse of [`group`], so stripping a grouped value always reproduces the
//! ungrouped digits.

use crate::config::ThousandStyle;
use crate::matcher;
use crate::sanitize::decompose;

/// Insert grouping separators into the integer part of `value`.
///
/// The fractional side is never grouped. A trailing decimal separator with
/// no fractional digits is preserved so the user can keep typing after it.
/// With `preserve_leading_zeros`, leading integer zeros are kept verbatim
/// and only the significant digits after them are grouped.
///
/// # Examples
///
/// ```
/// use numfield_core::{group::group, ThousandStyle};
///
/// assert_eq!(group("1234567", ',', ThousandStyle::Thousand, false, '.'), "1,234,567");
/// assert_eq!(group("1234567", ',', ThousandStyle::Lakh, false, '.'), "12,34,567");
/// assert_eq!(group("123456789", ',', ThousandStyle::Wan, false, '.'), "1,2345,6789");
/// assert_eq!(group("1234.56", ',', ThousandStyle::Thousand, false, '.'), "1,234.56");
/// ```
pub fn group(
    value: &str,
    separator: char,
    style: ThousandStyle,
    preserve_leading_zeros: bool,
    decimal: char,
) -> String {
    // degenerate values are returned unchanged
    if value.is_empty() || value == "0" || value == "-" {
        return value.to_string();
    }
    let parts = decompose(value, decimal);
    let has_decimal = value.chars().any(|c| c == decimal);
    if parts.integer.is_empty() {
        // bare separator, sign+separator, or a fraction-only value
        return value.to_string();
    }

    let (zeros, significant) = if preserve_leading_zeros {
        let significant = parts.integer.trim_start_matches('0');
        let zero_count = parts.integer.len() - significant.len();
        (&parts.integer[..zero_count], significant)
    } else {
        ("", parts.integer)
    };

    let mut out = String::with_capacity(value.len() + value.len() / 3);
    out.push_str(parts.sign);
    out.push_str(zeros);
    out.push_str(&group_integer(significant, separator, style));
    if has_decimal {
        out.push(decimal);
        out.push_str(parts.fraction);
    }
    out
}

/// Remove every occurrence of `separator` from `value`.
///
/// Exact inverse of [`group`]: `strip_separators(group(d, ..), ..) == d`.
pub fn strip_separators(value: &str, separator: char) -> String {
    matcher::separator_matcher(separator).strip(value)
}

fn group_integer(digits: &str, separator: char, style: ThousandStyle) -> String {
    match style {
        ThousandStyle::None => digits.to_string(),
        ThousandStyle::Thousand => group_fixed(digits, 3, separator),
        ThousandStyle::Wan => group_fixed(digits, 4, separator),
        ThousandStyle::Lakh => group_lakh(digits, separator),
    }
}

/// Fixed-size groups counted from the right.
fn group_fixed(digits: &str, size: usize, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / size);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % size == 0 {
            out.push(separator);
        }
        out.push(*c);
    }
    out
}

/// Indian style: one group of three from the right, then groups of two.
fn group_lakh(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    if len <= 3 {
        return digits.to_string();
    }
    let split = digits
        .char_indices()
        .nth(len - 3)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let (head, tail) = digits.split_at(split);
    let mut out = group_fixed(head, 2, separator);
    out.push(separator);
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousand_style() {
        assert_eq!(group("1", ',', ThousandStyle::Thousand, false, '.'), "1");
        assert_eq!(group("123", ',', ThousandStyle::Thousand, false, '.'), "123");
        assert_eq!(group("1234", ',', ThousandStyle::Thousand, false, '.'), "1,234");
        assert_eq!(
            group("1234567", ',', ThousandStyle::Thousand, false, '.'),
            "1,234,567"
        );
    }

    #[test]
    fn test_lakh_style() {
        assert_eq!(group("123", ',', ThousandStyle::Lakh, false, '.'), "123");
        assert_eq!(group("1234", ',', ThousandStyle::Lakh, false, '.'), "1,234");
        assert_eq!(group("123456", ',', ThousandStyle::Lakh, false, '.'), "1,23,456");
        assert_eq!(
            group("1234567", ',', ThousandStyle::Lakh, false, '.'),
            "12,34,567"
        );
    }

    #[test]
    fn test_wan_style() {
        assert_eq!(group("1234", ',', ThousandStyle::Wan, false, '.'), "1234");
        assert_eq!(group("12345", ',', ThousandStyle::Wan, false, '.'), "1,2345");
        assert_eq!(
            group("123456789", ',', ThousandStyle::Wan, false, '.'),
            "1,2345,6789"
        );
    }

    #[test]
    fn test_none_style() {
        assert_eq!(group("1234567", ',', ThousandStyle::None, false, '.'), "1234567");
    }

    #[test]
    fn test_degenerate_values_unchanged() {
        for value in ["", "0", "-", ".", "-."] {
            assert_eq!(
                group(value, ',', ThousandStyle::Thousand, false, '.'),
                value
            );
        }
    }

    #[test]
    fn test_fractional_side_untouched() {
        assert_eq!(
            group("1234.5678", ',', ThousandStyle::Thousand, false, '.'),
            "1,234.5678"
        );
        assert_eq!(group(".5678", ',', ThousandStyle::Thousand, false, '.'), ".5678");
    }

    #[test]
    fn test_trailing_separator_preserved() {
        assert_eq!(group("1234.", ',', ThousandStyle::Thousand, false, '.'), "1,234.");
    }

    #[test]
    fn test_sign_preserved() {
        assert_eq!(
            group("-1234567", ',', ThousandStyle::Thousand, false, '.'),
            "-1,234,567"
        );
    }

    #[test]
    fn test_preserve_leading_zeros() {
        assert_eq!(
            group("0001234", ',', ThousandStyle::Thousand, true, '.'),
            "0001,234"
        );
        assert_eq!(group("0000", ',', ThousandStyle::Thousand, true, '.'), "0000");
        assert_eq!(group("0007", ',', ThousandStyle::Thousand, true, '.'), "0007");
    }

    #[test]
    fn test_strip_is_left_inverse() {
        for digits in ["1", "12", "123", "1234", "123456789012345", "0", "1234.5678"] {
            for style in [
                ThousandStyle::Thousand,
                ThousandStyle::Lakh,
                ThousandStyle::Wan,
                ThousandStyle::None,
            ] {
                let grouped = group(digits, ',', style, false, '.');
                assert_eq!(strip_separators(&grouped, ','), *digits, "style {:?}", style);
            }
        }
    }

    #[test]
    fn test_reformat_idempotent() {
        let grouped = group("1234567", ',', ThousandStyle::Thousand, false, '.');
        let regrouped = group(
            &strip_separators(&grouped, ','),
            ',',
            ThousandStyle::Thousand,
            false,
            '.',
        );
        assert_eq!(regrouped, grouped);
    }
}
