//! Edit-processing orchestrator.
//!
//! One call per edit: sanitize the field text, trim and pad the fractional
//! digits, group the integer part, and relocate the caret. The caller gets
//! back the canonical raw value (safe for numeric consumption), the display
//! value, and the new caret offset. Nothing survives the call except the
//! immutable configuration and the shared separator matcher cache.

use log::{debug, trace};

use crate::caret::{compute_caret, CaretBoundary, CaretContext, CaretPositionInfo, ChangeRange};
use crate::config::{FormatOn, FormattingConfig};
use crate::group::group;
use crate::runes::rune_count;
use crate::sanitize::{decompose, sanitize};

/// Result of processing one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Display form: grouped when `format_on` is `Change`, otherwise the
    /// raw value (grouping deferred to blur).
    pub formatted: String,
    /// Canonical unformatted value.
    pub raw: String,
    /// Caret offset into `formatted`, as a rune index.
    pub caret: usize,
}

/// What the host captured around the edit: the field text as it was before
/// the keystroke, and the caret/selection state at key-press time.
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    /// The rendered field text before this edit.
    pub previous_text: &'a str,
    /// Caret/selection captured before the text mutated.
    pub caret: CaretPositionInfo,
}

/// Process one edit of the field.
///
/// `input` is the field text after the user's edit but before any
/// reformatting. Without an [`EditContext`] (programmatic value set) the
/// caret lands at the end of the formatted text.
///
/// # Examples
///
/// ```
/// use numfield_core::{pipeline::{process, EditContext}, CaretPositionInfo, FormattingConfig};
///
/// let config = FormattingConfig::default();
/// let outcome = process(
///     "1000",
///     &config,
///     Some(&EditContext {
///         previous_text: "100",
///         caret: CaretPositionInfo::collapsed(3),
///     }),
/// );
/// assert_eq!(outcome.formatted, "1,000");
/// assert_eq!(outcome.raw, "1000");
/// assert_eq!(outcome.caret, 5);
/// ```
pub fn process(
    input: &str,
    config: &FormattingConfig,
    edit: Option<&EditContext<'_>>,
) -> ProcessOutcome {
    let raw = sanitize(input, config, true);
    let raw = trim_decimals(&raw, config);
    let raw = pad_decimals(&raw, config);
    let formatted = match config.format_on() {
        FormatOn::Change => group(
            &raw,
            config.thousand_separator(),
            config.thousand_style(),
            config.enable_leading_zeros(),
            config.decimal_separator(),
        ),
        // grouping waits for blur
        FormatOn::Blur => raw.clone(),
    };

    let caret = match edit {
        None => rune_count(&formatted),
        Some(edit) => relocate_caret(input, &formatted, edit, config),
    };
    trace!(
        "process: input={:?} raw={:?} formatted={:?} caret={}",
        input,
        raw,
        formatted,
        caret
    );
    ProcessOutcome {
        formatted,
        raw,
        caret,
    }
}

/// Produce the blur-time display form: min-decimal padding plus grouping,
/// regardless of `format_on`.
pub fn format_for_blur(value: &str, config: &FormattingConfig) -> String {
    let raw = sanitize(value, config, true);
    let raw = trim_decimals(&raw, config);
    let raw = pad_decimals(&raw, config);
    group(
        &raw,
        config.thousand_separator(),
        config.thousand_style(),
        config.enable_leading_zeros(),
        config.decimal_separator(),
    )
}

fn relocate_caret(
    input: &str,
    formatted: &str,
    edit: &EditContext<'_>,
    config: &FormattingConfig,
) -> usize {
    let separator = config.thousand_separator();
    let decimal = config.decimal_separator();
    let boundary = CaretBoundary::for_text(formatted, separator);

    // a typed alternate separator that was silently normalized keeps the
    // texts the same length; map the caret through character equivalence
    if is_equivalent_rewrite(input, formatted, decimal, separator) {
        debug!("separator-normalization rewrite: {:?} -> {:?}", input, formatted);
        let grown = rune_count(input).saturating_sub(rune_count(edit.previous_text));
        let post_edit_caret = edit.caret.selection_start + grown;
        let equivalence =
            |a: char, b: char| a == b || (decimal_like(a, separator) && decimal_like(b, separator));
        let ctx = CaretContext {
            change: None,
            boundary: Some(&boundary),
            equivalence: Some(&equivalence),
        };
        return compute_caret(input, formatted, post_edit_caret, separator, decimal, &ctx);
    }

    let change = derive_change_range(edit.previous_text, input, &edit.caret);
    let ctx = CaretContext {
        change,
        boundary: Some(&boundary),
        equivalence: None,
    };
    compute_caret(
        edit.previous_text,
        formatted,
        edit.caret.selection_start,
        separator,
        decimal,
        &ctx,
    )
}

/// Reconstruct the edited span in pre-edit coordinates from the captured
/// caret state, distinguishing Delete from Backspace from insertion.
fn derive_change_range(
    previous: &str,
    input: &str,
    info: &CaretPositionInfo,
) -> Option<ChangeRange> {
    let previous_len = rune_count(previous);
    let input_len = rune_count(input);
    if info.selection_start != info.selection_end {
        return Some(ChangeRange {
            start: info.selection_start,
            end: info.selection_end,
            deleted_length: info.selection_end - info.selection_start,
            is_delete: false,
        });
    }
    if let Some(offset) = info.end_offset {
        // forward-Delete: the caret holds its ground
        return Some(ChangeRange {
            start: info.selection_start,
            end: info.selection_start + offset,
            deleted_length: offset,
            is_delete: true,
        });
    }
    if input_len < previous_len {
        // Backspace: the deleted span ends at the caret
        let deleted = previous_len - input_len;
        return Some(ChangeRange {
            start: info.selection_start.saturating_sub(deleted),
            end: info.selection_start,
            deleted_length: deleted,
            is_delete: false,
        });
    }
    if input_len > previous_len {
        return Some(ChangeRange {
            start: info.selection_start,
            end: info.selection_start,
            deleted_length: 0,
            is_delete: false,
        });
    }
    None
}

/// Truncate fractional digits beyond `decimal_max_length`. A bare trailing
/// separator is left untouched so the user can keep typing after it.
fn trim_decimals(value: &str, config: &FormattingConfig) -> String {
    let decimal = config.decimal_separator();
    let max = config.decimal_max_length();
    let parts = decompose(value, decimal);
    let frac_len = parts.fraction.chars().count();
    if !value.chars().any(|c| c == decimal) || frac_len <= max {
        return value.to_string();
    }
    let kept: String = parts.fraction.chars().take(max).collect();
    if kept.is_empty() {
        // the fraction had digits and none survive; drop the separator too
        return format!("{}{}", parts.sign, parts.integer);
    }
    format!("{}{}{}{}", parts.sign, parts.integer, decimal, kept)
}

/// Pad the fraction with trailing zeros up to `decimal_min_length`. Values
/// without any digit (empty, lone sign) are left alone.
fn pad_decimals(value: &str, config: &FormattingConfig) -> String {
    let min = config.decimal_min_length();
    if min == 0 || !value.chars().any(|c| c.is_ascii_digit()) {
        return value.to_string();
    }
    let decimal = config.decimal_separator();
    let parts = decompose(value, decimal);
    let frac_len = parts.fraction.chars().count();
    if frac_len >= min {
        return value.to_string();
    }
    let zeros = "0".repeat(min - frac_len);
    format!(
        "{}{}{}{}{}",
        parts.sign, parts.integer, decimal, parts.fraction, zeros
    )
}

fn decimal_like(c: char, thousand: char) -> bool {
    (c == '.' || c == ',') && c != thousand
}

/// Same length, different content, and every character pair equivalent:
/// the rewrite only normalized separators.
fn is_equivalent_rewrite(input: &str, formatted: &str, decimal: char, thousand: char) -> bool {
    if input == formatted || rune_count(input) != rune_count(formatted) {
        return false;
    }
    input.chars().zip(formatted.chars()).all(|(a, b)| {
        a == b
            || ((a == decimal || decimal_like(a, thousand))
                && (b == decimal || decimal_like(b, thousand)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FormatOn, FormattingConfig, ThousandStyle};

    fn keystroke(previous: &str, caret: usize) -> EditContext<'_> {
        EditContext {
            previous_text: previous,
            caret: CaretPositionInfo::collapsed(caret),
        }
    }

    #[test]
    fn test_typing_digit_at_end() {
        let config = FormattingConfig::default();
        let outcome = process("1000", &config, Some(&keystroke("100", 3)));
        assert_eq!(outcome.formatted, "1,000");
        assert_eq!(outcome.raw, "1000");
        assert_eq!(outcome.caret, 5);
    }

    #[test]
    fn test_typing_digit_mid_text() {
        let config = FormattingConfig::default();
        // "10|0" -> type '5' -> "1,050" with the caret after the '5'
        let outcome = process("1050", &config, Some(&keystroke("100", 2)));
        assert_eq!(outcome.formatted, "1,050");
        assert_eq!(outcome.caret, 4);
    }

    #[test]
    fn test_backspace_digit_after_separator() {
        let config = FormattingConfig::default();
        // "1,2|34" -> backspace the '2' -> "134", caret after the '1'
        let outcome = process("1,34", &config, Some(&keystroke("1,234", 3)));
        assert_eq!(outcome.formatted, "134");
        assert_eq!(outcome.raw, "134");
        assert_eq!(outcome.caret, 1);
    }

    #[test]
    fn test_forward_delete_holds_ground() {
        let config = FormattingConfig::default();
        let edit = EditContext {
            previous_text: "1,234",
            caret: CaretPositionInfo::forward_delete(2),
        };
        // "1,|234" -> Delete removes the '2'
        let outcome = process("1,34", &config, Some(&edit));
        assert_eq!(outcome.formatted, "134");
        assert_eq!(outcome.caret, 1);
    }

    #[test]
    fn test_selection_replace() {
        let config = FormattingConfig::default();
        let edit = EditContext {
            previous_text: "1,234",
            caret: CaretPositionInfo::selection(2, 5),
        };
        // "1,[234]" replaced by '9'
        let outcome = process("1,9", &config, Some(&edit));
        assert_eq!(outcome.formatted, "19");
        assert_eq!(outcome.caret, 1);
    }

    #[test]
    fn test_compact_paste_into_empty() {
        let config = FormattingConfig::default();
        let outcome = process("1.5k", &config, Some(&keystroke("", 0)));
        assert_eq!(outcome.raw, "1500");
        assert_eq!(outcome.formatted, "1,500");
        assert_eq!(outcome.caret, 5);
    }

    #[test]
    fn test_compact_suffix_typed_at_end() {
        let config = FormattingConfig::default();
        // "2.5678|" -> type 'm'
        let outcome = process("2.5678m", &config, Some(&keystroke("2.5678", 6)));
        assert_eq!(outcome.raw, "2567800");
        assert_eq!(outcome.formatted, "2,567,800");
        assert_eq!(outcome.caret, 9);
    }

    #[test]
    fn test_alternate_decimal_normalized_keeps_caret() {
        let config = FormattingConfig::builder()
            .decimal_separator(',')
            .thousand_separator(' ')
            .build()
            .unwrap();
        // "12|" -> type '.' which normalizes to ','
        let outcome = process("12.", &config, Some(&keystroke("12", 2)));
        assert_eq!(outcome.formatted, "12,");
        assert_eq!(outcome.raw, "12,");
        assert_eq!(outcome.caret, 3);
    }

    #[test]
    fn test_programmatic_set_puts_caret_at_end() {
        let config = FormattingConfig::default();
        let outcome = process("1234567", &config, None);
        assert_eq!(outcome.formatted, "1,234,567");
        assert_eq!(outcome.caret, 9);
    }

    #[test]
    fn test_blur_mode_defers_grouping() {
        let config = FormattingConfig::builder()
            .format_on(FormatOn::Blur)
            .build()
            .unwrap();
        let outcome = process("1234", &config, Some(&keystroke("123", 3)));
        assert_eq!(outcome.formatted, "1234");
        assert_eq!(outcome.raw, "1234");
        assert_eq!(format_for_blur(&outcome.raw, &config), "1,234");
    }

    #[test]
    fn test_lakh_grouping_through_pipeline() {
        let config = FormattingConfig::builder()
            .thousand_style(ThousandStyle::Lakh)
            .build()
            .unwrap();
        let outcome = process("1234567", &config, None);
        assert_eq!(outcome.formatted, "12,34,567");
    }

    #[test]
    fn test_decimal_trim_and_pad() {
        let config = FormattingConfig::builder()
            .decimal_max_length(2)
            .build()
            .unwrap();
        let outcome = process("1.23456", &config, None);
        assert_eq!(outcome.raw, "1.23");

        let config = FormattingConfig::builder()
            .decimal_min_length(2)
            .build()
            .unwrap();
        let outcome = process("5", &config, None);
        assert_eq!(outcome.raw, "5.00");
        assert_eq!(outcome.formatted, "5.00");
    }

    #[test]
    fn test_trim_keeps_bare_separator() {
        let config = FormattingConfig::builder()
            .decimal_max_length(0)
            .build()
            .unwrap();
        let outcome = process("12.", &config, None);
        assert_eq!(outcome.raw, "12.");
        let outcome = process("12.5", &config, None);
        assert_eq!(outcome.raw, "12");
    }

    #[test]
    fn test_invalid_keystroke_keeps_value_and_caret() {
        let config = FormattingConfig::default();
        // "1|00" -> type 'x', which sanitizes away
        let outcome = process("1x00", &config, Some(&keystroke("100", 1)));
        assert_eq!(outcome.formatted, "100");
        assert_eq!(outcome.caret, 1);
    }

    #[test]
    fn test_derive_change_range() {
        // selection replace
        let info = CaretPositionInfo::selection(1, 4);
        let range = derive_change_range("1,234", "19", &info).unwrap();
        assert_eq!((range.start, range.end, range.is_delete), (1, 4, false));

        // forward delete
        let info = CaretPositionInfo::forward_delete(2);
        let range = derive_change_range("1,234", "1,34", &info).unwrap();
        assert_eq!((range.start, range.end, range.is_delete), (2, 3, true));

        // backspace
        let info = CaretPositionInfo::collapsed(3);
        let range = derive_change_range("1,234", "1,34", &info).unwrap();
        assert_eq!((range.start, range.end, range.is_delete), (2, 3, false));

        // plain insertion
        let info = CaretPositionInfo::collapsed(3);
        let range = derive_change_range("100", "1000", &info).unwrap();
        assert_eq!((range.start, range.deleted_length), (3, 0));

        // no edit
        let info = CaretPositionInfo::collapsed(1);
        assert_eq!(derive_change_range("100", "100", &info), None);
    }
}
