//! Formatting configuration for a single input session.
//!
//! A [`FormattingConfig`] is created once per input field and is immutable
//! afterwards; replacing the configuration means starting a new session.
//! All validation happens at construction time so that per-keystroke
//! processing never has to deal with a malformed configuration.

use crate::error::{ConfigError, ConfigResult};

/// Digit-clustering convention applied to the integer part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThousandStyle {
    /// No grouping.
    None,
    /// Western groups of three: `1,234,567`.
    Thousand,
    /// Indian grouping, three then twos: `12,34,567`.
    Lakh,
    /// Chinese grouping, groups of four: `123,4567`.
    Wan,
}

/// When the grouped display form is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatOn {
    /// Group only when the field loses focus.
    Blur,
    /// Group on every keystroke.
    Change,
}

/// Immutable per-field formatting configuration.
///
/// Construct through [`FormattingConfig::builder`]; the builder validates
/// the separator pair and decimal lengths and rejects invalid combinations
/// with a [`ConfigError`].
///
/// # Examples
///
/// ```
/// use numfield_core::{FormattingConfig, ThousandStyle};
///
/// let config = FormattingConfig::builder()
///     .decimal_separator(',')
///     .thousand_separator('.')
///     .thousand_style(ThousandStyle::Thousand)
///     .build()
///     .unwrap();
/// assert_eq!(config.decimal_separator(), ',');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormattingConfig {
    decimal_separator: char,
    thousand_separator: char,
    thousand_style: ThousandStyle,
    decimal_max_length: usize,
    decimal_min_length: usize,
    enable_compact_notation: bool,
    enable_negative: bool,
    enable_leading_zeros: bool,
    format_on: FormatOn,
}

impl FormattingConfig {
    /// Start building a configuration from the defaults: `.` decimal, `,`
    /// thousand, western grouping, compact notation and negatives enabled,
    /// leading zeros stripped, formatting on every change.
    pub fn builder() -> FormattingConfigBuilder {
        FormattingConfigBuilder::new()
    }

    /// The single character that separates integer and fractional digits.
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// The single character inserted between digit groups.
    pub fn thousand_separator(&self) -> char {
        self.thousand_separator
    }

    /// The grouping convention for the integer part.
    pub fn thousand_style(&self) -> ThousandStyle {
        self.thousand_style
    }

    /// Maximum number of fractional digits kept after sanitization.
    pub fn decimal_max_length(&self) -> usize {
        self.decimal_max_length
    }

    /// Minimum number of fractional digits; shorter fractions are padded
    /// with trailing zeros.
    pub fn decimal_min_length(&self) -> usize {
        self.decimal_min_length
    }

    /// Whether `k`/`m`/`b`/`t` style suffixes are expanded.
    pub fn enable_compact_notation(&self) -> bool {
        self.enable_compact_notation
    }

    /// Whether a leading `-` is accepted.
    pub fn enable_negative(&self) -> bool {
        self.enable_negative
    }

    /// Whether leading zeros in the integer part are preserved.
    pub fn enable_leading_zeros(&self) -> bool {
        self.enable_leading_zeros
    }

    /// When the grouped display form is produced.
    pub fn format_on(&self) -> FormatOn {
        self.format_on
    }
}

impl Default for FormattingConfig {
    fn default() -> Self {
        // defaults need no validation
        FormattingConfigBuilder::new().config
    }
}

/// Builder for [`FormattingConfig`].
#[derive(Debug, Clone)]
pub struct FormattingConfigBuilder {
    config: FormattingConfig,
}

impl FormattingConfigBuilder {
    fn new() -> Self {
        FormattingConfigBuilder {
            config: FormattingConfig {
                decimal_separator: '.',
                thousand_separator: ',',
                thousand_style: ThousandStyle::Thousand,
                decimal_max_length: 30,
                decimal_min_length: 0,
                enable_compact_notation: true,
                enable_negative: true,
                enable_leading_zeros: false,
                format_on: FormatOn::Change,
            },
        }
    }

    /// Set the decimal separator character.
    pub fn decimal_separator(mut self, separator: char) -> Self {
        self.config.decimal_separator = separator;
        self
    }

    /// Set the thousand separator character.
    pub fn thousand_separator(mut self, separator: char) -> Self {
        self.config.thousand_separator = separator;
        self
    }

    /// Set the grouping style.
    pub fn thousand_style(mut self, style: ThousandStyle) -> Self {
        self.config.thousand_style = style;
        self
    }

    /// Set the maximum number of fractional digits.
    pub fn decimal_max_length(mut self, max: usize) -> Self {
        self.config.decimal_max_length = max;
        self
    }

    /// Set the minimum number of fractional digits (zero-padded).
    pub fn decimal_min_length(mut self, min: usize) -> Self {
        self.config.decimal_min_length = min;
        self
    }

    /// Enable or disable compact suffix expansion (`1.5k` -> `1500`).
    pub fn enable_compact_notation(mut self, enabled: bool) -> Self {
        self.config.enable_compact_notation = enabled;
        self
    }

    /// Enable or disable negative values.
    pub fn enable_negative(mut self, enabled: bool) -> Self {
        self.config.enable_negative = enabled;
        self
    }

    /// Enable or disable preservation of leading integer zeros.
    pub fn enable_leading_zeros(mut self, enabled: bool) -> Self {
        self.config.enable_leading_zeros = enabled;
        self
    }

    /// Set when the grouped display form is produced.
    pub fn format_on(mut self, format_on: FormatOn) -> Self {
        self.config.format_on = format_on;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> ConfigResult<FormattingConfig> {
        let config = self.config;
        for separator in [config.decimal_separator, config.thousand_separator] {
            if separator.is_ascii_digit() || matches!(separator, '-' | '+' | 'e' | 'E') {
                return Err(ConfigError::InvalidSeparator { separator });
            }
        }
        if config.decimal_separator == config.thousand_separator {
            return Err(ConfigError::SeparatorConflict {
                separator: config.decimal_separator,
            });
        }
        if config.decimal_min_length > config.decimal_max_length {
            return Err(ConfigError::InvalidDecimalLengths {
                min: config.decimal_min_length,
                max: config.decimal_max_length,
            });
        }
        Ok(config)
    }
}
