//! Error types for formatting configuration.
//!
//! Only configuration construction can fail. Sanitization, expansion,
//! grouping, and caret computation are total over their input domain and
//! degrade to a safe default instead of returning errors, so a keystroke can
//! never crash the pipeline.

use std::fmt;

/// Errors that can occur while constructing a formatting configuration.
///
/// These are programmer errors and are surfaced synchronously at
/// construction time, never during per-keystroke processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The thousand separator and the decimal separator are the same character.
    SeparatorConflict { separator: char },
    /// A separator character that would be consumed as numeric data
    /// (a digit, a sign, or an exponent marker).
    InvalidSeparator { separator: char },
    /// `decimal_min_length` exceeds `decimal_max_length`, so padding could
    /// never survive trimming.
    InvalidDecimalLengths { min: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SeparatorConflict { separator } => {
                write!(
                    f,
                    "Thousand and decimal separators are both {:?}",
                    separator
                )
            }
            ConfigError::InvalidSeparator { separator } => {
                write!(f, "Invalid separator character {:?}", separator)
            }
            ConfigError::InvalidDecimalLengths { min, max } => {
                write!(f, "decimal_min_length {} exceeds decimal_max_length {}", min, max)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
