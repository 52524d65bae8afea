//! Numeric Field Core Library
//!
//! This crate provides the core functionality for formatting numeric input
//! fields: sanitizing free-form text into a canonical numeric string,
//! expanding scientific and compact notation, grouping the integer part with
//! locale-style separators, and relocating the caret across reformats. It is
//! host-agnostic; the embedding UI feeds it text and caret state and renders
//! whatever comes back.

pub mod caret;
pub mod config;
pub mod error;
pub mod matcher;
pub mod notation;
pub mod pipeline;
pub mod runes;

// Value transformation modules
pub mod group;
pub mod sanitize;

// Re-export commonly used types for convenience
pub use caret::{
    compute_caret, CaretBoundary, CaretContext, CaretPositionInfo, ChangeRange, SnapDirection,
};
pub use config::{FormatOn, FormattingConfig, FormattingConfigBuilder, ThousandStyle};
pub use error::{ConfigError, ConfigResult};
pub use matcher::{separator_matcher, SeparatorMatcher};
pub use pipeline::{format_for_blur, process, EditContext, ProcessOutcome};

// Re-export value transformation helpers
pub use group::{group, strip_separators};
pub use notation::{expand_compact, expand_scientific};
pub use runes::{byte_index_from_rune_index, char_at_rune_index, rune_count};
pub use sanitize::{decompose, sanitize, NumericParts};
