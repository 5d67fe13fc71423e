//! Error types for value parsing in agrotwin-types.

use thiserror::Error;

/// Errors that can occur when parsing agrotwin values from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The text did not name a known value of the given kind.
    #[error("Unknown {kind}: '{value}'")]
    Unknown {
        /// What was being parsed (e.g. "priority").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl ParseError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        ParseError::Unknown {
            kind,
            value: value.to_string(),
        }
    }
}

/// Result type alias using agrotwin-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
