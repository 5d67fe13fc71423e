//! Error types for agrotwin-core.
//!
//! Rule evaluation never fails: unclassifiable readings, unknown crop types,
//! malformed action strings and unknown recommendation ids are all handled
//! permissively. Errors only arise when building custom threshold tables or
//! engine configuration.

use thiserror::Error;

use agrotwin_types::{Metric, ParseError};

/// Errors that can occur when configuring the evaluator.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A threshold set violates the strictly-increasing bound ordering.
    #[error("Invalid {metric} thresholds for crop '{crop}': {reason}")]
    InvalidThresholds {
        /// Crop type the set was registered for.
        crop: String,
        /// Metric whose bounds are invalid.
        metric: Metric,
        /// What is wrong with the bounds.
        reason: String,
    },

    /// Engine configuration is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse a value from text.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type alias using agrotwin-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
