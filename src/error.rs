//! Error types for the Discount Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration or
//! applying discount rules.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Discount Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use discount_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/discounts.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/discounts.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A discount rate fell outside the 0..=1 range.
    #[error("Invalid rate '{name}': {value} is not between 0 and 1")]
    InvalidRate {
        /// The name of the rate parameter.
        name: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A line item lacked a field the requested rule needs to read.
    #[error("Line item {index} is missing required field '{field}'")]
    MissingItemField {
        /// Position of the line item in the cart.
        index: usize,
        /// The missing field name.
        field: &'static str,
    },

    /// A price calculation exceeded the range of `Decimal`.
    #[error("Arithmetic overflow while {operation}")]
    ArithmeticOverflow {
        /// What the engine was computing when it overflowed.
        operation: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Checks that a rate lies within `0..=1`.
pub(crate) fn ensure_rate(name: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(EngineError::InvalidRate {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

pub(crate) fn overflow(operation: impl Into<String>) -> EngineError {
    EngineError::ArithmeticOverflow {
        operation: operation.into(),
    }
}
