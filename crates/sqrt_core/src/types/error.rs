//! Error types for structured error handling.
//!
//! This module provides `EngineError`, the single failure type surfaced
//! by the square-root engine. All failures are detected eagerly, before
//! or at the start of the iterative solve; there is no partial-result
//! reporting.

use thiserror::Error;

/// Categorised engine errors.
///
/// Provides structured error handling for the computation pipeline with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `Parse`: A decimal string could not be interpreted as a number
/// - `Domain`: Input outside the supported real domain (negative input,
///   or a structurally invalid zero seed)
/// - `Config`: A request parameter outside its declared valid range
/// - `Internal`: Unexpected arithmetic failure inside the engine
///
/// # Examples
/// ```
/// use sqrt_core::types::EngineError;
///
/// let err = EngineError::Domain("negative input".to_string());
/// assert_eq!(format!("{}", err), "Domain error: negative input");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A decimal string could not be parsed as a number.
    #[error("Failed to parse {field}: {message}")]
    Parse {
        /// Name of the offending request field.
        field: &'static str,
        /// Underlying parser message.
        message: String,
    },

    /// Input is outside the supported real domain.
    #[error("Domain error: {0}")]
    Domain(String),

    /// A request parameter is outside its declared valid range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected internal arithmetic failure.
    ///
    /// Distinct from the three domain kinds above so callers can tell
    /// "bad input" from "engine bug".
    #[error("Internal computation failure: {0}")]
    Internal(String),
}
