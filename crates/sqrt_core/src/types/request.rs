//! Computation request types.
//!
//! A request is stateless: contexts, guesses, traces and reports are all
//! created fresh per invocation and discarded once the report is built.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Iterative refinement algorithm selection.
///
/// # Variants
/// - `Heron`: Newton's method applied directly to `x² − a = 0`
/// - `Recip`: Newton's method applied to `1/y² − a = 0`, yielding
///   `1/√a`, scaled by `a` after the final step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Heron / direct Newton iteration, converges to `√a`.
    Heron,
    /// Reciprocal Newton iteration, converges to `1/√a`.
    Recip,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Heron => write!(f, "heron"),
            Method::Recip => write!(f, "recip"),
        }
    }
}

/// Initial guess derivation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitMode {
    /// Derive the seed from the input magnitude alone.
    Auto,
    /// Use a caller-supplied decimal string as the seed.
    Manual,
}

impl fmt::Display for InitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitMode::Auto => write!(f, "auto"),
            InitMode::Manual => write!(f, "manual"),
        }
    }
}

/// A validated computation request for the engine.
///
/// Hard upper limits on `precision_digits`, `iterations` and the length
/// of `number` are the calling layer's responsibility; the engine itself
/// only rejects structurally invalid states (precision below 2, missing
/// manual seed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqrtRequest {
    /// Input number as a decimal string. Must be ≥ 0.
    pub number: String,
    /// Working precision in significant decimal digits (≥ 2).
    pub precision_digits: u64,
    /// Number of refinement steps (0 is valid: the trace is the seed).
    pub iterations: u32,
    /// Algorithm selection.
    pub method: Method,
    /// Seed derivation mode.
    pub init_mode: InitMode,
    /// Caller-supplied seed, required when `init_mode` is `Manual`.
    pub init_value: Option<String>,
    /// Whether the per-iteration table is included in the report.
    pub include_iterations: bool,
}
