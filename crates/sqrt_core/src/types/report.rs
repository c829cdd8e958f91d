//! Computation report types.

use serde::{Deserialize, Serialize};

use super::Method;

/// One row of the iteration trace, with error metrics against the
/// reference value. Index 0 is the seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// Iteration index; 0 is the seed.
    pub index: u32,
    /// Iterate rendered at working precision.
    pub value: String,
    /// `|value − reference|` rendered at working precision.
    pub abs_error: String,
    /// `abs_error / |reference|`, defined as 0 when the reference is 0.
    pub rel_error: String,
}

/// The reportable result of one computation request.
///
/// All decimal values are rendered at the request's working precision.
/// Re-running the same request yields an identical report except for
/// `elapsed_nanos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqrtReport {
    /// Echoed input number.
    pub input: String,
    /// Echoed working precision.
    pub precision_digits: u64,
    /// Echoed algorithm selection.
    pub method: Method,
    /// Echoed iteration count.
    pub iterations_requested: u32,
    /// The seed actually iterated: `x₀` for Heron, `y₀` for reciprocal.
    pub initial_guess_used: String,
    /// Wall-clock duration of the solve loop only, in nanoseconds.
    pub elapsed_nanos: u64,
    /// Ground-truth square root, computed at higher precision.
    pub reference: String,
    /// Library square root at working precision (independent cross-check,
    /// not the error reference).
    pub builtin_sqrt: String,
    /// Final approximation produced by the solver.
    pub approx: String,
    /// `|approx − reference|`.
    pub abs_error: String,
    /// `abs_error / |reference|`, 0 when the reference is 0.
    pub rel_error: String,
    /// Full per-iteration table, present when the request asked for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<Vec<IterationRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SqrtReport {
        SqrtReport {
            input: "2".to_string(),
            precision_digits: 50,
            method: Method::Heron,
            iterations_requested: 10,
            initial_guess_used: "2".to_string(),
            elapsed_nanos: 1234,
            reference: "1.414".to_string(),
            builtin_sqrt: "1.414".to_string(),
            approx: "1.414".to_string(),
            abs_error: "0".to_string(),
            rel_error: "0".to_string(),
            iterations: None,
        }
    }

    #[test]
    fn test_report_serialises_camel_case() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        assert!(json.contains("precisionDigits"));
        assert!(json.contains("iterationsRequested"));
        assert!(json.contains("initialGuessUsed"));
        assert!(json.contains("builtinSqrt"));
        assert!(json.contains("absError"));
        assert!(json.contains("relError"));
        assert!(json.contains("elapsedNanos"));
    }

    #[test]
    fn test_trace_omitted_when_absent() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        assert!(!json.contains("\"iterations\""));
    }

    #[test]
    fn test_iteration_record_fields() {
        let record = IterationRecord {
            index: 0,
            value: "2".to_string(),
            abs_error: "0.586".to_string(),
            rel_error: "0.414".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("absError"));
        assert!(json.contains("relError"));
    }
}
