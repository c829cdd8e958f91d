//! The per-request computation pipeline.
//!
//! Control flow per request: validate → reference context (ground-truth
//! root at higher precision) → working context (parse, seed, iterate) →
//! error metrics and rendering. Everything is created fresh per
//! invocation and dropped with the report; no numeric state outlives a
//! request.

use std::time::Instant;

use num_traits::Signed;

use crate::math::{auto_initial_guess, reciprocal_seed, solvers, PrecisionContext};
use crate::report;
use crate::types::{EngineError, InitMode, IterationRecord, Method, SqrtReport, SqrtRequest};

/// Smallest accepted working precision.
pub const MIN_PRECISION_DIGITS: u64 = 2;

/// Extra digits the reference context carries beyond the working
/// precision, so measured error reflects the solver's own convergence
/// and not noise from an equally imprecise reference.
pub const REFERENCE_MARGIN_DIGITS: u64 = 20;

/// Extra digits retained when the reference root is re-rounded before
/// comparison.
const REFERENCE_ROUND_DIGITS: u64 = 10;

/// Run one computation request through the full pipeline.
///
/// All failures are detected before or at the start of the iterative
/// solve and surfaced as a single typed [`EngineError`]; nothing is
/// retried or silently recovered.
///
/// # Example
///
/// ```
/// use sqrt_core::engine;
/// use sqrt_core::types::{InitMode, Method, SqrtRequest};
///
/// let report = engine::compute(&SqrtRequest {
///     number: "2".to_string(),
///     precision_digits: 30,
///     iterations: 10,
///     method: Method::Heron,
///     init_mode: InitMode::Auto,
///     init_value: None,
///     include_iterations: false,
/// })
/// .unwrap();
///
/// assert!(report.approx.starts_with("1.4142135623730950488"));
/// ```
pub fn compute(request: &SqrtRequest) -> Result<SqrtReport, EngineError> {
    validate(request)?;

    let work = PrecisionContext::new(request.precision_digits)?;

    // Ground truth, computed once in its own higher-precision context
    // and re-rounded a little above working precision.
    let reference_ctx = PrecisionContext::new(request.precision_digits + REFERENCE_MARGIN_DIGITS)?;
    let a_reference = reference_ctx.parse("number", &request.number)?;
    if a_reference.is_negative() {
        return Err(EngineError::Domain(
            "negative input: complex results are not supported".to_string(),
        ));
    }
    let reference = reference_ctx.sqrt(&a_reference).ok_or_else(|| {
        EngineError::Internal("reference square root unavailable".to_string())
    })?;
    let reference =
        PrecisionContext::new(request.precision_digits + REFERENCE_ROUND_DIGITS)?.round(&reference);

    // Everything from here on runs in the working context.
    let a = work.parse("number", &request.number)?;
    let x0 = match request.init_mode {
        InitMode::Auto => auto_initial_guess(&work, &a)?,
        InitMode::Manual => {
            let text = request.init_value.as_deref().unwrap_or("");
            work.parse("initValue", text)?
        }
    };
    let seed = match request.method {
        Method::Heron => x0,
        Method::Recip => reciprocal_seed(&work, &x0, request.init_mode)?,
    };

    let started = Instant::now();
    let (approx, trace) = match request.method {
        Method::Heron => solvers::heron(&work, &a, &seed, request.iterations),
        Method::Recip => solvers::reciprocal(&work, &a, &seed, request.iterations),
    };
    let elapsed = started.elapsed();

    // Independent cross-check; not the error reference.
    let builtin = work
        .sqrt(&a)
        .ok_or_else(|| EngineError::Internal("library square root unavailable".to_string()))?;

    let abs_error = report::absolute_error(&work, &approx, &reference);
    let rel_error = report::relative_error(&work, &abs_error, &reference);

    let iterations = request.include_iterations.then(|| {
        trace
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let abs = report::absolute_error(&work, value, &reference);
                let rel = report::relative_error(&work, &abs, &reference);
                IterationRecord {
                    index: index as u32,
                    value: report::render(&work, value),
                    abs_error: report::render(&work, &abs),
                    rel_error: report::render(&work, &rel),
                }
            })
            .collect()
    });

    Ok(SqrtReport {
        input: request.number.clone(),
        precision_digits: request.precision_digits,
        method: request.method,
        iterations_requested: request.iterations,
        initial_guess_used: report::render(&work, &seed),
        elapsed_nanos: elapsed.as_nanos() as u64,
        reference: report::render(&work, &reference),
        builtin_sqrt: report::render(&work, &builtin),
        approx: report::render(&work, &approx),
        abs_error: report::render(&work, &abs_error),
        rel_error: report::render(&work, &rel_error),
        iterations,
    })
}

/// Reject structurally invalid requests before any arithmetic runs.
fn validate(request: &SqrtRequest) -> Result<(), EngineError> {
    if request.number.trim().is_empty() {
        return Err(EngineError::Config("number must not be empty".to_string()));
    }
    if request.precision_digits < MIN_PRECISION_DIGITS {
        return Err(EngineError::Config(format!(
            "precision_digits must be at least {}",
            MIN_PRECISION_DIGITS
        )));
    }
    if request.init_mode == InitMode::Manual
        && request.init_value.as_deref().unwrap_or("").trim().is_empty()
    {
        return Err(EngineError::Config(
            "init_mode is manual but init_value was not provided".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> SqrtRequest {
        SqrtRequest {
            number: "2".to_string(),
            precision_digits: 30,
            iterations: 10,
            method: Method::Heron,
            init_mode: InitMode::Auto,
            init_value: None,
            include_iterations: false,
        }
    }

    #[test]
    fn test_precision_below_minimum_rejected() {
        let request = SqrtRequest {
            precision_digits: 1,
            ..base_request()
        };
        assert!(matches!(compute(&request), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_empty_number_rejected() {
        let request = SqrtRequest {
            number: "  ".to_string(),
            ..base_request()
        };
        assert!(matches!(compute(&request), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_manual_mode_without_value_rejected() {
        let request = SqrtRequest {
            init_mode: InitMode::Manual,
            init_value: None,
            ..base_request()
        };
        assert!(matches!(compute(&request), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_unparseable_number_names_field() {
        let request = SqrtRequest {
            number: "2..5".to_string(),
            ..base_request()
        };
        match compute(&request) {
            Err(EngineError::Parse { field, .. }) => assert_eq!(field, "number"),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_manual_seed_names_field() {
        let request = SqrtRequest {
            init_mode: InitMode::Manual,
            init_value: Some("abc".to_string()),
            ..base_request()
        };
        match compute(&request) {
            Err(EngineError::Parse { field, .. }) => assert_eq!(field, "initValue"),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_input_is_domain_error_for_both_methods() {
        for method in [Method::Heron, Method::Recip] {
            let request = SqrtRequest {
                number: "-1".to_string(),
                method,
                ..base_request()
            };
            assert!(matches!(compute(&request), Err(EngineError::Domain(_))));
        }
    }

    #[test]
    fn test_zero_manual_seed_invalid_for_reciprocal() {
        let request = SqrtRequest {
            method: Method::Recip,
            init_mode: InitMode::Manual,
            init_value: Some("0".to_string()),
            ..base_request()
        };
        assert!(matches!(compute(&request), Err(EngineError::Domain(_))));
    }

    #[test]
    fn test_zero_manual_seed_allowed_for_heron() {
        // The degenerate zero seed is numerically meaningless but not
        // fatal for the direct method: the trace collapses to zeros.
        let request = SqrtRequest {
            method: Method::Heron,
            init_mode: InitMode::Manual,
            init_value: Some("0".to_string()),
            iterations: 3,
            include_iterations: true,
            ..base_request()
        };
        let report = compute(&request).unwrap();
        assert_eq!(report.approx, "0");
        let rows = report.iterations.unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.value == "0"));
    }

    #[test]
    fn test_trace_included_only_on_request() {
        let without = compute(&base_request()).unwrap();
        assert!(without.iterations.is_none());

        let with = compute(&SqrtRequest {
            include_iterations: true,
            ..base_request()
        })
        .unwrap();
        let rows = with.iterations.unwrap();
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].value, with.initial_guess_used);
    }

    #[test]
    fn test_zero_input_zero_iterations() {
        let report = compute(&SqrtRequest {
            number: "0".to_string(),
            iterations: 0,
            include_iterations: true,
            ..base_request()
        })
        .unwrap();
        assert_eq!(report.approx, "0");
        assert_eq!(report.reference, "0");
        assert_eq!(report.rel_error, "0");
        assert_eq!(report.iterations.unwrap().len(), 1);
    }
}
