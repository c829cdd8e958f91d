//! Acceptance tests for the computation pipeline: convergence towards
//! the true root, the documented edge cases, and request idempotence.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use proptest::prelude::*;

use sqrt_core::engine;
use sqrt_core::types::{InitMode, Method, SqrtRequest};

/// First 46 significant digits of √2; the last few rendered digits are
/// allowed to differ by one unit in the last place of the working
/// precision.
const SQRT_2_PREFIX: &str = "1.414213562373095048801688724209698078569671875";

fn request(number: &str, method: Method) -> SqrtRequest {
    SqrtRequest {
        number: number.to_string(),
        precision_digits: 50,
        iterations: 10,
        method,
        init_mode: InitMode::Auto,
        init_value: None,
        include_iterations: true,
    }
}

fn decimal(text: &str) -> BigDecimal {
    BigDecimal::from_str(text).unwrap()
}

#[test]
fn heron_sqrt_two_at_fifty_digits() {
    let report = engine::compute(&request("2", Method::Heron)).unwrap();

    assert_eq!(report.initial_guess_used, "2");
    assert!(
        report.approx.starts_with(SQRT_2_PREFIX),
        "approx diverged from √2: {}",
        report.approx
    );

    // Relative error well below 10^-45 after ten iterations.
    let rel = decimal(&report.rel_error);
    assert!(rel < BigDecimal::new(BigInt::one(), 45), "relError = {}", rel);
}

#[test]
fn reciprocal_sqrt_two_at_fifty_digits() {
    let report = engine::compute(&request("2", Method::Recip)).unwrap();

    // Auto seed x0 = 2 gives reciprocal seed 0.5.
    assert_eq!(report.initial_guess_used, "0.5");
    assert!(
        report.approx.starts_with(SQRT_2_PREFIX),
        "approx diverged from √2: {}",
        report.approx
    );
    let rel = decimal(&report.rel_error);
    assert!(rel < BigDecimal::new(BigInt::one(), 45), "relError = {}", rel);
}

#[test]
fn heron_absolute_error_is_non_increasing() {
    let report = engine::compute(&request("2", Method::Heron)).unwrap();
    let errors: Vec<BigDecimal> = report
        .iterations
        .unwrap()
        .iter()
        .map(|row| decimal(&row.abs_error))
        .collect();

    for pair in errors.windows(2) {
        assert!(
            pair[1] <= pair[0],
            "absolute error increased: {} -> {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn manual_reciprocal_seed_recovers_exact_root() {
    let report = engine::compute(&SqrtRequest {
        number: "4".to_string(),
        precision_digits: 50,
        iterations: 5,
        method: Method::Recip,
        init_mode: InitMode::Manual,
        init_value: Some("2".to_string()),
        include_iterations: false,
    })
    .unwrap();

    assert_eq!(report.initial_guess_used, "0.5");
    assert_eq!(report.approx, "2");
    assert!(decimal(&report.abs_error).is_zero());
}

#[test]
fn zero_input_produces_all_zero_trace() {
    let report = engine::compute(&request("0", Method::Heron)).unwrap();
    assert_eq!(report.approx, "0");
    assert_eq!(report.reference, "0");
    assert_eq!(report.rel_error, "0");
    assert!(report
        .iterations
        .unwrap()
        .iter()
        .all(|row| row.value == "0"));
}

#[test]
fn builtin_sqrt_agrees_with_solver() {
    for method in [Method::Heron, Method::Recip] {
        let report = engine::compute(&request("12345.6789", method)).unwrap();
        let approx = decimal(&report.approx);
        let builtin = decimal(&report.builtin_sqrt);
        let gap = (&approx - &builtin).abs();
        assert!(
            gap < BigDecimal::new(BigInt::one(), 40),
            "{} solver disagrees with library sqrt by {}",
            method,
            gap
        );
    }
}

#[test]
fn rerunning_a_request_is_idempotent() {
    let req = request("7", Method::Recip);
    let mut first = engine::compute(&req).unwrap();
    let mut second = engine::compute(&req).unwrap();

    // Elapsed time is the only field allowed to differ.
    first.elapsed_nanos = 0;
    second.elapsed_nanos = 0;
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn trace_length_is_iterations_plus_one(
        number in 0u32..100_000,
        iterations in 0u32..12,
        use_heron in any::<bool>(),
    ) {
        let report = engine::compute(&SqrtRequest {
            number: number.to_string(),
            precision_digits: 25,
            iterations,
            method: if use_heron { Method::Heron } else { Method::Recip },
            init_mode: InitMode::Auto,
            init_value: None,
            include_iterations: true,
        })
        .unwrap();

        prop_assert_eq!(report.iterations.unwrap().len(), iterations as usize + 1);
    }

    #[test]
    fn converged_relative_error_is_small(number in 1u32..100_000) {
        let report = engine::compute(&SqrtRequest {
            number: number.to_string(),
            precision_digits: 25,
            iterations: 9,
            method: Method::Heron,
            init_mode: InitMode::Auto,
            init_value: None,
            include_iterations: false,
        })
        .unwrap();

        let rel = BigDecimal::from_str(&report.rel_error).unwrap();
        prop_assert!(rel < BigDecimal::new(BigInt::one(), 20), "relError = {}", rel);
    }
}
