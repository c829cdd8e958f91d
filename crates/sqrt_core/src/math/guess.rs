//! Initial guess estimation.
//!
//! The automatic estimator places the seed within roughly one binary
//! order of magnitude of the true root's scale: for input `a > 0` it
//! takes `e = floor(log2 a)` and returns `2^floor((e + 2) / 2)`. That is
//! close enough for the quadratic convergence of either Newton iteration
//! to reach full working precision in a small, bounded number of steps.

use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::precision::PrecisionContext;
use crate::types::{EngineError, InitMode};

/// Compare `a` against `2^e` exactly.
///
/// Scaling by a power of two is exact in decimal arithmetic, so both
/// branches avoid any rounding.
fn cmp_pow2(a: &BigDecimal, e: i64) -> Ordering {
    if e >= 0 {
        a.cmp(&BigDecimal::from(BigInt::one() << e as usize))
    } else {
        let scaled = a * BigDecimal::from(BigInt::one() << (-e) as usize);
        scaled.cmp(&BigDecimal::one())
    }
}

/// `2^e` rounded into the given context.
fn pow2(ctx: &PrecisionContext, e: i64) -> BigDecimal {
    if e >= 0 {
        ctx.round(&BigDecimal::from(BigInt::one() << e as usize))
    } else {
        let den = BigDecimal::from(BigInt::one() << (-e) as usize);
        ctx.div(&BigDecimal::one(), &den)
    }
}

/// Exact `floor(log2 a)` for `a > 0`.
///
/// A float estimate from the coefficient bit length gets within a step
/// or two of the answer; exact power-of-two comparisons finish the job.
fn floor_log2(a: &BigDecimal) -> i64 {
    let (int_val, scale) = a.as_bigint_and_exponent();
    let bits = int_val.bits();
    let estimate = (bits as f64 - 1.0) - scale as f64 * std::f64::consts::LOG2_10;
    let mut e = estimate.floor() as i64;

    while cmp_pow2(a, e + 1) != Ordering::Less {
        e += 1;
    }
    while cmp_pow2(a, e) == Ordering::Less {
        e -= 1;
    }
    e
}

/// Derive the automatic initial guess for `a ≥ 0`.
///
/// Returns exactly 0 for `a = 0` and a power of two otherwise. Negative
/// input fails with [`EngineError::Domain`]; the engine rejects it
/// before the guess is derived, this is a backstop.
pub fn auto_initial_guess(
    ctx: &PrecisionContext,
    a: &BigDecimal,
) -> Result<BigDecimal, EngineError> {
    if a.is_negative() {
        return Err(EngineError::Domain(
            "negative input has no real square root".to_string(),
        ));
    }
    if a.is_zero() {
        return Ok(BigDecimal::zero());
    }
    let e = floor_log2(a);
    let seed_exponent = (e + 2).div_euclid(2);
    Ok(pow2(ctx, seed_exponent))
}

/// Derive the reciprocal-space seed `y₀` from the direct seed `x₀`.
///
/// Manual mode requires a non-zero seed and fails with
/// [`EngineError::Domain`] otherwise; automatic mode substitutes 1 for a
/// zero seed (which only occurs for input 0).
pub fn reciprocal_seed(
    ctx: &PrecisionContext,
    x0: &BigDecimal,
    mode: InitMode,
) -> Result<BigDecimal, EngineError> {
    if x0.is_zero() {
        return match mode {
            InitMode::Manual => Err(EngineError::Domain(
                "zero initial guess is invalid for the reciprocal method".to_string(),
            )),
            InitMode::Auto => Ok(BigDecimal::one()),
        };
    }
    Ok(ctx.div(&BigDecimal::one(), x0))
}
