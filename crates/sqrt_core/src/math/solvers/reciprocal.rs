//! Reciprocal Newton iteration.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::math::precision::PrecisionContext;

/// Newton's method applied to `1/y² − a = 0`:
///
/// ```text
/// y[k+1] = y[k] * (1.5 - 0.5 * a * y[k]²)
/// ```
///
/// Converges quadratically to `1/√a`; the final approximation of `√a`
/// is recovered by scaling the last iterate by `a`. No division in the
/// hot loop, at the cost of needing a correctly scaled reciprocal seed.
///
/// Returns the scaled final approximation and the trace of the raw
/// reciprocal-space iterates, `iterations + 1` long with the seed at
/// index 0.
pub fn reciprocal(
    ctx: &PrecisionContext,
    a: &BigDecimal,
    y0: &BigDecimal,
    iterations: u32,
) -> (BigDecimal, Vec<BigDecimal>) {
    let half = BigDecimal::new(BigInt::from(5), 1);
    let three_halves = BigDecimal::new(BigInt::from(15), 1);
    let mut trace = Vec::with_capacity(iterations as usize + 1);
    let mut y = y0.clone();
    trace.push(y.clone());

    for _ in 0..iterations {
        let y_squared = ctx.mul(&y, &y);
        let scaled = ctx.mul(&half, &ctx.mul(a, &y_squared));
        y = ctx.mul(&y, &ctx.sub(&three_halves, &scaled));
        trace.push(y.clone());
    }

    (ctx.mul(a, &y), trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{Signed, Zero};

    fn ctx() -> PrecisionContext {
        PrecisionContext::new(40).unwrap()
    }

    #[test]
    fn test_trace_length_is_iterations_plus_one() {
        let ctx = ctx();
        let a = BigDecimal::from(2);
        let seed = ctx.parse("initValue", "0.5").unwrap();
        for iterations in [0, 1, 6] {
            let (_, trace) = reciprocal(&ctx, &a, &seed, iterations);
            assert_eq!(trace.len(), iterations as usize + 1);
        }
    }

    #[test]
    fn test_zero_iterations_scales_seed() {
        // With no refinement steps the result is a * y0.
        let ctx = ctx();
        let a = BigDecimal::from(4);
        let seed = ctx.parse("initValue", "0.5").unwrap();
        let (approx, trace) = reciprocal(&ctx, &a, &seed, 0);
        assert_eq!(approx, BigDecimal::from(2));
        assert_eq!(trace, vec![seed]);
    }

    #[test]
    fn test_exact_seed_is_fixed_point() {
        // y0 = 1/√4 = 0.5 is already the root of 1/y² − 4.
        let ctx = ctx();
        let a = BigDecimal::from(4);
        let seed = ctx.parse("initValue", "0.5").unwrap();
        let (approx, trace) = reciprocal(&ctx, &a, &seed, 5);
        assert_eq!(approx, BigDecimal::from(2));
        assert!(trace.iter().all(|y| *y == seed));
    }

    #[test]
    fn test_converges_to_sqrt_two() {
        let ctx = ctx();
        let a = BigDecimal::from(2);
        let seed = ctx.parse("initValue", "0.5").unwrap();
        let (approx, _) = reciprocal(&ctx, &a, &seed, 10);

        let reference = ctx.sqrt(&a).unwrap();
        let error = (&approx - &reference).abs();
        let bound = ctx.parse("number", "1e-38").unwrap();
        assert!(error < bound, "error {} above bound", error);
    }

    #[test]
    fn test_input_zero_scales_to_zero() {
        // Auto mode seeds y0 = 1 when a = 0; the scaling by a collapses
        // the result to exactly 0.
        let ctx = ctx();
        let a = BigDecimal::zero();
        let seed = BigDecimal::from(1);
        let (approx, trace) = reciprocal(&ctx, &a, &seed, 3);
        assert!(approx.is_zero());
        assert_eq!(trace.len(), 4);
    }
}
