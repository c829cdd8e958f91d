//! Heron / direct Newton iteration.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::math::precision::PrecisionContext;

/// Newton's method applied directly to `x² − a = 0`:
///
/// ```text
/// x[k+1] = (x[k] + a / x[k]) / 2
/// ```
///
/// The division re-anchors each step to `a`, which makes the iteration
/// self-correcting. Converges quadratically to `√a` for any seed of the
/// right sign and order of magnitude.
///
/// Returns the final iterate and the full trace of `iterations + 1`
/// values, the seed at index 0. A zero iterate stays zero for all
/// subsequent steps instead of failing on the division; that only
/// arises from a degenerate zero seed with `a > 0`.
pub fn heron(
    ctx: &PrecisionContext,
    a: &BigDecimal,
    x0: &BigDecimal,
    iterations: u32,
) -> (BigDecimal, Vec<BigDecimal>) {
    let half = BigDecimal::new(BigInt::from(5), 1);
    let mut trace = Vec::with_capacity(iterations as usize + 1);
    let mut x = x0.clone();
    trace.push(x.clone());

    for _ in 0..iterations {
        if x.is_zero() {
            trace.push(BigDecimal::zero());
            continue;
        }
        let quotient = ctx.div(a, &x);
        x = ctx.mul(&ctx.add(&x, &quotient), &half);
        trace.push(x.clone());
    }

    (x, trace)
}
