//! Error metrics and decimal rendering.
//!
//! Turns raw iterates into reportable values: absolute/relative error
//! against the reference root, and rendering of arbitrary-precision
//! values as decimal strings at the working precision. Rendering is
//! infallible; values whose leading-digit exponent falls outside a
//! readable window are emitted in scientific notation instead of a wall
//! of zeros.

use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::math::precision::{decimal_digit_count, PrecisionContext};

/// `|value − reference|`, rounded into the context.
pub fn absolute_error(
    ctx: &PrecisionContext,
    value: &BigDecimal,
    reference: &BigDecimal,
) -> BigDecimal {
    ctx.sub(value, reference).abs()
}

/// `abs_error / |reference|`, defined as 0 when the reference is
/// exactly 0 to avoid a division by zero.
pub fn relative_error(
    ctx: &PrecisionContext,
    abs_error: &BigDecimal,
    reference: &BigDecimal,
) -> BigDecimal {
    if reference.is_zero() {
        BigDecimal::zero()
    } else {
        ctx.div(abs_error, &reference.abs())
    }
}

/// Render a value at the context's significant-digit count.
///
/// Trailing zeros are stripped after rounding, so exact values print in
/// their shortest form ("2", not "2.000…0").
pub fn render(ctx: &PrecisionContext, value: &BigDecimal) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let rounded = ctx.round(value).normalized();
    let (int_val, scale) = rounded.as_bigint_and_exponent();
    let adjusted_exponent = decimal_digit_count(&int_val) as i64 - 1 - scale;

    if adjusted_exponent < -6 || adjusted_exponent > ctx.digits() as i64 + 6 {
        rounded.to_scientific_notation()
    } else {
        rounded.to_string()
    }
}
