//! Explicit precision context for arbitrary-precision decimal arithmetic.
//!
//! Precision is a property of the context an operation executes in, not
//! of the value itself: every arithmetic operation performed through a
//! [`PrecisionContext`] rounds its result to the context's significant
//! decimal digit count (half-even). The same logical value re-evaluated
//! under a different context precision may round differently.
//!
//! Two independent contexts are used per request: a working context at
//! the caller's precision, and a reference context at a strictly higher
//! precision whose square root serves as ground truth for error
//! measurement. Contexts are plain values passed by reference into the
//! solvers and the formatter; there is no ambient mutable precision
//! state, so concurrent requests are isolation-safe.

use std::num::NonZeroU64;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Context, RoundingMode};
use num_bigint::BigInt;
use num_traits::Zero;

use crate::types::EngineError;

/// Guard digits carried through division before the final rounding, so
/// quotients are correctly rounded at any context precision.
const DIVISION_GUARD_DIGITS: u64 = 8;

/// Number of significant decimal digits in a [`BigInt`]'s magnitude.
///
/// Zero counts as one digit.
pub(crate) fn decimal_digit_count(n: &BigInt) -> u64 {
    n.magnitude().to_str_radix(10).len() as u64
}

/// An arithmetic context that rounds every result to a fixed number of
/// significant decimal digits.
///
/// # Example
///
/// ```
/// use sqrt_core::math::PrecisionContext;
///
/// let ctx = PrecisionContext::new(30).unwrap();
/// let a = ctx.parse("number", "2").unwrap();
/// let sqrt2 = ctx.sqrt(&a).unwrap();
/// assert!(sqrt2.to_string().starts_with("1.4142135623730950488"));
/// ```
#[derive(Debug, Clone)]
pub struct PrecisionContext {
    digits: u64,
    precision: NonZeroU64,
    context: Context,
}

impl PrecisionContext {
    /// Create a context carrying `digits` significant decimal digits.
    ///
    /// Fails with [`EngineError::Config`] when `digits` is zero.
    pub fn new(digits: u64) -> Result<Self, EngineError> {
        let precision = NonZeroU64::new(digits).ok_or_else(|| {
            EngineError::Config("precision must be at least 1 digit".to_string())
        })?;
        Ok(Self {
            digits,
            precision,
            context: Context::new(precision, RoundingMode::HalfEven),
        })
    }

    /// Significant decimal digits carried by this context.
    pub fn digits(&self) -> u64 {
        self.digits
    }

    /// Parse a decimal string and round it into this context.
    ///
    /// `field` names the request field for the error message.
    pub fn parse(&self, field: &'static str, text: &str) -> Result<BigDecimal, EngineError> {
        let value = BigDecimal::from_str(text.trim()).map_err(|e| EngineError::Parse {
            field,
            message: e.to_string(),
        })?;
        Ok(self.round(&value))
    }

    /// Round a value to this context's precision (half-even).
    pub fn round(&self, value: &BigDecimal) -> BigDecimal {
        value.with_precision_round(self.precision, RoundingMode::HalfEven)
    }

    /// Sum, rounded into this context.
    pub fn add(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(&(lhs + rhs))
    }

    /// Difference, rounded into this context.
    pub fn sub(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(&(lhs - rhs))
    }

    /// Product, rounded into this context.
    pub fn mul(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(&(lhs * rhs))
    }

    /// Quotient, rounded into this context.
    ///
    /// The built-in `BigDecimal` division rounds at a compile-time
    /// default precision, so the quotient is computed here over the
    /// underlying integers with guard digits instead. The divisor must
    /// be non-zero; callers guard the degenerate cases.
    pub fn div(&self, num: &BigDecimal, den: &BigDecimal) -> BigDecimal {
        debug_assert!(!den.is_zero(), "division by zero inside precision context");
        if num.is_zero() {
            return BigDecimal::zero();
        }
        let (n_int, n_scale) = num.as_bigint_and_exponent();
        let (d_int, d_scale) = den.as_bigint_and_exponent();
        let n_digits = decimal_digit_count(&n_int);
        let d_digits = decimal_digit_count(&d_int);

        // Scale the numerator so the integer quotient keeps at least
        // `digits + guard` significant digits.
        let shift = (self.digits + DIVISION_GUARD_DIGITS + d_digits).saturating_sub(n_digits);
        let scaled = n_int * num_traits::pow(BigInt::from(10), shift as usize);
        let quotient = scaled / d_int;

        self.round(&BigDecimal::new(quotient, n_scale - d_scale + shift as i64))
    }

    /// Library square root at this context's precision.
    ///
    /// Returns `None` for negative input; the engine rejects negative
    /// numbers before ever reaching this point.
    pub fn sqrt(&self, value: &BigDecimal) -> Option<BigDecimal> {
        value.sqrt_with_context(&self.context)
    }
}
