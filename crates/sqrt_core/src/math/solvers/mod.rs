//! Iterative square-root solvers.
//!
//! Two interchangeable, stateless algorithms, both pure functions of
//! (context, input, seed, iteration count) returning the final
//! approximation plus the full trace of intermediate iterates:
//!
//! - [`heron`]: Newton's method on `x² − a = 0` (simpler,
//!   self-correcting, one division per step)
//! - [`reciprocal`]: Newton's method on `1/y² − a = 0` (division-free
//!   hot loop, needs a correctly scaled reciprocal seed)
//!
//! ## Example
//!
//! ```
//! use sqrt_core::math::{solvers, PrecisionContext};
//! use bigdecimal::BigDecimal;
//!
//! let ctx = PrecisionContext::new(30).unwrap();
//! let a = BigDecimal::from(2);
//! let (approx, trace) = solvers::heron(&ctx, &a, &BigDecimal::from(2), 8);
//!
//! assert_eq!(trace.len(), 9);
//! assert!(approx.to_string().starts_with("1.41421356237309504880"));
//! ```

mod heron;
mod reciprocal;

pub use heron::heron;
pub use reciprocal::reciprocal;
