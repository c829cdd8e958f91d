//! Numeric building blocks: precision contexts, guess estimation, and
//! the iterative solvers.

pub mod guess;
pub mod precision;
pub mod solvers;

pub use guess::{auto_initial_guess, reciprocal_seed};
pub use precision::PrecisionContext;
