//! # sqrt_core: Arbitrary-precision square-root engine
//!
//! Computes the square root of a non-negative decimal number to an
//! arbitrary, caller-chosen number of significant decimal digits using
//! one of two classical iterative refinement algorithms, and reports
//! per-iteration convergence data and error metrics against a
//! higher-precision reference value.
//!
//! ## Components
//!
//! - [`math::PrecisionContext`]: explicit significant-digit arithmetic
//!   context (no ambient global precision state)
//! - [`math::guess`]: automatic power-of-two seed derivation and the
//!   reciprocal seed rule
//! - [`math::solvers`]: the Heron and reciprocal Newton iterations
//! - [`report`]: error metrics and decimal rendering
//! - [`engine`]: the per-request pipeline tying the above together
//!
//! ## Usage
//!
//! ```rust
//! use sqrt_core::engine;
//! use sqrt_core::types::{InitMode, Method, SqrtRequest};
//!
//! let report = engine::compute(&SqrtRequest {
//!     number: "4".to_string(),
//!     precision_digits: 20,
//!     iterations: 5,
//!     method: Method::Recip,
//!     init_mode: InitMode::Manual,
//!     init_value: Some("2".to_string()),
//!     include_iterations: true,
//! })
//! .unwrap();
//!
//! // Reciprocal seed = 1/2; five steps leave it fixed and the scaling
//! // by the input recovers the exact root.
//! assert_eq!(report.initial_guess_used, "0.5");
//! assert_eq!(report.approx, "2");
//! assert_eq!(report.iterations.unwrap().len(), 6);
//! ```
//!
//! ## Concurrency
//!
//! Requests are stateless and synchronous: contexts, guesses, traces and
//! reports are created fresh per invocation, so concurrent requests may
//! run on parallel threads with zero shared resources.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod math;
pub mod report;
pub mod types;
