//! REST API server for the arbitrary-precision square-root engine
//!
//! This crate provides an HTTP adapter around [`sqrt_core`]: a JSON
//! computation endpoint with configurable request limits, an optional
//! CSV download of the iteration table, a demo HTML form, and
//! health/readiness probes.

pub mod config;
pub mod routes;
pub mod server;

// Re-export the engine for integration
pub use sqrt_core;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
