//! Core data model: requests, reports, and error types.

mod error;
mod report;
mod request;

pub use error::EngineError;
pub use report::{IterationRecord, SqrtReport};
pub use request::{InitMode, Method, SqrtRequest};
