//! Utility module — time helpers and logging
//!
//! Error types live in `shared::error` and are re-exported here for
//! convenient use throughout the crate.

pub mod logger;
pub mod time;

pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode, ServiceResponse};
