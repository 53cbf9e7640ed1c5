//! Unified error handling
//!
//! - [`ErrorCode`]: u16 error codes organized by category range
//! - [`ErrorCategory`]: classification (business vs system)
//! - [`AppError`] / [`AppResult`]: the error type public operations return
//! - [`ServiceResponse`]: tagged `{success, data | error}` envelope

pub mod category;
pub mod codes;
pub mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody, ServiceResponse};
