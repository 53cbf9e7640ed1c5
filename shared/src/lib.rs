//! Shared types for the reservation backend
//!
//! Cross-cutting building blocks used by every crate in the workspace:
//!
//! - **Models** (`models`): restaurant, meal service, capacity, customer,
//!   reservation and promotion entities plus their create payloads
//! - **Errors** (`error`): unified error codes, [`AppError`] and the tagged
//!   [`ServiceResponse`] envelope
//! - **Utilities** (`util`): timestamps and snowflake id generation

pub mod error;
pub mod models;
pub mod util;

// Re-export the error surface at the crate root
pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode, ServiceResponse};
