//! Repository Module
//!
//! Table-level data access over the injected SQLite pool. Reads take
//! `&SqlitePool`; functions that participate in multi-write transactions
//! are generic over the executor so callers control the unit of work.

pub mod capacity;
pub mod customer;
pub mod meal_service;
pub mod promo_code;
pub mod reservation;
pub mod restaurant;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Translate storage-native errors into the fixed domain vocabulary.
///
/// Constraint violations map to their domain kinds; anything unrecognized
/// collapses to `Database` carrying the original cause for diagnostics.
impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".to_string()),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    RepoError::Duplicate(db_err.message().to_string())
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    RepoError::InvalidReference(db_err.message().to_string())
                }
                _ => RepoError::Database(err.to_string()),
            },
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::InvalidReference(msg) => {
                AppError::with_message(ErrorCode::InvalidReference, msg)
            }
            RepoError::Database(msg) => AppError::with_message(ErrorCode::DatabaseError, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
