//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the range of the error code:
/// - 0xxx: General errors
/// - 1xxx: Restaurant / schedule errors
/// - 2xxx: Capacity / quota errors
/// - 3xxx: Promotion errors
/// - 4xxx: Reservation errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Restaurant / schedule errors (1xxx)
    Restaurant,
    /// Capacity / quota errors (2xxx)
    Capacity,
    /// Promotion errors (3xxx)
    Promotion,
    /// Reservation errors (4xxx)
    Reservation,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Restaurant,
            2000..3000 => Self::Capacity,
            3000..4000 => Self::Promotion,
            4000..5000 => Self::Reservation,
            _ => Self::System,
        }
    }

    /// Whether errors in this category indicate an infrastructure fault
    /// rather than an expected business outcome
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl From<ErrorCode> for ErrorCategory {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code.code())
    }
}
