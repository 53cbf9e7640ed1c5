//! Unified error codes for the reservation backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Restaurant / schedule errors
//! - 2xxx: Capacity / quota errors
//! - 3xxx: Promotion errors
//! - 4xxx: Reservation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Referenced resource does not exist
    InvalidReference = 6,

    // ==================== 1xxx: Restaurant / Schedule ====================
    /// Restaurant not found
    RestaurantNotFound = 1001,
    /// Meal service not found or inactive
    MealServiceNotFound = 1002,

    // ==================== 2xxx: Capacity / Quota ====================
    /// Capacity record not found
    CapacityRecordNotFound = 2001,

    // ==================== 3xxx: Promotion ====================
    /// Promo code not found
    ///
    /// Deliberately generic: expired, inactive and deleted codes all collapse
    /// to this code so callers cannot probe promotion timing.
    PromoCodeNotFound = 3001,
    /// Promo code usage or party-size ceiling reached
    PromoCodeLimitReached = 3002,
    /// Promo code not applicable to this order
    PromoCodeNotApplicable = 3003,

    // ==================== 4xxx: Reservation ====================
    /// Reservation request not found
    ReservationRequestNotFound = 4001,
    /// Customer not found
    CustomerNotFound = 4002,
    /// Reservation not found
    ReservationNotFound = 4003,

    // ==================== 9xxx: System ====================
    /// Storage operation failed
    DatabaseError = 9001,
    /// Internal error
    InternalError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidReference => "Referenced resource does not exist",
            Self::RestaurantNotFound => "Restaurant not found",
            Self::MealServiceNotFound => "Meal service not found",
            Self::CapacityRecordNotFound => "Capacity record not found",
            Self::PromoCodeNotFound => "Promo code not found",
            Self::PromoCodeLimitReached => "Promo code limit reached",
            Self::PromoCodeNotApplicable => "Promo code not applicable",
            Self::ReservationRequestNotFound => "Reservation request not found",
            Self::CustomerNotFound => "Customer not found",
            Self::ReservationNotFound => "Reservation not found",
            Self::DatabaseError => "Storage operation failed",
            Self::InternalError => "Internal error",
        }
    }

    /// Get the category of this error code
    pub fn category(&self) -> super::category::ErrorCategory {
        super::category::ErrorCategory::from_code(self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidReference,
            1001 => Self::RestaurantNotFound,
            1002 => Self::MealServiceNotFound,
            2001 => Self::CapacityRecordNotFound,
            3001 => Self::PromoCodeNotFound,
            3002 => Self::PromoCodeLimitReached,
            3003 => Self::PromoCodeNotApplicable,
            4001 => Self::ReservationRequestNotFound,
            4002 => Self::CustomerNotFound,
            4003 => Self::ReservationNotFound,
            9001 => Self::DatabaseError,
            9002 => Self::InternalError,
            other => return Err(format!("Unknown error code: {other}")),
        };
        Ok(code)
    }
}
