//! Error types and service response structures

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type of the reservation core, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{} already exists", r))
            .with_detail("resource", r)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Serialized error payload carried by a failed [`ServiceResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional structured details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

/// Tagged outcome envelope for public operations
///
/// Every operation of the core resolves to either
/// `{ success: true, data }` or `{ success: false, error: { code, message, details } }`.
/// Expected business conditions are never surfaced as panics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error payload (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ServiceResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: err.code,
                message: err.message.clone(),
                details: err.details.clone(),
            }),
        }
    }
}

impl<T> From<AppError> for ServiceResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: err.code,
                message: err.message,
                details: err.details,
            }),
        }
    }
}

impl<T> From<Result<T, AppError>> for ServiceResponse<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => err.into(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Party size must be positive");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Party size must be positive");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "phone")
            .with_detail("reason", "required");

        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "phone");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::ReservationNotFound, "Reservation not found");
        assert_eq!(format!("{}", err), "Reservation not found");
    }

    #[test]
    fn test_service_response_success() {
        let response = ServiceResponse::success(42);
        assert!(response.success);
        assert_eq!(response.data, Some(42));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_service_response_error() {
        let err = AppError::with_message(ErrorCode::PromoCodeNotFound, "Promo code not found")
            .with_detail("code", "SAVE20");
        let response = ServiceResponse::<()>::error(&err);

        assert!(!response.success);
        assert!(response.data.is_none());
        let body = response.error.unwrap();
        assert_eq!(body.code, ErrorCode::PromoCodeNotFound);
        assert!(body.details.unwrap().contains_key("code"));
    }

    #[test]
    fn test_service_response_from_result() {
        let ok: ServiceResponse<i32> = Ok::<_, AppError>(7).into();
        assert!(ok.success);

        let err: ServiceResponse<i32> =
            Err::<i32, _>(AppError::new(ErrorCode::DatabaseError)).into();
        assert!(!err.success);
        assert_eq!(err.error.unwrap().code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_service_response_serialize() {
        let response = ServiceResponse::success("hello");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":\"hello\""));
        assert!(!json.contains("\"error\""));

        let response = ServiceResponse::<()>::error(&AppError::new(ErrorCode::RestaurantNotFound));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"code\":1001"));
    }
}
