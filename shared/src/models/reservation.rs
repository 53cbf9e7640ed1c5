//! Reservation Models — pending requests and confirmed reservations

use super::customer::CustomerUpsert;
use super::meal_service::MealCategory;
use serde::{Deserialize, Serialize};

/// Booking origin channel: self-service vs staff-entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingChannel {
    /// Self-service ("online")
    Customer,
    /// Staff-entered ("manual")
    Staff,
}

/// Lifecycle status of a reservation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Completed,
    Cancelled,
    Rejected,
}

/// Status of a confirmed reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
    Rejected,
}

/// Pending booking intent
///
/// Exactly one request maps to at most one [`Reservation`]; the request id
/// is the idempotency key of confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationRequest {
    pub id: i64,
    pub restaurant_id: i64,
    pub customer_id: i64,
    pub meal_category: MealCategory,
    /// Requested calendar date (YYYY-MM-DD)
    pub reservation_date: String,
    /// Requested time of day (HH:MM)
    pub reservation_time: String,
    pub adult_count: i64,
    pub child_count: i64,
    pub channel: BookingChannel,
    pub estimated_net_amount: f64,
    pub estimated_tax_amount: f64,
    pub estimated_service_charge: f64,
    pub estimated_discount_amount: f64,
    pub estimated_total_amount: f64,
    pub promo_code_id: Option<i64>,
    pub status: RequestStatus,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

impl ReservationRequest {
    pub fn party_size(&self) -> i64 {
        self.adult_count + self.child_count
    }
}

/// Intake payload for a new reservation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequestCreate {
    pub restaurant_id: i64,
    pub customer: CustomerUpsert,
    pub meal_category: MealCategory,
    pub reservation_date: String,
    pub reservation_time: String,
    pub adult_count: i64,
    pub child_count: i64,
    pub channel: BookingChannel,
    /// Raw promo code as entered (matched case-insensitively)
    pub promo_code: Option<String>,
}

/// Confirmed booking, created exactly once per request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    /// Idempotency key — unique reference to the originating request
    pub request_id: i64,
    pub restaurant_id: i64,
    pub customer_id: i64,
    /// Human-readable number, e.g. `L0714-0037`
    pub reservation_number: String,
    pub meal_category: MealCategory,
    pub reservation_date: String,
    pub reservation_time: String,
    pub adult_count: i64,
    pub child_count: i64,
    pub channel: BookingChannel,
    pub status: ReservationStatus,
    pub total_amount: f64,
    pub advance_payment_amount: f64,
    pub remaining_payment_amount: f64,
    pub applied_promo_code_id: Option<i64>,
    pub applied_discount_amount: f64,
    pub created_at: i64,
}

/// Financial breakdown, 1:1 with a reservation, created in the same transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationFinancial {
    pub id: i64,
    pub reservation_id: i64,
    pub net_price: f64,
    pub tax_amount: f64,
    pub service_charge: f64,
    pub discount_amount: f64,
    pub total_before_discount: f64,
    pub total_after_discount: f64,
    pub advance_payment: f64,
    pub balance_due: f64,
    pub is_paid: bool,
    pub created_at: i64,
}

/// Result of confirming a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationOutcome {
    pub id: i64,
    pub reservation_number: String,
    pub status: ReservationStatus,
}
