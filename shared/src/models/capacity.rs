//! Capacity Model — seat ledger and availability views

use super::restaurant::QuotaConfig;
use serde::{Deserialize, Serialize};

/// Seat ledger for one restaurant + meal service + calendar date
///
/// `booked_seats` bounds are NOT enforced here: the core tolerates values
/// temporarily exceeding `total_seats` or going negative. Write validation
/// is a caller responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ServiceCapacity {
    pub id: i64,
    pub restaurant_id: i64,
    pub meal_service_id: i64,
    /// Calendar date (YYYY-MM-DD)
    pub capacity_date: String,
    pub total_seats: i64,
    pub booked_seats: i64,
    pub is_enabled: bool,
}

impl ServiceCapacity {
    /// Raw remaining-seat view (`total - booked`, may be negative)
    pub fn remaining_seats(&self) -> i64 {
        self.total_seats - self.booked_seats
    }
}

/// Create capacity record payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCapacityCreate {
    pub restaurant_id: i64,
    pub meal_service_id: i64,
    pub capacity_date: String,
    pub total_seats: i64,
}

/// One bookable time point emitted by the slot generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailability {
    /// Time of day (HH:MM)
    pub time: String,
    pub available: bool,
    pub available_seats: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Confirmed covers per booking channel for one date + meal service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBookings {
    pub online: i64,
    pub manual: i64,
    pub total: i64,
}

/// Channel-level availability report for one restaurant + date + meal category
///
/// `total_available` is computed from the raw capacity record, independently
/// of the channel split; the two views can legitimately disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaAvailability {
    pub total_available: i64,
    pub online_available: i64,
    pub manual_available: i64,
    pub current_bookings: ChannelBookings,
    pub quota_info: QuotaConfig,
}
