//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity with its channel quota configuration
///
/// `total_capacity` / `online_quota` form the per-restaurant quota config;
/// the manual quota is always derived (`total - online`), never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub total_capacity: Option<i64>,
    pub online_quota: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Restaurant {
    /// Derived quota view. `None` when the restaurant has no quota config.
    pub fn quota_config(&self) -> Option<QuotaConfig> {
        match (self.total_capacity, self.online_quota) {
            (Some(total), Some(online)) => Some(QuotaConfig {
                total_capacity: total,
                online_quota: online,
                manual_quota: total - online,
            }),
            _ => None,
        }
    }
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub total_capacity: Option<i64>,
    pub online_quota: Option<i64>,
}

/// Channel quota split for one restaurant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuotaConfig {
    pub total_capacity: i64,
    pub online_quota: i64,
    /// Always `total_capacity - online_quota`
    pub manual_quota: i64,
}

/// Weekly operating-hours entry, one per restaurant + weekday
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OperatingHours {
    pub id: i64,
    pub restaurant_id: i64,
    /// Uppercase weekday name (MONDAY .. SUNDAY)
    pub weekday: String,
    /// Opening time of day (HH:MM)
    pub open_time: String,
    /// Closing time of day (HH:MM)
    pub close_time: String,
    pub is_closed: bool,
}

/// Special-closure interval, inclusive on both bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SpecialClosure {
    pub id: i64,
    pub restaurant_id: i64,
    /// First closed date (YYYY-MM-DD, inclusive)
    pub start_date: String,
    /// Last closed date (YYYY-MM-DD, inclusive)
    pub end_date: String,
    pub reason: Option<String>,
}

/// Calendar gate verdict for one restaurant + date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayStatus {
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DayStatus {
    pub fn open() -> Self {
        Self {
            open: true,
            reason: None,
        }
    }

    pub fn closed(reason: impl Into<String>) -> Self {
        Self {
            open: false,
            reason: Some(reason.into()),
        }
    }
}
