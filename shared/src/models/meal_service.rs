//! Meal Service Model

use serde::{Deserialize, Serialize};

/// Named dining period (breakfast / lunch / dinner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "BREAKFAST",
            Self::Lunch => "LUNCH",
            Self::Dinner => "DINNER",
        }
    }

    /// Uppercase first letter, used as the reservation number prefix
    pub fn initial(&self) -> char {
        match self {
            Self::Breakfast => 'B',
            Self::Lunch => 'L',
            Self::Dinner => 'D',
        }
    }
}

impl std::fmt::Display for MealCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meal service entity — one dining period of a restaurant with its own
/// hours, per-head pricing and seat pool.
///
/// Read-only to the booking core; immutable during a booking transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MealService {
    pub id: i64,
    pub restaurant_id: i64,
    pub category: MealCategory,
    /// Service opening time of day (HH:MM)
    pub start_time: String,
    /// Service closing time of day (HH:MM)
    pub end_time: String,
    pub is_active: bool,
    pub net_price_per_head: f64,
    pub gross_price_per_head: f64,
    /// Tax percentage applied to the net amount
    pub tax_pct: f64,
    /// Service-charge percentage applied to the net amount
    pub service_charge_pct: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create meal service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealServiceCreate {
    pub restaurant_id: i64,
    pub category: MealCategory,
    pub start_time: String,
    pub end_time: String,
    pub net_price_per_head: f64,
    pub gross_price_per_head: f64,
    pub tax_pct: f64,
    pub service_charge_pct: f64,
}
