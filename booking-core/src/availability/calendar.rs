//! Calendar Gate — is a restaurant open at all on a given date?
//!
//! Combines the weekly schedule with special-closure intervals. A closure
//! match wins over the weekly schedule. No side effects; the only
//! exceptional outcome is an unknown restaurant.

use crate::db::repository::restaurant;
use crate::utils::time::weekday_name;
use chrono::NaiveDate;
use shared::models::DayStatus;
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct CalendarGate {
    pool: SqlitePool,
}

impl CalendarGate {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether `restaurant_id` accepts bookings on `date`.
    ///
    /// Closed or missing weekly entry means not bookable; any special
    /// closure covering the date (bounds inclusive) means not bookable
    /// regardless of the weekly schedule.
    pub async fn is_bookable(&self, restaurant_id: i64, date: NaiveDate) -> AppResult<DayStatus> {
        let restaurant = restaurant::find_by_id(&self.pool, restaurant_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::RestaurantNotFound)
                    .with_detail("restaurant_id", restaurant_id)
            })?;

        let date_str = date.format("%Y-%m-%d").to_string();
        let closures =
            restaurant::closures_covering(&self.pool, restaurant.id, &date_str).await?;
        if let Some(closure) = closures.first() {
            let reason = closure
                .reason
                .clone()
                .unwrap_or_else(|| "Closed for a scheduled period".to_string());
            tracing::debug!(restaurant_id, date = %date_str, "Blocked by special closure");
            return Ok(DayStatus::closed(reason));
        }

        let weekday = weekday_name(date);
        match restaurant::hours_for_weekday(&self.pool, restaurant.id, weekday).await? {
            Some(hours) if !hours.is_closed => Ok(DayStatus::open()),
            _ => Ok(DayStatus::closed(format!("Closed on {weekday}"))),
        }
    }
}
