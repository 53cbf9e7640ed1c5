//! Slot Generator — bookable time points for one day and meal service
//!
//! Availability degrades to an empty sequence rather than an error when
//! the day is closed, no active meal service exists, or no seat figure
//! can be derived. Each call recomputes from scratch; no state is kept
//! between calls.

use crate::availability::calendar::CalendarGate;
use crate::db::repository::{capacity, meal_service, restaurant};
use crate::utils::time::{format_time, parse_time};
use chrono::{Duration, NaiveDate};
use shared::models::{MealCategory, SlotAvailability};
use shared::AppResult;
use sqlx::SqlitePool;

const SLOT_STEP_MINUTES: i64 = 30;
const NOT_ENOUGH_SEATS: &str = "Not enough seats available";

#[derive(Clone)]
pub struct SlotGenerator {
    pool: SqlitePool,
    gate: CalendarGate,
}

impl SlotGenerator {
    pub fn new(pool: SqlitePool) -> Self {
        let gate = CalendarGate::new(pool.clone());
        Self { pool, gate }
    }

    /// Bookable time points for `restaurant_id` on `date` for the given
    /// meal category, stepped at 30-minute intervals over the service
    /// window (`current < close`, the close time itself is never a slot).
    ///
    /// Seats per slot come from the day's capacity record
    /// (`total_seats - booked_seats`); without a capacity record the
    /// restaurant's online quota stands in. Without either, the day is
    /// treated as closed.
    pub async fn generate_slots(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
        category: MealCategory,
        party_size: i64,
    ) -> AppResult<Vec<SlotAvailability>> {
        let status = self.gate.is_bookable(restaurant_id, date).await?;
        if !status.open {
            tracing::debug!(restaurant_id, %date, ?status.reason, "Day not bookable");
            return Ok(Vec::new());
        }

        let Some(service) =
            meal_service::find_active(&self.pool, restaurant_id, category).await?
        else {
            return Ok(Vec::new());
        };

        let open = parse_time(&service.start_time)?;
        let close = parse_time(&service.end_time)?;
        if open >= close {
            return Ok(Vec::new());
        }

        let date_str = date.format("%Y-%m-%d").to_string();
        let seats = match capacity::find_for_date(&self.pool, service.id, &date_str).await? {
            Some(record) => record.remaining_seats(),
            None => {
                let fallback = restaurant::find_by_id(&self.pool, restaurant_id)
                    .await?
                    .and_then(|r| r.online_quota);
                match fallback {
                    Some(quota) => quota,
                    None => return Ok(Vec::new()),
                }
            }
        };

        let mut slots = Vec::new();
        let mut current = open;
        while current < close {
            let available = seats >= party_size;
            slots.push(SlotAvailability {
                time: format_time(current),
                available,
                available_seats: seats,
                reason: (!available).then(|| NOT_ENOUGH_SEATS.to_string()),
            });
            current += Duration::minutes(SLOT_STEP_MINUTES);
        }
        Ok(slots)
    }
}
