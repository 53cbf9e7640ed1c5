//! Quota Allocator — channel-level seat accounting
//!
//! Splits a restaurant's seat pool into the online and manual channel
//! quotas and reports remaining seats per channel. The total view is
//! computed from the raw capacity record, independently of the channel
//! split; the two figures are allowed to disagree.

use crate::db::repository::{capacity, meal_service, reservation, restaurant};
use chrono::NaiveDate;
use shared::models::{BookingChannel, ChannelBookings, MealCategory, QuotaAvailability, QuotaConfig, ServiceCapacity};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct QuotaAllocator {
    pool: SqlitePool,
}

impl QuotaAllocator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Per-channel and total remaining seats for one restaurant + date +
    /// meal category.
    ///
    /// Missing restaurant, active meal service, or capacity record each
    /// surface their own not-found code.
    pub async fn quota_availability(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
        category: MealCategory,
    ) -> AppResult<QuotaAvailability> {
        let restaurant = restaurant::find_by_id(&self.pool, restaurant_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::RestaurantNotFound)
                    .with_detail("restaurant_id", restaurant_id)
            })?;

        let service = meal_service::find_active(&self.pool, restaurant_id, category)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::MealServiceNotFound)
                    .with_detail("restaurant_id", restaurant_id)
                    .with_detail("category", category.as_str())
            })?;

        let date_str = date.format("%Y-%m-%d").to_string();
        let record = capacity::find_for_date(&self.pool, service.id, &date_str)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::CapacityRecordNotFound)
                    .with_detail("meal_service_id", service.id)
                    .with_detail("date", date_str.clone())
            })?;

        // A restaurant without quota config still reports: both channel
        // quotas read as zero and only the ledger-based total remains.
        let quota_info = restaurant.quota_config().unwrap_or(QuotaConfig {
            total_capacity: 0,
            online_quota: 0,
            manual_quota: 0,
        });

        let online = reservation::channel_covers(
            &self.pool,
            restaurant_id,
            &date_str,
            category,
            BookingChannel::Customer,
        )
        .await?;
        let manual = reservation::channel_covers(
            &self.pool,
            restaurant_id,
            &date_str,
            category,
            BookingChannel::Staff,
        )
        .await?;

        Ok(QuotaAvailability {
            total_available: record.remaining_seats(),
            online_available: (quota_info.online_quota - online).max(0),
            manual_available: (quota_info.manual_quota - manual).max(0),
            current_bookings: ChannelBookings {
                online,
                manual,
                total: online + manual,
            },
            quota_info,
        })
    }

    /// Absolute assignment of a capacity record's `booked_seats`.
    ///
    /// Last write wins; no bound or version check. Policy lives with the
    /// caller, this is mechanism only.
    pub async fn set_booked_seats(
        &self,
        capacity_id: i64,
        booked_seats: i64,
    ) -> AppResult<ServiceCapacity> {
        capacity::set_booked_seats(&self.pool, capacity_id, booked_seats)
            .await
            .map_err(|err| match err {
                crate::db::repository::RepoError::NotFound(_) => {
                    AppError::new(ErrorCode::CapacityRecordNotFound)
                        .with_detail("capacity_id", capacity_id)
                }
                other => other.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    async fn seed(pool: &SqlitePool) {
        sqlx::query("INSERT INTO restaurant (id, name, total_capacity, online_quota) VALUES (1, 'Mar Azul', 100, 60)")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO meal_service (id, restaurant_id, category, start_time, end_time, is_active, net_price_per_head, gross_price_per_head, tax_pct, service_charge_pct) VALUES \
             (20, 1, 'LUNCH', '11:00', '14:00', 1, 25.0, 30.25, 10.0, 11.0)",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO service_capacity (id, restaurant_id, meal_service_id, capacity_date, total_seats, booked_seats, is_enabled) VALUES \
             (30, 1, 20, '2025-07-14', 100, 65, 1)",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO customer (id, name, phone) VALUES (40, 'Ana', '+34600000001')")
            .execute(pool)
            .await
            .unwrap();
    }

    async fn seed_reservation(pool: &SqlitePool, id: i64, channel: &str, party: i64, status: &str) {
        sqlx::query(
            "INSERT INTO reservation_request (id, restaurant_id, customer_id, meal_category, reservation_date, reservation_time, adult_count, child_count, channel, status, created_at) \
             VALUES (?1, 1, 40, 'LUNCH', '2025-07-14', '12:00', ?2, 0, ?3, 'COMPLETED', 0)",
        )
        .bind(id)
        .bind(party)
        .bind(channel)
        .execute(pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO reservation (id, request_id, restaurant_id, customer_id, reservation_number, meal_category, \
             reservation_date, reservation_time, adult_count, child_count, channel, total_amount, \
             advance_payment_amount, remaining_payment_amount, status) \
             VALUES (?1, ?1, 1, 40, 'L0714-0001', 'LUNCH', '2025-07-14', '12:00', ?2, 0, ?3, 100.0, 0, 100.0, ?4)",
        )
        .bind(id)
        .bind(party)
        .bind(channel)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 14).unwrap()
    }

    #[tokio::test]
    async fn test_channel_split() {
        let pool = memory_pool().await;
        seed(&pool).await;
        seed_reservation(&pool, 100, "CUSTOMER", 55, "CONFIRMED").await;
        seed_reservation(&pool, 101, "STAFF", 10, "CONFIRMED").await;
        let allocator = QuotaAllocator::new(pool);

        let report = allocator
            .quota_availability(1, date(), MealCategory::Lunch)
            .await
            .unwrap();

        assert_eq!(report.quota_info.manual_quota, 40);
        assert_eq!(report.online_available, 5);
        assert_eq!(report.manual_available, 30);
        assert_eq!(
            report.current_bookings,
            ChannelBookings {
                online: 55,
                manual: 10,
                total: 65
            }
        );
        // Independent of the channel split: 100 - 65 from the ledger row
        assert_eq!(report.total_available, 35);
    }

    #[tokio::test]
    async fn test_cancelled_and_rejected_excluded() {
        let pool = memory_pool().await;
        seed(&pool).await;
        seed_reservation(&pool, 100, "CUSTOMER", 20, "CONFIRMED").await;
        seed_reservation(&pool, 101, "CUSTOMER", 30, "CANCELLED").await;
        seed_reservation(&pool, 102, "STAFF", 15, "REJECTED").await;
        let allocator = QuotaAllocator::new(pool);

        let report = allocator
            .quota_availability(1, date(), MealCategory::Lunch)
            .await
            .unwrap();

        assert_eq!(report.current_bookings.online, 20);
        assert_eq!(report.current_bookings.manual, 0);
    }

    #[tokio::test]
    async fn test_channel_availability_clamped_at_zero() {
        let pool = memory_pool().await;
        seed(&pool).await;
        seed_reservation(&pool, 100, "CUSTOMER", 70, "CONFIRMED").await;
        let allocator = QuotaAllocator::new(pool);

        let report = allocator
            .quota_availability(1, date(), MealCategory::Lunch)
            .await
            .unwrap();

        // 70 online covers against a quota of 60
        assert_eq!(report.online_available, 0);
    }

    #[tokio::test]
    async fn test_views_may_disagree() {
        let pool = memory_pool().await;
        seed(&pool).await;
        // Ledger says 65 booked but no reservation rows back it
        let allocator = QuotaAllocator::new(pool);

        let report = allocator
            .quota_availability(1, date(), MealCategory::Lunch)
            .await
            .unwrap();

        assert_eq!(report.total_available, 35);
        assert_eq!(report.online_available, 60);
        assert_eq!(report.manual_available, 40);
    }

    #[tokio::test]
    async fn test_missing_quota_config_reports_zero_channels() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO restaurant (id, name) VALUES (2, 'Sin Cupo')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO meal_service (id, restaurant_id, category, start_time, end_time, is_active, net_price_per_head, gross_price_per_head, tax_pct, service_charge_pct) VALUES \
             (21, 2, 'LUNCH', '11:00', '14:00', 1, 25.0, 30.25, 10.0, 11.0)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO service_capacity (id, restaurant_id, meal_service_id, capacity_date, total_seats, booked_seats, is_enabled) VALUES \
             (31, 2, 21, '2025-07-14', 50, 10, 1)",
        )
        .execute(&pool)
        .await
        .unwrap();
        let allocator = QuotaAllocator::new(pool);

        let report = allocator
            .quota_availability(2, date(), MealCategory::Lunch)
            .await
            .unwrap();

        // NULL quota columns: channels collapse to zero, the ledger-based
        // total still stands on its own.
        assert_eq!(report.quota_info.total_capacity, 0);
        assert_eq!(report.online_available, 0);
        assert_eq!(report.manual_available, 0);
        assert_eq!(report.total_available, 40);
    }

    #[tokio::test]
    async fn test_missing_pieces_have_distinct_codes() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let allocator = QuotaAllocator::new(pool);

        let err = allocator
            .quota_availability(999, date(), MealCategory::Lunch)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);

        let err = allocator
            .quota_availability(1, date(), MealCategory::Dinner)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MealServiceNotFound);

        let other_day = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let err = allocator
            .quota_availability(1, other_day, MealCategory::Lunch)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityRecordNotFound);
    }

    #[tokio::test]
    async fn test_set_booked_seats_absolute() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let allocator = QuotaAllocator::new(pool);

        let record = allocator.set_booked_seats(30, 80).await.unwrap();
        assert_eq!(record.booked_seats, 80);

        // Unconditional assignment, including out-of-range values
        let record = allocator.set_booked_seats(30, 400).await.unwrap();
        assert_eq!(record.booked_seats, 400);

        let err = allocator.set_booked_seats(999, 10).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityRecordNotFound);
    }
}
