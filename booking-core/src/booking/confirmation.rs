//! Confirmation Coordinator — the write path from PENDING request to
//! confirmed reservation
//!
//! All writes happen in one transaction: reservation insert, financial
//! insert, request completion, and (when a promotion was applied at
//! intake) the three usage-recording writes. Any failure rolls the whole
//! unit back, leaving the request PENDING and retryable.

use crate::db::repository::{promo_code, reservation, RepoError};
use crate::utils::time::parse_date;
use chrono::Datelike;
use shared::models::{
    ConfirmationOutcome, PromoCodeUsage, Reservation, ReservationFinancial, ReservationRequest,
    ReservationStatus,
};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ConfirmationCoordinator {
    pool: SqlitePool,
}

impl ConfirmationCoordinator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Confirm a pending request, idempotently.
    ///
    /// A request that already produced a reservation returns that
    /// reservation's outcome unchanged; nothing is re-inserted and no
    /// counter moves twice.
    pub async fn confirm(&self, request_id: i64) -> AppResult<ConfirmationOutcome> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        let request = reservation::find_request(&mut *tx, request_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::ReservationRequestNotFound)
                    .with_detail("request_id", request_id)
            })?;

        if let Some(existing) = reservation::find_reservation_by_request(&mut *tx, request_id).await?
        {
            tracing::debug!(request_id, reservation_id = existing.id, "Already confirmed");
            return Ok(ConfirmationOutcome {
                id: existing.id,
                reservation_number: existing.reservation_number,
                status: existing.status,
            });
        }

        let number = reservation_number(&request)?;
        let now = now_millis();
        let total = request.estimated_total_amount;

        let booking = Reservation {
            id: snowflake_id(),
            request_id: request.id,
            restaurant_id: request.restaurant_id,
            customer_id: request.customer_id,
            reservation_number: number.clone(),
            meal_category: request.meal_category,
            reservation_date: request.reservation_date.clone(),
            reservation_time: request.reservation_time.clone(),
            adult_count: request.adult_count,
            child_count: request.child_count,
            channel: request.channel,
            status: ReservationStatus::Confirmed,
            total_amount: total,
            advance_payment_amount: 0.0,
            remaining_payment_amount: total,
            applied_promo_code_id: None,
            applied_discount_amount: 0.0,
            created_at: now,
        };
        reservation::insert_reservation(&mut *tx, &booking).await?;

        let discount = request.estimated_discount_amount;
        let financial = ReservationFinancial {
            id: snowflake_id(),
            reservation_id: booking.id,
            net_price: total - request.estimated_service_charge - request.estimated_tax_amount,
            tax_amount: request.estimated_tax_amount,
            service_charge: request.estimated_service_charge,
            discount_amount: discount,
            total_before_discount: total + discount,
            total_after_discount: total,
            advance_payment: 0.0,
            balance_due: total,
            is_paid: false,
            created_at: now,
        };
        reservation::insert_financial(&mut *tx, &financial).await?;

        reservation::complete_request(&mut *tx, request.id, now).await?;

        if let Some(promo_id) = request.promo_code_id {
            if discount > 0.0 {
                reservation::apply_promo_discount(&mut *tx, booking.id, promo_id, discount)
                    .await?;
                let usage = PromoCodeUsage {
                    id: snowflake_id(),
                    promo_code_id: promo_id,
                    customer_id: request.customer_id,
                    reservation_id: booking.id,
                    request_id: request.id,
                    original_amount: total + discount,
                    discount_amount: discount,
                    party_size: request.party_size(),
                    applied_by: request.channel,
                    created_at: now,
                };
                promo_code::insert_usage(&mut *tx, &usage).await?;
                promo_code::increment_counters(&mut *tx, promo_id, request.party_size()).await?;
            }
        }

        tx.commit().await.map_err(RepoError::from)?;
        tracing::info!(
            request_id,
            reservation_id = booking.id,
            number = %number,
            "Confirmed reservation"
        );
        Ok(ConfirmationOutcome {
            id: booking.id,
            reservation_number: number,
            status: ReservationStatus::Confirmed,
        })
    }

    /// Fetch one reservation by id
    pub async fn find_reservation(&self, id: i64) -> AppResult<Reservation> {
        reservation::find_reservation_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::ReservationNotFound).with_detail("reservation_id", id)
            })
    }

    /// Financial breakdown of one reservation
    pub async fn find_financial(&self, reservation_id: i64) -> AppResult<ReservationFinancial> {
        reservation::find_financial(&self.pool, reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::ReservationNotFound)
                    .with_detail("reservation_id", reservation_id)
            })
    }
}

/// Deterministic reservation number: meal-category initial, month and day
/// of the requested date, then the last four digits of the request id.
/// Example: `L0714-0037`.
fn reservation_number(request: &ReservationRequest) -> AppResult<String> {
    let date = parse_date(&request.reservation_date)?;
    Ok(format!(
        "{}{:02}{:02}-{:04}",
        request.meal_category.initial(),
        date.month(),
        date.day(),
        request.id % 10_000
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use shared::models::RequestStatus;

    async fn seed(pool: &SqlitePool) {
        sqlx::query("INSERT INTO restaurant (id, name, total_capacity, online_quota) VALUES (1, 'Mar Azul', 100, 60)")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO customer (id, name, phone) VALUES (40, 'Ana', '+34600000001')")
            .execute(pool)
            .await
            .unwrap();
    }

    async fn seed_request(pool: &SqlitePool, id: i64, promo_code_id: Option<i64>, discount: f64) {
        let total = 121.0 - discount;
        sqlx::query(
            "INSERT INTO reservation_request (id, restaurant_id, customer_id, meal_category, reservation_date, reservation_time, adult_count, child_count, channel, estimated_net_amount, estimated_tax_amount, estimated_service_charge, estimated_discount_amount, estimated_total_amount, promo_code_id, status, created_at) \
             VALUES (?1, 1, 40, 'LUNCH', '2025-07-14', '12:00', 3, 1, 'CUSTOMER', 100.0, 10.0, 11.0, ?2, ?3, ?4, 'PENDING', 0)",
        )
        .bind(id)
        .bind(discount)
        .bind(total)
        .bind(promo_code_id)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_confirm_materializes_reservation() {
        let pool = memory_pool().await;
        seed(&pool).await;
        seed_request(&pool, 37, None, 0.0).await;
        let coordinator = ConfirmationCoordinator::new(pool.clone());

        let outcome = coordinator.confirm(37).await.unwrap();
        assert_eq!(outcome.reservation_number, "L0714-0037");
        assert_eq!(outcome.status, ReservationStatus::Confirmed);

        let booking = coordinator.find_reservation(outcome.id).await.unwrap();
        assert_eq!(booking.request_id, 37);
        assert_eq!(booking.total_amount, 121.0);
        assert_eq!(booking.advance_payment_amount, 0.0);
        assert_eq!(booking.remaining_payment_amount, 121.0);

        let financial = coordinator.find_financial(outcome.id).await.unwrap();
        assert_eq!(financial.net_price, 100.0);
        assert_eq!(financial.total_before_discount, 121.0);
        assert_eq!(financial.total_after_discount, 121.0);
        assert_eq!(financial.balance_due, 121.0);
        assert!(!financial.is_paid);

        let request = reservation::find_request(&pool, 37).await.unwrap().unwrap();
        assert_eq!(request.status, RequestStatus::Completed);
        assert!(request.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_confirm_is_idempotent() {
        let pool = memory_pool().await;
        seed(&pool).await;
        seed_request(&pool, 37, None, 0.0).await;
        let coordinator = ConfirmationCoordinator::new(pool.clone());

        let first = coordinator.confirm(37).await.unwrap();
        let second = coordinator.confirm(37).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.reservation_number, second.reservation_number);
        assert_eq!(first.status, second.status);

        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reservation WHERE request_id = 37")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count.0, 1);
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservation_financial")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_number_uses_last_four_digits() {
        let pool = memory_pool().await;
        seed(&pool).await;
        seed_request(&pool, 123_456_789, None, 0.0).await;
        let coordinator = ConfirmationCoordinator::new(pool);

        let outcome = coordinator.confirm(123_456_789).await.unwrap();
        assert_eq!(outcome.reservation_number, "L0714-6789");
    }

    #[tokio::test]
    async fn test_unknown_request() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let coordinator = ConfirmationCoordinator::new(pool);

        let err = coordinator.confirm(999).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationRequestNotFound);
    }

    #[tokio::test]
    async fn test_confirm_records_promotion_usage() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let promo = promo_code::create(
            &pool,
            shared::models::PromoCodeCreate {
                code: "SAVE20".into(),
                description: None,
                discount_type: shared::models::DiscountType::Percentage,
                discount_value: 20.0,
                max_discount_amount: None,
                min_order_amount: None,
                valid_from: 0,
                valid_until: i64::MAX,
                max_uses_total: None,
                max_uses_per_user: None,
                max_party_size_total: None,
                max_party_size_per_user: None,
                eligible_categories: None,
                first_order_only: false,
                campaign_type: shared::models::CampaignType::Platform,
            },
        )
        .await
        .unwrap();
        seed_request(&pool, 37, Some(promo.id), 24.2).await;
        let coordinator = ConfirmationCoordinator::new(pool.clone());

        let outcome = coordinator.confirm(37).await.unwrap();

        let booking = coordinator.find_reservation(outcome.id).await.unwrap();
        assert_eq!(booking.applied_promo_code_id, Some(promo.id));
        assert!((booking.applied_discount_amount - 24.2).abs() < 1e-9);
        // Balance after the usage-recording decrement
        assert!((booking.remaining_payment_amount - (96.8 - 24.2)).abs() < 1e-9);

        let promo = promo_code::find_by_id(&pool, promo.id).await.unwrap().unwrap();
        assert_eq!(promo.times_used, 1);
        assert_eq!(promo.party_size_used, 4);

        let usage = promo_code::usage_by_customer(&pool, promo.id, 40)
            .await
            .unwrap();
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].request_id, 37);
        assert!((usage[0].original_amount - 121.0).abs() < 1e-9);

        // Re-confirming does not move the counters again
        coordinator.confirm(37).await.unwrap();
        let promo = promo_code::find_by_id(&pool, promo.id).await.unwrap().unwrap();
        assert_eq!(promo.times_used, 1);
    }
}
