//! Promotion Validator — code resolution, eligibility, ceilings, usage recording

use crate::db::repository::{promo_code, reservation, RepoError};
use shared::models::{
    BookingChannel, MealCategory, PromoCode, PromoCodeCustomerMapping,
    PromoCodeRestaurantMapping, PromoCodeUsage, PromoCodeValidationData, UsageTotals,
};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

/// One promotion application, recorded atomically by [`PromotionValidator::record_usage`]
#[derive(Debug, Clone)]
pub struct UsageRecord {
    pub promo_code_id: i64,
    pub customer_id: i64,
    pub reservation_id: i64,
    pub request_id: i64,
    pub original_amount: f64,
    pub discount_amount: f64,
    pub party_size: i64,
    pub applied_by: BookingChannel,
}

#[derive(Clone)]
pub struct PromotionValidator {
    pool: SqlitePool,
}

impl PromotionValidator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve a raw code to a promotion and its eligibility for the
    /// given restaurant (and optional customer).
    ///
    /// Matching is case-insensitive. Unknown, inactive, deleted and
    /// out-of-window codes all surface the same generic not-found code
    /// so callers cannot probe promotion timing.
    pub async fn resolve_eligibility(
        &self,
        code: &str,
        restaurant_id: i64,
        customer_id: Option<i64>,
    ) -> AppResult<PromoCodeValidationData> {
        let normalized = code.trim().to_uppercase();
        let promo = promo_code::find_valid_by_code(&self.pool, &normalized, now_millis())
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::PromoCodeNotFound))?;

        let is_restaurant_eligible = match promo.campaign_type {
            shared::models::CampaignType::Platform => true,
            shared::models::CampaignType::Merchant => {
                promo_code::restaurant_mapping_exists(&self.pool, promo.id, restaurant_id).await?
            }
        };

        // A supplied customer id never restricts eligibility; customer
        // scoping is recorded but not evaluated here.
        let is_customer_eligible = true;

        let customer_reservation_count = match customer_id {
            Some(id) => reservation::count_customer_reservations(&self.pool, id).await?,
            None => 0,
        };

        Ok(PromoCodeValidationData {
            promo_code: promo,
            is_restaurant_eligible,
            is_customer_eligible,
            customer_reservation_count,
        })
    }

    /// Evaluate usage and party-size ceilings for one prospective application.
    pub async fn check_ceilings(
        &self,
        data: &PromoCodeValidationData,
        category: MealCategory,
        party_size: i64,
        customer_id: Option<i64>,
    ) -> AppResult<()> {
        let per_user = match customer_id {
            Some(id) => {
                promo_code::usage_totals_for_customer(&self.pool, data.promo_code.id, id).await?
            }
            None => UsageTotals::default(),
        };
        evaluate_ceilings(
            &data.promo_code,
            category,
            party_size,
            data.customer_reservation_count,
            per_user,
        )
    }

    /// Record one promotion application: balance decrement + promo stamp on
    /// the reservation, one ledger row, counter increments. All three writes
    /// commit together or not at all.
    pub async fn record_usage(&self, record: UsageRecord) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        reservation::apply_promo_discount(
            &mut *tx,
            record.reservation_id,
            record.promo_code_id,
            record.discount_amount,
        )
        .await
        .map_err(|err| match err {
            RepoError::NotFound(_) => AppError::new(ErrorCode::ReservationNotFound)
                .with_detail("reservation_id", record.reservation_id),
            other => other.into(),
        })?;

        let usage = PromoCodeUsage {
            id: snowflake_id(),
            promo_code_id: record.promo_code_id,
            customer_id: record.customer_id,
            reservation_id: record.reservation_id,
            request_id: record.request_id,
            original_amount: record.original_amount,
            discount_amount: record.discount_amount,
            party_size: record.party_size,
            applied_by: record.applied_by,
            created_at: now_millis(),
        };
        promo_code::insert_usage(&mut *tx, &usage).await?;

        promo_code::increment_counters(&mut *tx, record.promo_code_id, record.party_size)
            .await
            .map_err(|err| match err {
                RepoError::NotFound(_) => AppError::new(ErrorCode::PromoCodeNotFound),
                other => other.into(),
            })?;

        tx.commit().await.map_err(RepoError::from)?;
        tracing::info!(
            promo_code_id = record.promo_code_id,
            reservation_id = record.reservation_id,
            discount = record.discount_amount,
            "Recorded promotion usage"
        );
        Ok(())
    }

    /// Usage history of one customer against one code, newest first
    pub async fn usage_by_customer(
        &self,
        promo_code_id: i64,
        customer_id: i64,
    ) -> AppResult<Vec<PromoCodeUsage>> {
        Ok(promo_code::usage_by_customer(&self.pool, promo_code_id, customer_id).await?)
    }

    pub async fn restaurant_mappings(
        &self,
        promo_code_id: i64,
    ) -> AppResult<Vec<PromoCodeRestaurantMapping>> {
        Ok(promo_code::restaurant_mappings(&self.pool, promo_code_id).await?)
    }

    pub async fn customer_mappings(
        &self,
        promo_code_id: i64,
    ) -> AppResult<Vec<PromoCodeCustomerMapping>> {
        Ok(promo_code::customer_mappings(&self.pool, promo_code_id).await?)
    }
}

/// Pure ceiling evaluation over already-fetched counters.
fn evaluate_ceilings(
    promo: &PromoCode,
    category: MealCategory,
    party_size: i64,
    customer_reservation_count: i64,
    per_user: UsageTotals,
) -> AppResult<()> {
    if !promo.category_allows(category) {
        return Err(AppError::with_message(
            ErrorCode::PromoCodeNotApplicable,
            "Promo code does not apply to this meal service",
        ));
    }
    if promo.first_order_only && customer_reservation_count > 0 {
        return Err(AppError::with_message(
            ErrorCode::PromoCodeNotApplicable,
            "Promo code is limited to first orders",
        ));
    }
    if let Some(max) = promo.max_uses_total {
        if promo.times_used >= max {
            return Err(AppError::new(ErrorCode::PromoCodeLimitReached));
        }
    }
    if let Some(max) = promo.max_party_size_total {
        if promo.party_size_used + party_size > max {
            return Err(AppError::new(ErrorCode::PromoCodeLimitReached));
        }
    }
    if let Some(max) = promo.max_uses_per_user {
        if per_user.uses >= max {
            return Err(AppError::new(ErrorCode::PromoCodeLimitReached));
        }
    }
    if let Some(max) = promo.max_party_size_per_user {
        if per_user.party_size + party_size > max {
            return Err(AppError::new(ErrorCode::PromoCodeLimitReached));
        }
    }
    Ok(())
}
