//! Request intake — builds PENDING reservation requests with estimated pricing

use crate::db::repository::{customer, meal_service, restaurant, reservation};
use crate::promotions::{discount_for, PromotionValidator};
use crate::utils::time::{parse_date, parse_time, validate_not_past};
use chrono_tz::Tz;
use shared::models::{RequestStatus, ReservationRequest, ReservationRequestCreate};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

pub struct RequestService {
    pool: SqlitePool,
    validator: PromotionValidator,
    tz: Tz,
}

impl RequestService {
    pub fn new(pool: SqlitePool, tz: Tz) -> Self {
        let validator = PromotionValidator::new(pool.clone());
        Self {
            pool,
            validator,
            tz,
        }
    }

    /// Create a PENDING reservation request.
    ///
    /// Prices are estimates derived from the meal service's per-head net
    /// price plus its tax and service-charge percentages; a valid promo
    /// code reduces the estimated total and is stamped on the request for
    /// the confirmation step to settle.
    pub async fn create_request(
        &self,
        data: ReservationRequestCreate,
    ) -> AppResult<ReservationRequest> {
        if data.adult_count < 1 {
            return Err(AppError::validation("At least one adult is required"));
        }
        if data.child_count < 0 {
            return Err(AppError::validation("Child count cannot be negative"));
        }
        let date = parse_date(&data.reservation_date)?;
        validate_not_past(date, self.tz)?;
        parse_time(&data.reservation_time)?;

        restaurant::find_by_id(&self.pool, data.restaurant_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::RestaurantNotFound)
                    .with_detail("restaurant_id", data.restaurant_id)
            })?;
        let service =
            meal_service::find_active(&self.pool, data.restaurant_id, data.meal_category)
                .await?
                .ok_or_else(|| {
                    AppError::new(ErrorCode::MealServiceNotFound)
                        .with_detail("category", data.meal_category.as_str())
                })?;

        let guest = customer::upsert_by_phone(&self.pool, data.customer).await?;

        let party = data.adult_count + data.child_count;
        let net = service.net_price_per_head * party as f64;
        let tax = net * service.tax_pct / 100.0;
        let service_charge = net * service.service_charge_pct / 100.0;
        let subtotal = net + tax + service_charge;

        let (promo_code_id, discount) = match &data.promo_code {
            Some(code) => {
                let validation = self
                    .validator
                    .resolve_eligibility(code, data.restaurant_id, Some(guest.id))
                    .await?;
                if !validation.is_restaurant_eligible {
                    return Err(AppError::with_message(
                        ErrorCode::PromoCodeNotApplicable,
                        "Promo code is not valid at this restaurant",
                    ));
                }
                self.validator
                    .check_ceilings(&validation, data.meal_category, party, Some(guest.id))
                    .await?;
                let discount = discount_for(&validation.promo_code, subtotal);
                (Some(validation.promo_code.id), discount)
            }
            None => (None, 0.0),
        };

        let request = ReservationRequest {
            id: snowflake_id(),
            restaurant_id: data.restaurant_id,
            customer_id: guest.id,
            meal_category: data.meal_category,
            reservation_date: data.reservation_date,
            reservation_time: data.reservation_time,
            adult_count: data.adult_count,
            child_count: data.child_count,
            channel: data.channel,
            estimated_net_amount: net,
            estimated_tax_amount: tax,
            estimated_service_charge: service_charge,
            estimated_discount_amount: discount,
            estimated_total_amount: subtotal - discount,
            promo_code_id,
            status: RequestStatus::Pending,
            created_at: now_millis(),
            completed_at: None,
        };
        let created = reservation::insert_request(&self.pool, &request).await?;
        tracing::info!(
            request_id = created.id,
            restaurant_id = created.restaurant_id,
            party,
            "Created reservation request"
        );
        Ok(created)
    }

    /// Fetch one request by id
    pub async fn find_request(&self, id: i64) -> AppResult<ReservationRequest> {
        reservation::find_request(&self.pool, id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::ReservationRequestNotFound).with_detail("request_id", id)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use shared::models::{
        BookingChannel, CampaignType, CustomerUpsert, DiscountType, MealCategory, PromoCodeCreate,
    };

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
    }

    fn payload() -> ReservationRequestCreate {
        ReservationRequestCreate {
            restaurant_id: 1,
            customer: CustomerUpsert {
                name: "Ana".into(),
                phone: "+34600000001".into(),
                email: None,
            },
            meal_category: MealCategory::Lunch,
            reservation_date: "2030-07-14".into(),
            reservation_time: "12:00".into(),
            adult_count: 3,
            child_count: 1,
            channel: BookingChannel::Customer,
            promo_code: None,
        }
    }

    #[tokio::test]
    async fn test_create_request_pricing() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let service = RequestService::new(pool, chrono_tz::Tz::UTC);

        let request = service.create_request(payload()).await.unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.party_size(), 4);
        // 4 heads at 25.00 net, 10% tax, 11% service charge
        assert_eq!(request.estimated_net_amount, 100.0);
        assert_eq!(request.estimated_tax_amount, 10.0);
        assert_eq!(request.estimated_service_charge, 11.0);
        assert_eq!(request.estimated_discount_amount, 0.0);
        assert_eq!(request.estimated_total_amount, 121.0);
        assert!(request.promo_code_id.is_none());
        assert!(request.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_create_request_with_promo() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let promo = crate::db::repository::promo_code::create(
            &pool,
            PromoCodeCreate {
                code: "save20".into(),
                description: None,
                discount_type: DiscountType::Percentage,
                discount_value: 20.0,
                max_discount_amount: Some(30.0),
                min_order_amount: None,
                valid_from: 0,
                valid_until: i64::MAX,
                max_uses_total: None,
                max_uses_per_user: None,
                max_party_size_total: None,
                max_party_size_per_user: None,
                eligible_categories: None,
                first_order_only: false,
                campaign_type: CampaignType::Platform,
            },
        )
        .await
        .unwrap();
        let service = RequestService::new(pool, chrono_tz::Tz::UTC);

        let mut data = payload();
        data.promo_code = Some("SAVE20".into());
        let request = service.create_request(data).await.unwrap();

        // 20% of 121.00 is 24.20, under the 30.00 cap
        assert_eq!(request.promo_code_id, Some(promo.id));
        assert!((request.estimated_discount_amount - 24.2).abs() < 1e-9);
        assert!((request.estimated_total_amount - 96.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_rejects_bad_party_and_past_date() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let service = RequestService::new(pool, chrono_tz::Tz::UTC);

        let mut data = payload();
        data.adult_count = 0;
        let err = service.create_request(data).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let mut data = payload();
        data.reservation_date = "2020-01-01".into();
        let err = service.create_request(data).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_missing_restaurant_and_service() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let service = RequestService::new(pool, chrono_tz::Tz::UTC);

        let mut data = payload();
        data.restaurant_id = 999;
        let err = service.create_request(data).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);

        let mut data = payload();
        data.meal_category = MealCategory::Dinner;
        let err = service.create_request(data).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MealServiceNotFound);
    }

    #[tokio::test]
    async fn test_unknown_promo_fails_the_request() {
        let pool = memory_pool().await;
        seed(&pool).await;
        let service = RequestService::new(pool, chrono_tz::Tz::UTC);

        let mut data = payload();
        data.promo_code = Some("NOSUCHCODE".into());
        let err = service.create_request(data).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PromoCodeNotFound);
    }
}
