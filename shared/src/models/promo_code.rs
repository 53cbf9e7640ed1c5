//! Promotion Models

use super::meal_service::MealCategory;
use super::reservation::BookingChannel;
use serde::{Deserialize, Serialize};

/// Discount shape of a promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    /// Percentage off, optionally capped by `max_discount_amount`
    Percentage,
    /// Fixed amount off, clamped to the order amount
    Fixed,
}

/// Campaign scope of a promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum CampaignType {
    /// Valid at every restaurant
    Platform,
    /// Valid only where an active restaurant mapping exists
    Merchant,
}

/// Promotion definition
///
/// Codes are stored uppercase-normalized; the validity window
/// `[valid_from, valid_until]` is inclusive on both bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PromoCode {
    pub id: i64,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount_amount: Option<f64>,
    pub min_order_amount: Option<f64>,
    /// Validity window start, Unix millis (inclusive)
    pub valid_from: i64,
    /// Validity window end, Unix millis (inclusive)
    pub valid_until: i64,
    pub max_uses_total: Option<i64>,
    pub max_uses_per_user: Option<i64>,
    pub max_party_size_total: Option<i64>,
    pub max_party_size_per_user: Option<i64>,
    /// JSON array of eligible meal categories; NULL means no restriction
    pub eligible_categories: Option<String>,
    pub first_order_only: bool,
    pub campaign_type: CampaignType,
    pub is_active: bool,
    pub is_deleted: bool,
    /// Running counter: number of recorded usages
    pub times_used: i64,
    /// Running counter: sum of party sizes across recorded usages
    pub party_size_used: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PromoCode {
    /// Whether the promotion applies to the given meal category.
    ///
    /// A missing or unparseable category list means no restriction.
    pub fn category_allows(&self, category: MealCategory) -> bool {
        match &self.eligible_categories {
            None => true,
            Some(raw) => match serde_json::from_str::<Vec<MealCategory>>(raw) {
                Ok(list) if !list.is_empty() => list.contains(&category),
                _ => true,
            },
        }
    }
}

/// Create promotion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCodeCreate {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount_amount: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub valid_from: i64,
    pub valid_until: i64,
    pub max_uses_total: Option<i64>,
    pub max_uses_per_user: Option<i64>,
    pub max_party_size_total: Option<i64>,
    pub max_party_size_per_user: Option<i64>,
    pub eligible_categories: Option<Vec<MealCategory>>,
    pub first_order_only: bool,
    pub campaign_type: CampaignType,
}

/// Restaurant scoping record for a merchant campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PromoCodeRestaurantMapping {
    pub id: i64,
    pub promo_code_id: i64,
    pub restaurant_id: i64,
    pub is_active: bool,
    pub created_at: i64,
}

/// Customer scoping record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PromoCodeCustomerMapping {
    pub id: i64,
    pub promo_code_id: i64,
    pub customer_id: i64,
    pub is_active: bool,
    pub created_at: i64,
}

/// Append-only ledger entry — one promotion application, never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PromoCodeUsage {
    pub id: i64,
    pub promo_code_id: i64,
    pub customer_id: i64,
    pub reservation_id: i64,
    pub request_id: i64,
    pub original_amount: f64,
    pub discount_amount: f64,
    pub party_size: i64,
    pub applied_by: BookingChannel,
    pub created_at: i64,
}

/// Resolved eligibility for one code + restaurant (+ optional customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCodeValidationData {
    pub promo_code: PromoCode,
    pub is_restaurant_eligible: bool,
    pub is_customer_eligible: bool,
    /// Non-cancelled reservation count of the customer, 0 when no customer
    /// was supplied. Consumed by first-order-only policy.
    pub customer_reservation_count: i64,
}

/// Per-customer usage totals against a single promo code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTotals {
    pub uses: i64,
    pub party_size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo_with_categories(raw: Option<&str>) -> PromoCode {
        PromoCode {
            id: 1,
            code: "SAVE20".into(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: 20.0,
            max_discount_amount: None,
            min_order_amount: None,
            valid_from: 0,
            valid_until: i64::MAX,
            max_uses_total: None,
            max_uses_per_user: None,
            max_party_size_total: None,
            max_party_size_per_user: None,
            eligible_categories: raw.map(str::to_string),
            first_order_only: false,
            campaign_type: CampaignType::Platform,
            is_active: true,
            is_deleted: false,
            times_used: 0,
            party_size_used: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_category_allows_no_restriction() {
        let promo = promo_with_categories(None);
        assert!(promo.category_allows(MealCategory::Lunch));
        assert!(promo.category_allows(MealCategory::Dinner));
    }

    #[test]
    fn test_category_allows_restricted() {
        let promo = promo_with_categories(Some(r#"["LUNCH","DINNER"]"#));
        assert!(promo.category_allows(MealCategory::Lunch));
        assert!(!promo.category_allows(MealCategory::Breakfast));
    }

    #[test]
    fn test_category_allows_unparseable_is_open() {
        let promo = promo_with_categories(Some("not json"));
        assert!(promo.category_allows(MealCategory::Breakfast));
    }
}
