//! Discount computation — pure application of a promotion to an order amount

use shared::models::{DiscountType, PromoCode};

/// Discount amount a promotion yields on `order_amount`.
///
/// Below the minimum-order floor the discount is zero. Percentage
/// discounts are capped by `max_discount_amount` when set; fixed
/// discounts never exceed the order amount itself.
pub fn discount_for(promo: &PromoCode, order_amount: f64) -> f64 {
    if let Some(min) = promo.min_order_amount {
        if order_amount < min {
            return 0.0;
        }
    }
    match promo.discount_type {
        DiscountType::Percentage => {
            let raw = order_amount * promo.discount_value / 100.0;
            match promo.max_discount_amount {
                Some(cap) => raw.min(cap),
                None => raw,
            }
        }
        DiscountType::Fixed => promo.discount_value.min(order_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CampaignType;

    fn promo(discount_type: DiscountType, value: f64) -> PromoCode {
        PromoCode {
            id: 1,
            code: "SAVE20".into(),
            description: None,
            discount_type,
            discount_value: value,
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
    fn test_percentage() {
        let p = promo(DiscountType::Percentage, 20.0);
        assert_eq!(discount_for(&p, 150.0), 30.0);
    }

    #[test]
    fn test_percentage_capped() {
        let mut p = promo(DiscountType::Percentage, 20.0);
        p.max_discount_amount = Some(25.0);
        assert_eq!(discount_for(&p, 150.0), 25.0);
        assert_eq!(discount_for(&p, 100.0), 20.0);
    }

    #[test]
    fn test_fixed_clamped_to_order() {
        let p = promo(DiscountType::Fixed, 50.0);
        assert_eq!(discount_for(&p, 120.0), 50.0);
        assert_eq!(discount_for(&p, 30.0), 30.0);
    }

    #[test]
    fn test_min_order_floor() {
        let mut p = promo(DiscountType::Fixed, 10.0);
        p.min_order_amount = Some(100.0);
        assert_eq!(discount_for(&p, 99.99), 0.0);
        assert_eq!(discount_for(&p, 100.0), 10.0);
    }
}
