//! Promotion services — validation, discount math, usage recording

pub mod discount;
pub mod validator;

pub use discount::discount_for;
pub use validator::{PromotionValidator, UsageRecord};
