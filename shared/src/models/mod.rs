//! Domain models shared across the workspace

pub mod capacity;
pub mod customer;
pub mod meal_service;
pub mod promo_code;
pub mod reservation;
pub mod restaurant;

pub use capacity::{
    ChannelBookings, QuotaAvailability, ServiceCapacity, ServiceCapacityCreate, SlotAvailability,
};
pub use customer::{Customer, CustomerUpsert};
pub use meal_service::{MealCategory, MealService, MealServiceCreate};
pub use promo_code::{
    CampaignType, DiscountType, PromoCode, PromoCodeCreate, PromoCodeCustomerMapping,
    PromoCodeRestaurantMapping, PromoCodeUsage, PromoCodeValidationData, UsageTotals,
};
pub use reservation::{
    BookingChannel, ConfirmationOutcome, RequestStatus, Reservation, ReservationFinancial,
    ReservationRequest, ReservationRequestCreate, ReservationStatus,
};
pub use restaurant::{
    DayStatus, OperatingHours, QuotaConfig, Restaurant, RestaurantCreate, SpecialClosure,
};
