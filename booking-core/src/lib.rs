//! Booking Core - restaurant reservation capacity and promotion engine
//!
//! # Overview
//!
//! Core services:
//!
//! - **Availability** (`availability`): calendar gating, 30-minute slot
//!   generation, online/manual channel quota split
//! - **Promotions** (`promotions`): code validation, discount math,
//!   atomic usage recording
//! - **Booking** (`booking`): request intake with estimated pricing and
//!   the transactional confirmation path
//! - **Database** (`db`): SQLite via sqlx, repository layer
//!
//! # Module structure
//!
//! ```text
//! booking-core/src/
//! ├── core/          # configuration
//! ├── availability/  # calendar gate, slot generator, quota allocator
//! ├── promotions/    # validator, discount, usage recording
//! ├── booking/       # request intake, confirmation coordinator
//! ├── utils/         # time helpers, logging
//! └── db/            # pool setup, migrations, repositories
//! ```

pub mod availability;
pub mod booking;
pub mod core;
pub mod db;
pub mod promotions;
pub mod utils;

pub use availability::{CalendarGate, QuotaAllocator, SlotGenerator};
pub use booking::{ConfirmationCoordinator, RequestService};
pub use crate::core::Config;
pub use db::DbService;
pub use promotions::{PromotionValidator, UsageRecord};
pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode, ServiceResponse};
