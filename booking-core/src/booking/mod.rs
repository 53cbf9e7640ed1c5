//! Booking services — request intake and confirmation

pub mod confirmation;
pub mod requests;

pub use confirmation::ConfirmationCoordinator;
pub use requests::RequestService;
