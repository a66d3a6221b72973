//! REST API handlers

pub mod bookings;
pub mod health;
pub mod providers;
pub mod shared;
pub mod societies;
pub mod vendors;

pub use bookings::create_booking;
pub use health::{health, ready};
pub use providers::list_providers;
pub use societies::nearby_societies;
pub use vendors::nearby_vendors;
