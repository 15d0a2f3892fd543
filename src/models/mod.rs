//! Database row models.

pub mod vehicle;

pub use vehicle::{Booking, Vehicle, BLOCKING_STATUSES};
