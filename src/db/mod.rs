//! Database access layer.

pub mod queries;

pub use queries::{find_overlapping_booking, get_vehicle};
