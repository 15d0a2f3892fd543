//! Database models for vehicles and bookings.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle row from rentals_vehicle.
///
/// Rate-plan numeric fields live in the `rate_plans` JSONB document; the
/// billing service extracts them with per-field fallbacks, so a partially
/// configured vehicle still quotes.
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub display_name: String,
    pub vehicle_type: String,
    pub rate_plans: serde_json::Value,
    pub deposit_amount: Option<Decimal>,
    pub required_payment_percentage: Option<Decimal>,
    pub active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Check whether the vehicle can be quoted and booked.
    pub fn is_bookable(&self) -> bool {
        self.active && self.deleted_at.is_none()
    }
}

/// Booking row from rentals_booking, used for availability overlap checks.
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Booking statuses that block the vehicle's calendar.
pub const BLOCKING_STATUSES: &[&str] = &["confirmed", "active"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_bookable() {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            display_name: "Honda Activa".to_string(),
            vehicle_type: "scooter".to_string(),
            rate_plans: serde_json::json!({}),
            deposit_amount: None,
            required_payment_percentage: None,
            active: true,
            deleted_at: None,
        };
        assert!(vehicle.is_bookable());

        let deleted = Vehicle {
            deleted_at: Some(Utc::now()),
            ..vehicle.clone()
        };
        assert!(!deleted.is_bookable());

        let inactive = Vehicle {
            active: false,
            ..vehicle
        };
        assert!(!inactive.is_bookable());
    }
}
