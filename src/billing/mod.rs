//! Billing engine for vehicle rentals.
//!
//! The calculator itself is a pure function over an input snapshot (plan,
//! duration, accessories, financial config); everything around it resolves
//! those inputs from vehicle records and gates booking on availability.

pub mod calculators;
pub mod defaults;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

use chrono::{DateTime, Utc};

// Re-export commonly used items
pub use calculators::{calculate_bill, round_money};
pub use models::{Accessories, Bill, BookingDuration, PlanId, RatePlan, VehicleFinancialConfig};
pub use routes::router;
pub use services::Availability;

/// Billing error types.
///
/// Missing configuration fields are deliberately NOT an error: they fall
/// back to the [`defaults`] table so a sparsely configured vehicle still
/// quotes (see `services::resolve_rate_plan`).
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("dropoff {dropoff} is not after pickup {pickup}")]
    InvalidDuration {
        pickup: DateTime<Utc>,
        dropoff: DateTime<Utc>,
    },

    #[error("rental duration must be at least one hour")]
    EmptyDuration,

    #[error("could not verify availability: {0}")]
    AvailabilityCheck(#[source] sqlx::Error),
}
