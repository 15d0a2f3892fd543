//! Response DTOs for billing API endpoints.

use serde::Serialize;
use uuid::Uuid;

use super::models::{Bill, BookingDuration};
use super::services::Availability;

/// Response for the inline preview endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub duration: BookingDuration,
    pub bill: Bill,
}

/// Response for the availability endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub vehicle_id: Uuid,
    pub availability: Availability,
    pub booking_allowed: bool,
}
