//! Request DTOs for billing API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::defaults;
use super::models::{Accessories, PlanId, RatePlan};

/// Request to quote a stored vehicle
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub vehicle_id: Uuid,
    pub plan: PlanId,
    pub pickup: DateTime<Utc>,
    pub dropoff: DateTime<Utc>,
    #[serde(flatten)]
    pub accessories: Accessories,
}

/// Request to compute a bill from inline rate configuration (no DB)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub rate_plan: RatePlan,
    pub pickup: DateTime<Utc>,
    pub dropoff: DateTime<Utc>,
    #[serde(flatten)]
    pub accessories: Accessories,
    #[serde(default = "default_deposit")]
    pub deposit_amount: Decimal,
    #[serde(default = "default_payment_percentage")]
    pub required_payment_percentage: Decimal,
}

fn default_deposit() -> Decimal {
    defaults::DEPOSIT_AMOUNT
}

fn default_payment_percentage() -> Decimal {
    defaults::REQUIRED_PAYMENT_PERCENTAGE
}

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
