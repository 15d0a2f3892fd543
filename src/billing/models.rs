//! Domain types for rental billing.
//!
//! A `Bill` is a pure projection of its inputs: it carries no identity and is
//! never persisted or cached. Every change to plan, duration, accessories or
//! vehicle config produces a fresh `Bill` from scratch.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BillingError;

/// The three rate plans a booking can be priced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanId {
    Hourly,
    TwelveHour,
    TwentyFourHour,
}

/// Rate configuration for the selected plan. Exactly one variant is active
/// per bill computation; switching plans recomputes the whole bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plan", rename_all = "camelCase")]
pub enum RatePlan {
    #[serde(rename_all = "camelCase")]
    Hourly {
        rate_per_hour: Decimal,
        km_free_per_hour: Decimal,
        extra_charge_per_km: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    TwelveHour {
        base_rate: Decimal,
        rate_per_hour_display: Decimal,
        km_limit: Decimal,
        extra_charge_per_km: Decimal,
        extra_charge_per_hour: Decimal,
        grace_period_minutes: i64,
    },
    #[serde(rename_all = "camelCase")]
    TwentyFourHour {
        base_rate: Decimal,
        rate_per_hour_display: Decimal,
        km_limit: Decimal,
        extra_charge_per_km: Decimal,
        extra_block_rate: Decimal,
        extra_charge_per_hour: Decimal,
        grace_period_minutes: i64,
    },
}

/// Rental duration derived from pickup and dropoff timestamps.
///
/// Partial hours bill as whole hours (elapsed minutes rounded up).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDuration {
    pub hours: i64,
    pub days: i64,
    pub label: String,
}

impl BookingDuration {
    /// Compute the billable duration between pickup and dropoff.
    ///
    /// Dropoff must be strictly after pickup; otherwise no duration exists
    /// and no bill may be computed.
    pub fn between(
        pickup: DateTime<Utc>,
        dropoff: DateTime<Utc>,
    ) -> Result<BookingDuration, BillingError> {
        if dropoff <= pickup {
            return Err(BillingError::InvalidDuration { pickup, dropoff });
        }

        let minutes = (dropoff - pickup).num_minutes();
        let hours = (minutes + 59) / 60;
        let days = hours / 24;

        let label = if days > 0 {
            let rem = hours % 24;
            if rem > 0 {
                format!("{} day{} {} hour{}", days, plural(days), rem, plural(rem))
            } else {
                format!("{} day{}", days, plural(days))
            }
        } else {
            format!("{} hour{}", hours, plural(hours))
        };

        Ok(BookingDuration { hours, days, label })
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Accessory selections for a booking.
///
/// The helmet toggle and count are deliberately coupled the way the booking
/// screen behaves: a nonzero count charges even when the toggle is off.
/// Whether that is intentional upstream is unconfirmed, so the observed
/// behavior is preserved rather than corrected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessories {
    #[serde(default)]
    pub helmet_selected: bool,
    #[serde(default)]
    pub helmet_count: u32,
    #[serde(default)]
    pub full_insurance_selected: bool,
}

impl Accessories {
    /// The count that actually gets charged. Clamped to the two-helmet
    /// maximum the booking screen enforces.
    pub fn effective_helmet_count(&self) -> u32 {
        self.helmet_count.min(2)
    }
}

/// Per-vehicle financial configuration, supplied externally.
///
/// Ranges are not validated here; out-of-range percentages pass through
/// arithmetically.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFinancialConfig {
    pub deposit_amount: Decimal,
    pub required_payment_percentage: Decimal,
}

/// Fully itemized bill. Derived output only: no identity, no persistence,
/// reconstructed fresh on every input change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_charges: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rental_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub helmet_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub insurance_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gst: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub advance_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub remainder_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pay_now: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub km_limit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_charge_per_km: Decimal,
    pub grace_period_minutes: i64,
}
