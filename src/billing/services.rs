//! Billing service functions with database access.
//!
//! These resolve vehicle configuration into typed rate plans, check the
//! booking calendar, and assemble quotes from the pure calculator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::db;
use crate::error::AppError;
use crate::models::Vehicle;

use super::calculators::calculate_bill;
use super::defaults;
use super::models::{
    Accessories, Bill, BookingDuration, PlanId, RatePlan, VehicleFinancialConfig,
};
use super::BillingError;

/// Availability verdict for a requested window.
///
/// `Unverified` means the calendar could not be checked; the quote still
/// stands but the booking action must stay disabled until a retry succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Availability {
    Available,
    #[serde(rename_all = "camelCase")]
    Unavailable {
        next_available: Option<DateTime<Utc>>,
    },
    Unverified,
}

impl Availability {
    pub fn booking_allowed(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// A complete quote: the bill plus everything the booking screen needs to
/// decide whether the confirm action is enabled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub plan: PlanId,
    pub duration: BookingDuration,
    pub bill: Bill,
    pub availability: Availability,
    pub booking_allowed: bool,
}

/// Read a numeric field from a rate-plan document, tolerating both JSON
/// numbers and string-encoded decimals.
fn decimal_field(obj: &serde_json::Value, key: &str, default: Decimal) -> Decimal {
    match obj.get(key) {
        Some(serde_json::Value::String(s)) => s.parse::<Decimal>().unwrap_or(default),
        Some(v) => v
            .as_f64()
            .and_then(|f| Decimal::try_from(f).ok())
            .unwrap_or(default),
        None => default,
    }
}

fn int_field(obj: &serde_json::Value, key: &str, default: i64) -> i64 {
    obj.get(key).and_then(|v| v.as_i64()).unwrap_or(default)
}

/// Resolve the selected plan's rate configuration from a vehicle's
/// `rate_plans` document.
///
/// Absent fields fall back to the [`defaults`] table rather than failing:
/// a sparsely configured vehicle must still quote.
pub fn resolve_rate_plan(rate_plans: &serde_json::Value, plan: PlanId) -> RatePlan {
    match plan {
        PlanId::Hourly => {
            let p = rate_plans
                .get("hourly")
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            RatePlan::Hourly {
                rate_per_hour: decimal_field(&p, "ratePerHour", defaults::HOURLY_RATE_PER_HOUR),
                km_free_per_hour: decimal_field(
                    &p,
                    "kmFreePerHour",
                    defaults::HOURLY_KM_FREE_PER_HOUR,
                ),
                extra_charge_per_km: decimal_field(
                    &p,
                    "extraChargePerKm",
                    defaults::HOURLY_EXTRA_CHARGE_PER_KM,
                ),
            }
        }
        PlanId::TwelveHour => {
            let p = rate_plans
                .get("twelveHour")
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            RatePlan::TwelveHour {
                base_rate: decimal_field(&p, "baseRate", defaults::TWELVE_HOUR_BASE_RATE),
                rate_per_hour_display: decimal_field(
                    &p,
                    "ratePerHourDisplay",
                    defaults::TWELVE_HOUR_BASE_RATE / Decimal::from(12),
                ),
                km_limit: decimal_field(&p, "kmLimit", defaults::TWELVE_HOUR_KM_LIMIT),
                extra_charge_per_km: decimal_field(
                    &p,
                    "extraChargePerKm",
                    defaults::PACKAGE_EXTRA_CHARGE_PER_KM,
                ),
                extra_charge_per_hour: decimal_field(
                    &p,
                    "extraChargePerHour",
                    defaults::TWELVE_HOUR_EXTRA_CHARGE_PER_HOUR,
                ),
                grace_period_minutes: int_field(
                    &p,
                    "gracePeriodMinutes",
                    defaults::GRACE_PERIOD_MINUTES,
                ),
            }
        }
        PlanId::TwentyFourHour => {
            let p = rate_plans
                .get("twentyFourHour")
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            RatePlan::TwentyFourHour {
                base_rate: decimal_field(&p, "baseRate", defaults::TWENTY_FOUR_HOUR_BASE_RATE),
                rate_per_hour_display: decimal_field(
                    &p,
                    "ratePerHourDisplay",
                    defaults::TWENTY_FOUR_HOUR_BASE_RATE / Decimal::from(24),
                ),
                km_limit: decimal_field(&p, "kmLimit", defaults::TWENTY_FOUR_HOUR_KM_LIMIT),
                extra_charge_per_km: decimal_field(
                    &p,
                    "extraChargePerKm",
                    defaults::PACKAGE_EXTRA_CHARGE_PER_KM,
                ),
                extra_block_rate: decimal_field(
                    &p,
                    "extraBlockRate",
                    defaults::TWENTY_FOUR_HOUR_EXTRA_BLOCK_RATE,
                ),
                extra_charge_per_hour: decimal_field(
                    &p,
                    "extraChargePerHour",
                    defaults::TWENTY_FOUR_HOUR_EXTRA_CHARGE_PER_HOUR,
                ),
                grace_period_minutes: int_field(
                    &p,
                    "gracePeriodMinutes",
                    defaults::GRACE_PERIOD_MINUTES,
                ),
            }
        }
    }
}

/// Resolve deposit and advance-percentage config for a vehicle, with the
/// same lenient fallbacks. Out-of-range values pass through untouched.
pub fn resolve_financial_config(vehicle: &Vehicle) -> VehicleFinancialConfig {
    VehicleFinancialConfig {
        deposit_amount: vehicle.deposit_amount.unwrap_or(defaults::DEPOSIT_AMOUNT),
        required_payment_percentage: vehicle
            .required_payment_percentage
            .unwrap_or(defaults::REQUIRED_PAYMENT_PERCENTAGE),
    }
}

/// Fetch a vehicle, consulting the moka cache first.
pub async fn get_vehicle_cached(
    pool: &PgPool,
    cache: &AppCache,
    vehicle_id: Uuid,
) -> Result<Arc<Vehicle>, AppError> {
    if let Some(cached) = cache.vehicles.get(&vehicle_id).await {
        return Ok(cached);
    }

    let vehicle = Arc::new(db::get_vehicle(pool, vehicle_id).await?);
    cache.vehicles.insert(vehicle_id, vehicle.clone()).await;
    Ok(vehicle)
}

/// Check the booking calendar for the requested window.
///
/// A database failure is not fatal to the surrounding quote; it maps to
/// `BillingError::AvailabilityCheck` and the caller degrades to
/// `Availability::Unverified`.
pub async fn check_availability(
    pool: &PgPool,
    vehicle_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Availability, BillingError> {
    let conflict = db::find_overlapping_booking(pool, vehicle_id, start, end)
        .await
        .map_err(BillingError::AvailabilityCheck)?;

    Ok(match conflict {
        Some(booking) => Availability::Unavailable {
            next_available: Some(booking.end_time),
        },
        None => Availability::Available,
    })
}

/// Assemble a full quote for a stored vehicle.
///
/// The bill is recomputed from scratch on every call; nothing about it is
/// cached. Availability is checked in the same pass but only gates the
/// booking action, never the bill numbers.
pub async fn quote_for_vehicle(
    pool: &PgPool,
    cache: &AppCache,
    vehicle_id: Uuid,
    plan: PlanId,
    pickup: DateTime<Utc>,
    dropoff: DateTime<Utc>,
    accessories: Accessories,
) -> Result<Quote, AppError> {
    let vehicle = get_vehicle_cached(pool, cache, vehicle_id).await?;

    let duration = BookingDuration::between(pickup, dropoff)?;
    let rate_plan = resolve_rate_plan(&vehicle.rate_plans, plan);
    let financial = resolve_financial_config(&vehicle);
    let bill = calculate_bill(&rate_plan, &duration, &accessories, &financial)?;

    let availability = match check_availability(pool, vehicle_id, pickup, dropoff).await {
        Ok(a) => a,
        Err(e) => {
            warn!("availability check failed for vehicle {}: {}", vehicle_id, e);
            Availability::Unverified
        }
    };

    Ok(Quote {
        vehicle_id,
        vehicle_name: vehicle.display_name.clone(),
        plan,
        booking_allowed: availability.booking_allowed(),
        duration,
        bill,
        availability,
    })
}

/// Compute a bill from inline configuration, without touching the database.
pub fn preview_bill(
    rate_plan: &RatePlan,
    pickup: DateTime<Utc>,
    dropoff: DateTime<Utc>,
    accessories: Accessories,
    financial: &VehicleFinancialConfig,
) -> Result<(BookingDuration, Bill), BillingError> {
    let duration = BookingDuration::between(pickup, dropoff)?;
    let bill = calculate_bill(rate_plan, &duration, &accessories, financial)?;
    Ok((duration, bill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    // ==================== resolve_rate_plan tests ====================

    #[test]
    fn test_resolve_hourly_full_document() {
        let doc = json!({
            "hourly": {"ratePerHour": 110, "kmFreePerHour": 12, "extraChargePerKm": 4}
        });
        let plan = resolve_rate_plan(&doc, PlanId::Hourly);
        assert_eq!(
            plan,
            RatePlan::Hourly {
                rate_per_hour: dec!(110),
                km_free_per_hour: dec!(12),
                extra_charge_per_km: dec!(4),
            }
        );
    }

    #[test]
    fn test_resolve_hourly_missing_rate_falls_back_to_130() {
        let doc = json!({"hourly": {"kmFreePerHour": 12}});
        let plan = resolve_rate_plan(&doc, PlanId::Hourly);
        match plan {
            RatePlan::Hourly { rate_per_hour, .. } => assert_eq!(rate_per_hour, dec!(130)),
            _ => panic!("wrong plan variant"),
        }
    }

    #[test]
    fn test_resolve_empty_document_uses_all_defaults() {
        let doc = json!({});
        match resolve_rate_plan(&doc, PlanId::TwelveHour) {
            RatePlan::TwelveHour { base_rate, .. } => assert_eq!(base_rate, dec!(600)),
            _ => panic!("wrong plan variant"),
        }
        match resolve_rate_plan(&doc, PlanId::TwentyFourHour) {
            RatePlan::TwentyFourHour { base_rate, .. } => assert_eq!(base_rate, dec!(750)),
            _ => panic!("wrong plan variant"),
        }
    }

    #[test]
    fn test_resolve_accepts_string_encoded_decimals() {
        let doc = json!({"hourly": {"ratePerHour": "145.50"}});
        match resolve_rate_plan(&doc, PlanId::Hourly) {
            RatePlan::Hourly { rate_per_hour, .. } => assert_eq!(rate_per_hour, dec!(145.50)),
            _ => panic!("wrong plan variant"),
        }
    }

    #[test]
    fn test_resolve_twenty_four_hour_block_rate() {
        let doc = json!({
            "twentyFourHour": {"baseRate": 800, "extraBlockRate": 420, "extraChargePerHour": 55}
        });
        match resolve_rate_plan(&doc, PlanId::TwentyFourHour) {
            RatePlan::TwentyFourHour {
                base_rate,
                extra_block_rate,
                extra_charge_per_hour,
                ..
            } => {
                assert_eq!(base_rate, dec!(800));
                assert_eq!(extra_block_rate, dec!(420));
                assert_eq!(extra_charge_per_hour, dec!(55));
            }
            _ => panic!("wrong plan variant"),
        }
    }

    // ==================== resolve_financial_config tests ====================

    fn vehicle_with(
        deposit: Option<Decimal>,
        pct: Option<Decimal>,
    ) -> crate::models::Vehicle {
        crate::models::Vehicle {
            id: Uuid::new_v4(),
            display_name: "Honda Activa".to_string(),
            vehicle_type: "scooter".to_string(),
            rate_plans: json!({}),
            deposit_amount: deposit,
            required_payment_percentage: pct,
            active: true,
            deleted_at: None,
        }
    }

    #[test]
    fn test_financial_config_defaults() {
        let config = resolve_financial_config(&vehicle_with(None, None));
        assert_eq!(config.deposit_amount, dec!(2000));
        assert_eq!(config.required_payment_percentage, dec!(50));
    }

    #[test]
    fn test_financial_config_explicit_values_win() {
        let config = resolve_financial_config(&vehicle_with(Some(dec!(5000)), Some(dec!(30))));
        assert_eq!(config.deposit_amount, dec!(5000));
        assert_eq!(config.required_payment_percentage, dec!(30));
    }

    #[test]
    fn test_financial_config_out_of_range_passes_through() {
        let config = resolve_financial_config(&vehicle_with(None, Some(dec!(130))));
        assert_eq!(config.required_payment_percentage, dec!(130));
    }

    // ==================== availability tests ====================

    #[test]
    fn test_booking_allowed_only_when_available() {
        assert!(Availability::Available.booking_allowed());
        assert!(!Availability::Unavailable {
            next_available: None
        }
        .booking_allowed());
        assert!(!Availability::Unverified.booking_allowed());
    }
}
