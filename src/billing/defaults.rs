//! Fallback constants for vehicle rate configuration.
//!
//! Vehicles frequently ship with partial rate documents. Rather than failing
//! the quote, missing fields fall back to these defaults. They were
//! previously repeated at every call site in the booking views; keeping them
//! in one table stops the copies drifting apart.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Hourly plan: rate per hour.
pub const HOURLY_RATE_PER_HOUR: Decimal = dec!(130);
/// Hourly plan: free kilometers per rented hour.
pub const HOURLY_KM_FREE_PER_HOUR: Decimal = dec!(10);
/// Hourly plan: charge per kilometer past the free allowance.
pub const HOURLY_EXTRA_CHARGE_PER_KM: Decimal = dec!(5);

/// 12-hour package base rate.
pub const TWELVE_HOUR_BASE_RATE: Decimal = dec!(600);
/// 12-hour package kilometer allowance (flat, regardless of usage).
pub const TWELVE_HOUR_KM_LIMIT: Decimal = dec!(120);
/// 12-hour package per-hour charge past the package window.
pub const TWELVE_HOUR_EXTRA_CHARGE_PER_HOUR: Decimal = dec!(60);

/// 24-hour package base rate.
pub const TWENTY_FOUR_HOUR_BASE_RATE: Decimal = dec!(750);
/// 24-hour package kilometer allowance.
pub const TWENTY_FOUR_HOUR_KM_LIMIT: Decimal = dec!(240);
/// 24-hour package rate for each full additional 12-hour block.
pub const TWENTY_FOUR_HOUR_EXTRA_BLOCK_RATE: Decimal = dec!(375);
/// 24-hour package per-hour charge for the partial block.
pub const TWENTY_FOUR_HOUR_EXTRA_CHARGE_PER_HOUR: Decimal = dec!(60);

/// Charge per kilometer past the package allowance (both packages).
pub const PACKAGE_EXTRA_CHARGE_PER_KM: Decimal = dec!(5);
/// Grace period before overage billing starts, in minutes.
pub const GRACE_PERIOD_MINUTES: i64 = 0;

/// Refundable security deposit.
pub const DEPOSIT_AMOUNT: Decimal = dec!(2000);
/// Share of the rental total collected up front, percent.
pub const REQUIRED_PAYMENT_PERCENTAGE: Decimal = dec!(50);

/// Per-helmet rental charge.
pub const HELMET_CHARGE: Decimal = dec!(50);
/// Flat full-insurance charge.
pub const INSURANCE_CHARGE: Decimal = dec!(100);
/// GST rate applied to the subtotal.
pub const GST_RATE: Decimal = dec!(0.18);
