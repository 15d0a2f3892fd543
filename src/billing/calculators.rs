//! Core rental bill calculation.
//!
//! Pure functions for billing math - no database access, no side effects.
//! Safe to call on every input change; callers recompute rather than cache.

use rust_decimal::{Decimal, RoundingStrategy};

use super::defaults;
use super::models::{Accessories, Bill, BookingDuration, RatePlan, VehicleFinancialConfig};
use super::BillingError;

const PACKAGE_BLOCK_HOURS: i64 = 12;

/// Round to whole currency units using round-half-up (away from zero).
///
/// Applied only to the GST and advance-amount computations; everything else
/// in the bill is exact integer arithmetic on whole units.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use rentride_web::billing::round_money;
///
/// assert_eq!(round_money(dec!(117.9)), dec!(118));
/// assert_eq!(round_money(dec!(383.5)), dec!(384));
/// assert_eq!(round_money(dec!(117.0)), dec!(117));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rental time cost for the selected plan: base rate, overage charges and the
/// plan's kilometer allowance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCharges {
    pub base_rate: Decimal,
    pub extra_charges: Decimal,
    pub km_limit: Decimal,
    pub extra_charge_per_km: Decimal,
    pub grace_period_minutes: i64,
}

/// Compute the time-based charges for one plan.
///
/// - Hourly is metered linearly: there is no separate overage, the hours
///   themselves are the charge, and the kilometer allowance scales with them.
/// - The 12-hour package is a flat price up to 12 hours; excess hours bill
///   at the package's per-hour overage rate. The kilometer allowance is flat.
/// - The 24-hour package bills excess in two tiers: each full additional
///   12-hour block at the discounted block rate, the remaining partial block
///   at the per-hour rate.
pub fn plan_charges(plan: &RatePlan, duration_hours: i64) -> PlanCharges {
    let hours = Decimal::from(duration_hours);

    match plan {
        RatePlan::Hourly {
            rate_per_hour,
            km_free_per_hour,
            extra_charge_per_km,
        } => PlanCharges {
            base_rate: hours * *rate_per_hour,
            extra_charges: Decimal::ZERO,
            km_limit: hours * *km_free_per_hour,
            extra_charge_per_km: *extra_charge_per_km,
            grace_period_minutes: 0,
        },
        RatePlan::TwelveHour {
            base_rate,
            km_limit,
            extra_charge_per_km,
            extra_charge_per_hour,
            grace_period_minutes,
            ..
        } => {
            let excess = (duration_hours - PACKAGE_BLOCK_HOURS).max(0);
            PlanCharges {
                base_rate: *base_rate,
                extra_charges: Decimal::from(excess) * *extra_charge_per_hour,
                km_limit: *km_limit,
                extra_charge_per_km: *extra_charge_per_km,
                grace_period_minutes: *grace_period_minutes,
            }
        }
        RatePlan::TwentyFourHour {
            base_rate,
            km_limit,
            extra_charge_per_km,
            extra_block_rate,
            extra_charge_per_hour,
            grace_period_minutes,
            ..
        } => {
            let excess = (duration_hours - 2 * PACKAGE_BLOCK_HOURS).max(0);
            let extra_blocks = excess / PACKAGE_BLOCK_HOURS;
            let remaining_hours = excess % PACKAGE_BLOCK_HOURS;
            PlanCharges {
                base_rate: *base_rate,
                extra_charges: Decimal::from(extra_blocks) * *extra_block_rate
                    + Decimal::from(remaining_hours) * *extra_charge_per_hour,
                km_limit: *km_limit,
                extra_charge_per_km: *extra_charge_per_km,
                grace_period_minutes: *grace_period_minutes,
            }
        }
    }
}

/// Compute a fully itemized bill from a complete input snapshot.
///
/// The helmet charge follows the effective count alone: a nonzero count
/// charges whether or not the helmet toggle is on (observed booking-screen
/// behavior, preserved deliberately).
pub fn calculate_bill(
    plan: &RatePlan,
    duration: &BookingDuration,
    accessories: &Accessories,
    financial: &VehicleFinancialConfig,
) -> Result<Bill, BillingError> {
    if duration.hours <= 0 {
        return Err(BillingError::EmptyDuration);
    }

    let charges = plan_charges(plan, duration.hours);

    let helmet_cost =
        Decimal::from(accessories.effective_helmet_count()) * defaults::HELMET_CHARGE;
    let insurance_cost = if accessories.full_insurance_selected {
        defaults::INSURANCE_CHARGE
    } else {
        Decimal::ZERO
    };

    let rental_cost = charges.base_rate + charges.extra_charges;
    let subtotal = rental_cost + helmet_cost + insurance_cost;
    let gst = round_money(subtotal * defaults::GST_RATE);
    let total = subtotal + gst;
    let grand_total = total + financial.deposit_amount;

    // Deposit is always collected upfront in full; only the rental-service
    // portion splits by percentage.
    let advance_amount =
        round_money(total * financial.required_payment_percentage / Decimal::from(100));
    let remainder_amount = total - advance_amount;
    let pay_now = advance_amount + financial.deposit_amount;

    Ok(Bill {
        base_rate: charges.base_rate,
        extra_charges: charges.extra_charges,
        rental_cost,
        helmet_cost,
        insurance_cost,
        subtotal,
        gst,
        total,
        deposit: financial.deposit_amount,
        grand_total,
        advance_amount,
        remainder_amount,
        pay_now,
        km_limit: charges.km_limit,
        extra_charge_per_km: charges.extra_charge_per_km,
        grace_period_minutes: charges.grace_period_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn hourly(rate: Decimal) -> RatePlan {
        RatePlan::Hourly {
            rate_per_hour: rate,
            km_free_per_hour: dec!(10),
            extra_charge_per_km: dec!(5),
        }
    }

    fn twelve_hour(base: Decimal, extra_per_hour: Decimal) -> RatePlan {
        RatePlan::TwelveHour {
            base_rate: base,
            rate_per_hour_display: dec!(50),
            km_limit: dec!(120),
            extra_charge_per_km: dec!(5),
            extra_charge_per_hour: extra_per_hour,
            grace_period_minutes: 30,
        }
    }

    fn twenty_four_hour(
        base: Decimal,
        block_rate: Decimal,
        extra_per_hour: Decimal,
    ) -> RatePlan {
        RatePlan::TwentyFourHour {
            base_rate: base,
            rate_per_hour_display: dec!(31),
            km_limit: dec!(240),
            extra_charge_per_km: dec!(5),
            extra_block_rate: block_rate,
            extra_charge_per_hour: extra_per_hour,
            grace_period_minutes: 60,
        }
    }

    fn duration(hours: i64) -> BookingDuration {
        BookingDuration {
            hours,
            days: hours / 24,
            label: format!("{} hours", hours),
        }
    }

    fn no_accessories() -> Accessories {
        Accessories::default()
    }

    fn financial(deposit: Decimal, pct: Decimal) -> VehicleFinancialConfig {
        VehicleFinancialConfig {
            deposit_amount: deposit,
            required_payment_percentage: pct,
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(383.5)), dec!(384));
        assert_eq!(round_money(dec!(117.9)), dec!(118));
        assert_eq!(round_money(dec!(117.4)), dec!(117));
        assert_eq!(round_money(dec!(0.5)), dec!(1));
    }

    #[test]
    fn test_round_money_exact_passthrough() {
        assert_eq!(round_money(dec!(117)), dec!(117));
        assert_eq!(round_money(dec!(0)), dec!(0));
    }

    // ==================== plan_charges tests ====================

    #[test]
    fn test_hourly_is_metered_linearly() {
        let charges = plan_charges(&hourly(dec!(130)), 5);
        assert_eq!(charges.base_rate, dec!(650));
        assert_eq!(charges.extra_charges, dec!(0));
        assert_eq!(charges.km_limit, dec!(50));
    }

    #[test]
    fn test_twelve_hour_within_package_has_no_overage() {
        // Up to 12 hours the package price covers everything
        for hours in [1, 6, 12] {
            let charges = plan_charges(&twelve_hour(dec!(600), dec!(60)), hours);
            assert_eq!(charges.base_rate, dec!(600));
            assert_eq!(charges.extra_charges, dec!(0));
        }
    }

    #[test]
    fn test_twelve_hour_overage_per_excess_hour() {
        let charges = plan_charges(&twelve_hour(dec!(600), dec!(60)), 15);
        assert_eq!(charges.base_rate, dec!(600));
        assert_eq!(charges.extra_charges, dec!(180)); // 3 excess hours x 60
    }

    #[test]
    fn test_twelve_hour_km_limit_is_flat() {
        // Package km allowance does not scale with hours used
        let short = plan_charges(&twelve_hour(dec!(600), dec!(60)), 3);
        let long = plan_charges(&twelve_hour(dec!(600), dec!(60)), 12);
        assert_eq!(short.km_limit, dec!(120));
        assert_eq!(long.km_limit, dec!(120));
    }

    #[test]
    fn test_twenty_four_hour_tiered_overage() {
        // 39 hours: 15 excess = 1 full block + 3 remaining hours
        let charges = plan_charges(&twenty_four_hour(dec!(750), dec!(500), dec!(3)), 39);
        assert_eq!(charges.extra_charges, dec!(509)); // 1x500 + 3x3
    }

    #[test]
    fn test_twenty_four_hour_exact_blocks_have_no_partial_charge() {
        // 48 hours: 24 excess = 2 full blocks, no partial remainder
        let charges = plan_charges(&twenty_four_hour(dec!(750), dec!(375), dec!(60)), 48);
        assert_eq!(charges.extra_charges, dec!(750)); // 2x375
    }

    #[test]
    fn test_twenty_four_hour_within_package() {
        let charges = plan_charges(&twenty_four_hour(dec!(750), dec!(375), dec!(60)), 24);
        assert_eq!(charges.base_rate, dec!(750));
        assert_eq!(charges.extra_charges, dec!(0));
    }

    // ==================== calculate_bill tests ====================

    #[test]
    fn test_helmet_charge_follows_count_not_toggle() {
        // Observed booking-screen behavior: count charges even with the
        // toggle off. Pinned here on purpose.
        let accessories = Accessories {
            helmet_selected: false,
            helmet_count: 2,
            full_insurance_selected: false,
        };
        let bill = calculate_bill(
            &hourly(dec!(100)),
            &duration(2),
            &accessories,
            &financial(dec!(2000), dec!(50)),
        )
        .unwrap();
        assert_eq!(bill.helmet_cost, dec!(100));
    }

    #[test]
    fn test_insurance_flat_charge() {
        let accessories = Accessories {
            helmet_selected: false,
            helmet_count: 0,
            full_insurance_selected: true,
        };
        let bill = calculate_bill(
            &hourly(dec!(100)),
            &duration(2),
            &accessories,
            &financial(dec!(2000), dec!(50)),
        )
        .unwrap();
        assert_eq!(bill.insurance_cost, dec!(100));
    }

    #[test]
    fn test_gst_rounds_half_up() {
        // subtotal 655 -> gst round(117.9) = 118, total 773
        let accessories = Accessories {
            helmet_selected: false,
            helmet_count: 0,
            full_insurance_selected: true,
        };
        let bill = calculate_bill(
            &hourly(dec!(111)),
            &duration(5),
            &accessories,
            &financial(dec!(0), dec!(50)),
        )
        .unwrap();
        assert_eq!(bill.subtotal, dec!(655));
        assert_eq!(bill.gst, dec!(118));
        assert_eq!(bill.total, dec!(773));
    }

    #[test]
    fn test_payment_split() {
        let bill = calculate_bill(
            &hourly(dec!(100)),
            &duration(5),
            &no_accessories(),
            &financial(dec!(2000), dec!(50)),
        )
        .unwrap();
        assert_eq!(bill.subtotal, dec!(500));
        assert_eq!(bill.gst, dec!(90));
        assert_eq!(bill.total, dec!(590));
        assert_eq!(bill.advance_amount, dec!(295));
        assert_eq!(bill.pay_now, dec!(2295));
        assert_eq!(bill.remainder_amount, dec!(295));
    }

    #[test]
    fn test_deposit_collected_in_full_upfront() {
        let bill = calculate_bill(
            &hourly(dec!(100)),
            &duration(5),
            &no_accessories(),
            &financial(dec!(2000), dec!(0)),
        )
        .unwrap();
        // Zero advance still pays the full deposit now
        assert_eq!(bill.advance_amount, dec!(0));
        assert_eq!(bill.pay_now, dec!(2000));
        assert_eq!(bill.remainder_amount, bill.total);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = calculate_bill(
            &hourly(dec!(130)),
            &duration(0),
            &no_accessories(),
            &financial(dec!(2000), dec!(50)),
        );
        assert!(matches!(err, Err(BillingError::EmptyDuration)));
    }

    #[test]
    fn test_end_to_end_hourly_scenario() {
        // Hourly 130/hr for 5 hours, no accessories, deposit 5000, 50% advance
        let bill = calculate_bill(
            &hourly(dec!(130)),
            &duration(5),
            &no_accessories(),
            &financial(dec!(5000), dec!(50)),
        )
        .unwrap();
        assert_eq!(bill.base_rate, dec!(650));
        assert_eq!(bill.extra_charges, dec!(0));
        assert_eq!(bill.subtotal, dec!(650));
        assert_eq!(bill.gst, dec!(117));
        assert_eq!(bill.total, dec!(767));
        assert_eq!(bill.grand_total, dec!(5767));
        assert_eq!(bill.advance_amount, dec!(384)); // round(383.5) half-up
        assert_eq!(bill.pay_now, dec!(5384));
        assert_eq!(bill.remainder_amount, dec!(383));
    }

    #[test]
    fn test_overage_monotonic_across_twelve_hour_boundary() {
        let plan = twelve_hour(dec!(600), dec!(60));
        let mut previous = dec!(-1);
        for hours in 10..=16 {
            let charges = plan_charges(&plan, hours);
            assert!(charges.extra_charges >= previous);
            previous = charges.extra_charges;
        }
    }

    #[test]
    fn test_plan_metadata_carried_onto_bill() {
        let bill = calculate_bill(
            &twenty_four_hour(dec!(750), dec!(375), dec!(60)),
            &duration(24),
            &no_accessories(),
            &financial(dec!(2000), dec!(50)),
        )
        .unwrap();
        assert_eq!(bill.km_limit, dec!(240));
        assert_eq!(bill.extra_charge_per_km, dec!(5));
        assert_eq!(bill.grace_period_minutes, 60);
    }
}
