//! Delivered-package pricing.
//!
//! Packages are priced cumulatively over the whole set of tours in two tiers:
//!
//! - Up to and including the tier threshold (18,671): 3.17 per package
//! - Every package beyond the threshold: 2.82 per package
//!
//! The amount is rounded to two decimals once, after both tiers are summed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateConfig;
use crate::models::{AuditStep, TourRecord};

/// The result of pricing delivered packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredPriceResult {
    /// Sum of `packages_delivered` over all tours.
    pub total_packages: Decimal,
    /// Packages priced at the base rate.
    pub base_tier_packages: Decimal,
    /// Packages priced at the overflow rate.
    pub overflow_packages: Decimal,
    /// The rounded price.
    pub price: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices the delivered packages of a set of tours.
///
/// The tier threshold applies to the total across all tours, not per tour.
/// A negative total is priced at the base rate, as the formula gives.
///
/// # Arguments
///
/// * `records` - The tours to price (usually one month for one driver)
/// * `rates` - The rate table in force
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use gls_pricing::calculation::calculate_delivered_price;
/// use gls_pricing::config::RateConfig;
/// use gls_pricing::models::TourRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut tour = TourRecord::new("t1", "d", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
/// tour.packages_delivered = 18740;
///
/// let result = calculate_delivered_price(&[tour], &RateConfig::gls_default(), 1);
///
/// assert_eq!(result.base_tier_packages, Decimal::from(18671));
/// assert_eq!(result.overflow_packages, Decimal::from(69));
/// assert_eq!(result.price, Decimal::from_str("59381.65").unwrap());
/// ```
pub fn calculate_delivered_price(
    records: &[TourRecord],
    rates: &RateConfig,
    step_number: u32,
) -> DeliveredPriceResult {
    let tier = &rates.delivered;
    let threshold = Decimal::from(tier.tier_threshold);
    // Counts are summed as decimals so a large month cannot overflow.
    let total_packages = records
        .iter()
        .fold(Decimal::ZERO, |acc, t| acc + Decimal::from(t.packages_delivered));

    let (base_tier_packages, overflow_packages) = if total_packages <= threshold {
        (total_packages, Decimal::ZERO)
    } else {
        (threshold, total_packages - threshold)
    };

    let base_amount = base_tier_packages * tier.base_rate;
    let overflow_amount = overflow_packages * tier.overflow_rate;
    let price = rates.round(base_amount + overflow_amount);

    let reasoning = if overflow_packages > Decimal::ZERO {
        format!(
            "{} packages exceed the {} threshold: {} × {} + {} × {} = {}",
            total_packages,
            tier.tier_threshold,
            base_tier_packages,
            tier.base_rate.normalize(),
            overflow_packages,
            tier.overflow_rate.normalize(),
            price
        )
    } else {
        format!(
            "{} packages within the {} threshold: {} × {} = {}",
            total_packages,
            tier.tier_threshold,
            total_packages,
            tier.base_rate.normalize(),
            price
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "delivered_packages".to_string(),
        rule_name: "Delivered Packages".to_string(),
        input: serde_json::json!({
            "tour_count": records.len(),
            "total_packages": total_packages.to_string(),
            "tier_threshold": tier.tier_threshold,
            "base_rate": tier.base_rate.normalize().to_string(),
            "overflow_rate": tier.overflow_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_tier_packages": base_tier_packages.to_string(),
            "overflow_packages": overflow_packages.to_string(),
            "price": price.to_string()
        }),
        reasoning,
    };

    DeliveredPriceResult {
        total_packages,
        base_tier_packages,
        overflow_packages,
        price,
        audit_step,
    }
}

/// Prices delivered packages with the standard GLS rates.
///
/// # Examples
///
/// ```
/// use gls_pricing::calculation::delivered_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(delivered_price(&[]), Decimal::ZERO);
/// ```
pub fn delivered_price(records: &[TourRecord]) -> Decimal {
    calculate_delivered_price(records, &RateConfig::gls_default(), 1).price
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_tours(packages: &[i64]) -> Vec<TourRecord> {
        packages
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let mut tour = TourRecord::new(
                    format!("gls_{:03}", i),
                    "driver_01",
                    "GLS-001",
                    NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
                );
                tour.packages_delivered = p;
                tour
            })
            .collect()
    }

    // ==========================================================================
    // DP-001: below threshold, single rate
    // ==========================================================================
    #[test]
    fn test_dp_001_below_threshold() {
        let result = calculate_delivered_price(&make_tours(&[95, 145]), &RateConfig::gls_default(), 1);

        assert_eq!(result.total_packages, dec("240"));
        assert_eq!(result.price, dec("760.80"));
        assert_eq!(result.overflow_packages, Decimal::ZERO);
    }

    // ==========================================================================
    // DP-002: crossing the threshold switches to the overflow rate
    // ==========================================================================
    #[test]
    fn test_dp_002_above_threshold() {
        let result =
            calculate_delivered_price(&make_tours(&[95, 145, 18500]), &RateConfig::gls_default(), 1);

        assert_eq!(result.total_packages, dec("18740"));
        assert_eq!(result.base_tier_packages, dec("18671"));
        assert_eq!(result.overflow_packages, dec("69"));
        assert_eq!(result.price, dec("59381.65"));
    }

    // ==========================================================================
    // DP-003: exactly at threshold stays in the base tier
    // ==========================================================================
    #[test]
    fn test_dp_003_exactly_at_threshold() {
        let result = calculate_delivered_price(&make_tours(&[18671]), &RateConfig::gls_default(), 1);

        assert_eq!(result.overflow_packages, Decimal::ZERO);
        assert_eq!(result.price, dec("59187.07"));
    }

    #[test]
    fn test_one_past_threshold_uses_overflow_rate() {
        let at = delivered_price(&make_tours(&[18671]));
        let past = delivered_price(&make_tours(&[18672]));
        assert_eq!(past - at, dec("2.82"));
    }

    #[test]
    fn test_threshold_is_cumulative_across_tours() {
        let split = delivered_price(&make_tours(&[10000, 10000]));
        let single = delivered_price(&make_tours(&[20000]));
        assert_eq!(split, single);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let result = calculate_delivered_price(&[], &RateConfig::gls_default(), 1);
        assert_eq!(result.price, Decimal::ZERO);
        assert_eq!(result.total_packages, Decimal::ZERO);
    }

    #[test]
    fn test_negative_total_priced_at_base_rate() {
        assert_eq!(delivered_price(&make_tours(&[-10])), dec("-31.70"));
    }

    #[test]
    fn test_totals_beyond_i64_do_not_overflow() {
        let result =
            calculate_delivered_price(&make_tours(&[i64::MAX, 1]), &RateConfig::gls_default(), 1);

        let total = Decimal::from(i64::MAX) + Decimal::ONE;
        assert_eq!(result.total_packages, total);
        assert_eq!(result.overflow_packages, total - dec("18671"));
        // 18671 × 3.17 + (2^63 - 18671) × 2.82
        assert_eq!(result.price, dec("26009909143930474313.41"));
        assert_eq!(
            result.audit_step.input["total_packages"].as_str().unwrap(),
            "9223372036854775808"
        );
    }

    #[test]
    fn test_audit_step_records_tiers() {
        let result =
            calculate_delivered_price(&make_tours(&[95, 145, 18500]), &RateConfig::gls_default(), 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "delivered_packages");
        assert_eq!(result.audit_step.input["total_packages"].as_str().unwrap(), "18740");
        assert_eq!(result.audit_step.input["base_rate"].as_str().unwrap(), "3.17");
        assert_eq!(result.audit_step.output["overflow_packages"].as_str().unwrap(), "69");
        assert_eq!(result.audit_step.output["price"].as_str().unwrap(), "59381.65");
        assert!(result.audit_step.reasoning.contains("exceed"));
    }

    #[test]
    fn test_audit_reasoning_within_threshold() {
        let result = calculate_delivered_price(&make_tours(&[240]), &RateConfig::gls_default(), 1);
        assert!(result.audit_step.reasoning.contains("within"));
        assert!(result.audit_step.reasoning.contains("760.80"));
    }
}
