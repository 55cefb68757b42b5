//! Aggregate pricing.
//!
//! Composes the delivered, pickup, and SHD prices into a [`PriceBreakdown`].

use serde::{Deserialize, Serialize};

use crate::config::RateConfig;
use crate::models::{AuditStep, PriceBreakdown, TourRecord};

use super::delivered_price::calculate_delivered_price;
use super::pickup_price::calculate_pickup_price;
use super::shd_price::calculate_shd_price;

/// The result of pricing every component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalPriceResult {
    /// The priced components and their total.
    pub prices: PriceBreakdown,
    /// One audit step per component, then one for the total.
    pub audit_steps: Vec<AuditStep>,
}

/// Prices every component of a set of tours and their grand total.
///
/// The total is the rounded sum of the three reported (already rounded)
/// component prices, so it always matches what an invoice reader adds up.
///
/// # Arguments
///
/// * `records` - The tours to price
/// * `rates` - The rate table in force
/// * `step_number_start` - The starting step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use gls_pricing::calculation::calculate_total_price;
/// use gls_pricing::config::RateConfig;
///
/// let result = calculate_total_price(&[], &RateConfig::gls_default(), 1);
///
/// assert!(result.prices.total_price.is_zero());
/// assert_eq!(result.audit_steps.len(), 4);
/// ```
pub fn calculate_total_price(
    records: &[TourRecord],
    rates: &RateConfig,
    step_number_start: u32,
) -> TotalPriceResult {
    let delivered = calculate_delivered_price(records, rates, step_number_start);
    let pickup = calculate_pickup_price(records, rates, step_number_start + 1);
    let shd = calculate_shd_price(records, rates, step_number_start + 2);

    let total_price = rates.round(delivered.price + pickup.prices.total_price + shd.price);

    let total_step = AuditStep {
        step_number: step_number_start + 3,
        rule_id: "total_price".to_string(),
        rule_name: "Total Price".to_string(),
        input: serde_json::json!({
            "delivered_price": delivered.price.to_string(),
            "pickup_price": pickup.prices.total_price.to_string(),
            "shd_price": shd.price.to_string()
        }),
        output: serde_json::json!({
            "total_price": total_price.to_string()
        }),
        reasoning: format!(
            "{} delivered + {} pickup + {} SHD = {}",
            delivered.price, pickup.prices.total_price, shd.price, total_price
        ),
    };

    TotalPriceResult {
        prices: PriceBreakdown {
            delivered_price: delivered.price,
            pickup_price: pickup.prices.total_price,
            regular_pickup_price: pickup.prices.regular_price,
            eo_price: pickup.prices.eo_price,
            shd_price: shd.price,
            total_price,
        },
        audit_steps: vec![
            delivered.audit_step,
            pickup.audit_step,
            shd.audit_step,
            total_step,
        ],
    }
}

/// Prices every component with the standard GLS rates.
pub fn total_price(records: &[TourRecord]) -> PriceBreakdown {
    calculate_total_price(records, &RateConfig::gls_default(), 1).prices
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_tour(id: &str, packages: i64, pickups: i64, eo: i64, shd: &[i64]) -> TourRecord {
        let mut tour = TourRecord::new(
            id,
            "driver_01",
            "GLS-001",
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
        );
        tour.packages_delivered = packages;
        tour.pickup_points = pickups;
        tour.occasional_pickups = eo;
        for &value in shd {
            tour.add_shd_entry(value);
        }
        tour
    }

    fn january_tours() -> Vec<TourRecord> {
        vec![
            make_tour("gls_001", 95, 20, 5, &[10, 5, 3]),
            make_tour("gls_002", 145, 30, 8, &[8, 4]),
        ]
    }

    // ==========================================================================
    // TP-001: full breakdown for a two-tour month
    // ==========================================================================
    #[test]
    fn test_tp_001_full_breakdown() {
        let prices = total_price(&january_tours());

        assert_eq!(prices.delivered_price, dec("760.80"));
        assert_eq!(prices.regular_pickup_price, dec("76.00"));
        assert_eq!(prices.eo_price, dec("19.50"));
        assert_eq!(prices.pickup_price, dec("95.50"));
        assert_eq!(prices.shd_price, dec("63.69"));
        assert_eq!(prices.total_price, dec("919.99"));
    }

    // ==========================================================================
    // TP-002: empty input yields all-zero breakdown
    // ==========================================================================
    #[test]
    fn test_tp_002_empty_input() {
        assert_eq!(total_price(&[]), PriceBreakdown::default());
    }

    #[test]
    fn test_total_is_sum_of_reported_components() {
        let prices = total_price(&january_tours());
        assert_eq!(
            prices.total_price,
            prices.delivered_price + prices.pickup_price + prices.shd_price
        );
    }

    #[test]
    fn test_audit_steps_are_sequenced() {
        let result = calculate_total_price(&january_tours(), &RateConfig::gls_default(), 5);

        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![5, 6, 7, 8]);

        let rule_ids: Vec<&str> = result.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec!["delivered_packages", "pickup_packages", "shd_entries", "total_price"]
        );
        assert_eq!(
            result.audit_steps[3].output["total_price"].as_str().unwrap(),
            "919.99"
        );
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let tours = january_tours();
        assert_eq!(total_price(&tours), total_price(&tours));
    }
}
