//! Pickup pricing.
//!
//! Regular pickup packages and occasional (EO) pickups are each priced at a
//! flat rate. The two sub-totals are rounded separately and then summed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateConfig;
use crate::models::{AuditStep, PickupPrice, TourRecord};

/// The result of pricing pickups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupPriceResult {
    /// Sum of `pickup_points` over all tours.
    pub total_pickup_points: Decimal,
    /// Sum of `occasional_pickups` over all tours.
    pub total_occasional_pickups: Decimal,
    /// The rounded prices.
    pub prices: PickupPrice,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices the regular and occasional pickups of a set of tours.
///
/// # Examples
///
/// ```
/// use gls_pricing::calculation::calculate_pickup_price;
/// use gls_pricing::config::RateConfig;
/// use gls_pricing::models::TourRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut tour = TourRecord::new("t1", "d", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
/// tour.pickup_points = 50;
/// tour.occasional_pickups = 13;
///
/// let result = calculate_pickup_price(&[tour], &RateConfig::gls_default(), 1);
///
/// assert_eq!(result.prices.regular_price, Decimal::from_str("76.00").unwrap());
/// assert_eq!(result.prices.eo_price, Decimal::from_str("19.50").unwrap());
/// assert_eq!(result.prices.total_price, Decimal::from_str("95.50").unwrap());
/// ```
pub fn calculate_pickup_price(
    records: &[TourRecord],
    rates: &RateConfig,
    step_number: u32,
) -> PickupPriceResult {
    let pickup = &rates.pickup;
    let (total_pickup_points, total_occasional_pickups) = records.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(points, occasional), t| {
            (
                points + Decimal::from(t.pickup_points),
                occasional + Decimal::from(t.occasional_pickups),
            )
        },
    );

    let regular_price = rates.round(total_pickup_points * pickup.regular);
    let eo_price = rates.round(total_occasional_pickups * pickup.occasional);
    let total_price = rates.round(regular_price + eo_price);

    let audit_step = AuditStep {
        step_number,
        rule_id: "pickup_packages".to_string(),
        rule_name: "Pickup Packages".to_string(),
        input: serde_json::json!({
            "tour_count": records.len(),
            "pickup_points": total_pickup_points.to_string(),
            "occasional_pickups": total_occasional_pickups.to_string(),
            "regular_rate": pickup.regular.normalize().to_string(),
            "occasional_rate": pickup.occasional.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_price": regular_price.to_string(),
            "eo_price": eo_price.to_string(),
            "total_price": total_price.to_string()
        }),
        reasoning: format!(
            "{} pickups × {} = {}; {} EO × {} = {}; total {}",
            total_pickup_points,
            pickup.regular.normalize(),
            regular_price,
            total_occasional_pickups,
            pickup.occasional.normalize(),
            eo_price,
            total_price
        ),
    };

    PickupPriceResult {
        total_pickup_points,
        total_occasional_pickups,
        prices: PickupPrice {
            regular_price,
            eo_price,
            total_price,
        },
        audit_step,
    }
}

/// Prices pickups with the standard GLS rates.
pub fn pickup_price(records: &[TourRecord]) -> PickupPrice {
    calculate_pickup_price(records, &RateConfig::gls_default(), 1).prices
}
