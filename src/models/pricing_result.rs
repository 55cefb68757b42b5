//! Pricing result models for the GLS pricing engine.
//!
//! This module contains the [`PriceBreakdown`] and [`MonthlyReport`] types and
//! the audit structures that record how every amount was derived.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BillingMonth;

/// Prices for regular and occasional pickups.
///
/// `total_price` is the rounded sum of the two already-rounded sub-totals.
///
/// # Example
///
/// ```
/// use gls_pricing::models::PickupPrice;
/// use rust_decimal::Decimal;
///
/// let zero = PickupPrice::default();
/// assert_eq!(zero.total_price, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupPrice {
    /// Price of regular pickup packages.
    pub regular_price: Decimal,
    /// Price of occasional (EO) pickups.
    pub eo_price: Decimal,
    /// Sum of the two prices.
    pub total_price: Decimal,
}

/// Every reported price component for a set of tours.
///
/// # Example
///
/// ```
/// use gls_pricing::models::PriceBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let prices = PriceBreakdown {
///     delivered_price: Decimal::from_str("760.80").unwrap(),
///     pickup_price: Decimal::from_str("95.50").unwrap(),
///     regular_pickup_price: Decimal::from_str("76.00").unwrap(),
///     eo_price: Decimal::from_str("19.50").unwrap(),
///     shd_price: Decimal::from_str("63.69").unwrap(),
///     total_price: Decimal::from_str("919.99").unwrap(),
/// };
/// assert_eq!(prices.delivered_price + prices.pickup_price + prices.shd_price, prices.total_price);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Tiered price of delivered packages.
    pub delivered_price: Decimal,
    /// Total pickup price (regular + EO).
    pub pickup_price: Decimal,
    /// Regular pickup price.
    pub regular_pickup_price: Decimal,
    /// Occasional pickup price.
    pub eo_price: Decimal,
    /// Position-tiered SHD price.
    pub shd_price: Decimal,
    /// Grand total of delivered, pickup, and SHD prices.
    pub total_price: Decimal,
}

/// A single step in the audit trace recording a pricing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning about suspicious input that did not stop pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The tour the warning refers to.
    pub tour_id: String,
}

/// The complete audit trace for a pricing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of pricing steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings raised while pricing.
    pub warnings: Vec<AuditWarning>,
    /// Time spent pricing, in microseconds.
    #[serde(default)]
    pub duration_us: u64,
}

/// The priced result for one billing month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The month the report covers.
    pub month: BillingMonth,
    /// Number of tours priced.
    pub tour_count: usize,
    /// The priced components.
    pub prices: PriceBreakdown,
    /// How each component was derived.
    pub audit_trace: AuditTrace,
}
