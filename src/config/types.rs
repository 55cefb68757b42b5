//! Configuration types for GLS pricing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the carrier the rates apply to.
#[derive(Debug, Clone, Deserialize)]
pub struct CarrierMetadata {
    /// Short carrier code (e.g., "GLS").
    pub code: String,
    /// The human-readable carrier name.
    pub name: String,
    /// ISO currency code the rates are expressed in.
    pub currency: String,
}

/// Rounding rule applied when a price is reduced to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingRule {
    /// Midpoints round away from zero (0.125 -> 0.13).
    #[default]
    HalfUp,
    /// Midpoints round to the even neighbour (0.125 -> 0.12).
    HalfEven,
}

impl RoundingRule {
    /// The matching `rust_decimal` strategy.
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingRule::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingRule::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Cumulative two-tier rate for delivered packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredRates {
    /// Packages priced at `base_rate` before the overflow rate applies.
    pub tier_threshold: i64,
    /// Unit price up to and including the threshold.
    pub base_rate: Decimal,
    /// Unit price beyond the threshold.
    pub overflow_rate: Decimal,
}

/// Flat pickup rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupRates {
    /// Unit price of a regular pickup package.
    pub regular: Decimal,
    /// Unit price of an occasional (EO) pickup.
    pub occasional: Decimal,
}

/// Position-dependent SHD rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShdRates {
    /// Unit price of the first entry of a tour.
    pub first: Decimal,
    /// Unit price of the second entry of a tour.
    pub second: Decimal,
    /// Unit price of the third and every later entry.
    pub subsequent: Decimal,
}

impl ShdRates {
    /// Unit price for the entry at 0-based `index` within its tour.
    pub fn unit_price(&self, index: usize) -> Decimal {
        match index {
            0 => self.first,
            1 => self.second,
            _ => self.subsequent,
        }
    }
}

/// Rate table for a specific effective date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// The first day these rates apply.
    pub effective_date: NaiveDate,
    /// Delivered package rates.
    pub delivered: DeliveredRates,
    /// Pickup rates.
    pub pickup: PickupRates,
    /// SHD rates.
    pub shd: ShdRates,
    /// Rounding rule for reported prices.
    #[serde(default)]
    pub rounding: RoundingRule,
}

impl RateConfig {
    /// The standard GLS rate table.
    ///
    /// # Example
    ///
    /// ```
    /// use gls_pricing::config::RateConfig;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let rates = RateConfig::gls_default();
    /// assert_eq!(rates.delivered.tier_threshold, 18671);
    /// assert_eq!(rates.delivered.base_rate, Decimal::from_str("3.17").unwrap());
    /// ```
    pub fn gls_default() -> Self {
        Self {
            effective_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            delivered: DeliveredRates {
                tier_threshold: 18671,
                base_rate: dec!(3.17),
                overflow_rate: dec!(2.82),
            },
            pickup: PickupRates {
                regular: dec!(1.52),
                occasional: dec!(1.5),
            },
            shd: ShdRates {
                first: dec!(3.17),
                second: dec!(0.63),
                subsequent: dec!(0.32),
            },
            rounding: RoundingRule::HalfUp,
        }
    }

    /// Rounds an amount to two decimals with this table's rule.
    ///
    /// The result always carries a scale of 2, so `19.5` becomes `19.50`.
    pub fn round(&self, amount: Decimal) -> Decimal {
        let mut rounded = amount.round_dp_with_strategy(2, self.rounding.strategy());
        rounded.rescale(2);
        rounded
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self::gls_default()
    }
}

/// The complete carrier configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CarrierConfig {
    /// Carrier metadata.
    metadata: CarrierMetadata,
    /// Rate tables by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
}

impl CarrierConfig {
    /// Creates a new CarrierConfig, sorting rate tables by effective date.
    pub fn new(metadata: CarrierMetadata, rates: Vec<RateConfig>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rates: sorted_rates,
        }
    }

    /// Returns the carrier metadata.
    pub fn carrier(&self) -> &CarrierMetadata {
        &self.metadata
    }

    /// Returns all rate tables, oldest first.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }

    /// Gets the rate table in force on a given date.
    ///
    /// The most recent table effective on or before `date` wins.
    pub fn rates_for(&self, date: NaiveDate) -> EngineResult<&RateConfig> {
        self.rates
            .iter()
            .rev()
            .find(|rc| rc.effective_date <= date)
            .ok_or(EngineError::RateNotFound { date })
    }
}
