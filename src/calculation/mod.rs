//! Calculation logic for the GLS pricing engine.
//!
//! This module contains the month filter, the three component pricers
//! (delivered packages, pickups, SHD entries), their aggregate, the data
//! sanity checks, and monthly report assembly.
//!
//! Every pricer has a `calculate_*` form that takes an explicit
//! [`RateConfig`](crate::config::RateConfig) and returns an audit step, and a
//! short form that uses the standard GLS rates.

mod data_checks;
mod delivered_price;
mod month_filter;
mod monthly_report;
mod pickup_price;
mod shd_price;
mod total_price;

pub use data_checks::{NEGATIVE_COUNT, NON_CONTIGUOUS_SHD, check_tours};
pub use delivered_price::{DeliveredPriceResult, calculate_delivered_price, delivered_price};
pub use month_filter::{filter_by_month, select_month, select_month_from_params};
pub use monthly_report::build_monthly_report;
pub use pickup_price::{PickupPriceResult, calculate_pickup_price, pickup_price};
pub use shd_price::{ShdPriceResult, calculate_shd_price, shd_price};
pub use total_price::{TotalPriceResult, calculate_total_price, total_price};
