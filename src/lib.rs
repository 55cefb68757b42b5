//! GLS tour pricing engine.
//!
//! This crate prices a month of GLS delivery tours for invoicing: delivered
//! packages on a cumulative two-tier rate, regular and occasional pickups at
//! flat rates, and SHD entries at position-dependent rates. Around the pricing
//! functions it provides effective-dated rate tables loaded from YAML,
//! viewer-scoped storage of tours and vehicle expenses, monthly reports with
//! an audit trace, rest request approval, and CSV export.
//!
//! # Example
//!
//! ```
//! use gls_pricing::calculation::{select_month, total_price};
//! use gls_pricing::models::TourRecord;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let mut tour = TourRecord::new("t1", "driver_01", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
//! tour.packages_delivered = 240;
//! tour.add_shd_entry(10);
//!
//! let january = select_month(&[tour], 2023, 1);
//! let prices = total_price(&january);
//!
//! assert_eq!(prices.delivered_price, Decimal::from_str("760.80").unwrap());
//! assert_eq!(prices.shd_price, Decimal::from_str("31.70").unwrap());
//! assert_eq!(prices.total_price, Decimal::from_str("792.50").unwrap());
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod repository;
