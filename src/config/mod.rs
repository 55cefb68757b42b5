//! Configuration loading and management for the GLS pricing engine.
//!
//! This module provides functionality to load carrier metadata and
//! effective-dated rate tables from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use gls_pricing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/gls").unwrap();
//! println!("Loaded carrier: {}", config.carrier().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CarrierConfig, CarrierMetadata, DeliveredRates, PickupRates, RateConfig, RoundingRule,
    ShdRates,
};
