//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading carrier
//! rate tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{CarrierConfig, CarrierMetadata, RateConfig};

/// Loads and provides access to carrier rate configuration.
///
/// # Directory Structure
///
/// ```text
/// config/gls/
/// ├── carrier.yaml        # Carrier metadata
/// └── rates/
///     └── 2023-01-01.yaml # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use gls_pricing::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/gls").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
/// let rates = loader.rates_for(date).unwrap();
/// println!("Delivered base rate: {}", rates.delivered.base_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CarrierConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/gls")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `carrier.yaml` or the `rates` directory is missing
    /// - Any file contains invalid YAML
    /// - The `rates` directory holds no rate file
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CarrierMetadata>(&path.join("carrier.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        debug!(
            carrier = %metadata.code,
            rate_tables = rates.len(),
            "Loaded carrier configuration"
        );

        Ok(Self {
            config: CarrierConfig::new(metadata, rates),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying carrier configuration.
    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    /// Returns the carrier metadata.
    pub fn carrier(&self) -> &CarrierMetadata {
        self.config.carrier()
    }

    /// Gets the rate table in force on a given date.
    ///
    /// The most recent table effective on or before `date` wins.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gls_pricing::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/gls")?;
    /// let date = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
    /// let rates = loader.rates_for(date)?;
    /// println!("SHD first entry: {}", rates.shd.first);
    /// # Ok::<(), gls_pricing::error::EngineError>(())
    /// ```
    pub fn rates_for(&self, date: NaiveDate) -> EngineResult<&RateConfig> {
        self.config.rates_for(date)
    }
}
