// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use serde::{Deserialize, Serialize};
use solarsmart_types::{ForecastRequest, ScenarioConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "solarsmart.toml";

pub const ENV_API_URL: &str = "SOLARSMART_API_URL";
pub const ENV_LOCATION: &str = "SOLARSMART_LOCATION";
pub const ENV_POLL_INTERVAL: &str = "SOLARSMART_POLL_INTERVAL_SECS";
pub const ENV_UNIT_PRICE: &str = "SOLARSMART_UNIT_PRICE";

/// Longest forecast horizon the weather provider serves
const MAX_FORECAST_DAYS: u32 = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub live: LiveConfig,
    pub simulation: SimulationConfig,
    pub forecast: ForecastConfig,
}

/// Analytics backend connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Live twin view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// Location selected on startup
    pub default_location: String,
    pub poll_interval_secs: u64,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            default_location: "Nagpur".to_owned(),
            poll_interval_secs: 10,
        }
    }
}

/// What-if scenario batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Electricity price per kWh used for revenue figures
    pub unit_price: f64,
    /// Configuration the variants are derived from
    pub base: ScenarioConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            unit_price: 8.0,
            base: ScenarioConfig::default(),
        }
    }
}

/// Defaults for the retrain-and-forecast workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub days: u32,
    /// Installed capacity (kW)
    pub panel_capacity: f64,
    /// Panel efficiency (%)
    pub panel_efficiency: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let request = ForecastRequest::default();
        Self {
            days: request.forecast_days,
            panel_capacity: request.panel_capacity,
            panel_efficiency: request.panel_efficiency,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if present.
    ///
    /// An explicit path must exist. Environment overrides are applied on top
    /// and the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                warn!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("✅ Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Override fields from `SOLARSMART_*` variables resolved through `lookup`.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }

        if let Some(location) = lookup(ENV_LOCATION) {
            self.live.default_location = location;
        }

        if let Some(value) = lookup(ENV_POLL_INTERVAL) {
            match value.trim().parse::<u64>() {
                Ok(secs) => self.live.poll_interval_secs = secs,
                Err(e) => warn!("Ignoring {}='{}': {}", ENV_POLL_INTERVAL, value, e),
            }
        }

        if let Some(value) = lookup(ENV_UNIT_PRICE) {
            match value.trim().parse::<f64>() {
                Ok(price) => self.simulation.unit_price = price,
                Err(e) => warn!("Ignoring {}='{}': {}", ENV_UNIT_PRICE, value, e),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".to_owned()));
        }

        if self.live.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "live.poll_interval_secs must be at least 1".to_owned(),
            ));
        }

        let price = self.simulation.unit_price;
        if !price.is_finite() || price <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "simulation.unit_price must be a positive number, got {price}"
            )));
        }

        if self.simulation.base.num_panels == 0 {
            return Err(ConfigError::Invalid(
                "simulation.base.num_panels must be at least 1".to_owned(),
            ));
        }

        if !(1..=MAX_FORECAST_DAYS).contains(&self.forecast.days) {
            return Err(ConfigError::Invalid(format!(
                "forecast.days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
                self.forecast.days
            )));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.live.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Forecast request for `location` with the configured defaults
    pub fn forecast_request(&self, location: impl Into<String>) -> ForecastRequest {
        ForecastRequest {
            location: location.into(),
            forecast_days: self.forecast.days,
            panel_capacity: self.forecast.panel_capacity,
            panel_efficiency: self.forecast.panel_efficiency,
        }
    }
}
