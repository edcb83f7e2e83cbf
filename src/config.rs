// src/config.rs

//! Dashboard configuration.
//!
//! Every field has a default matching the stock setup: a prediction service
//! on localhost, CSVs under `data/`, and date pickers bounded to 2020-2022.
//! A TOML file may override any subset of the fields:
//!
//! ```toml
//! endpoint = "http://10.0.0.5:8000/LSTM_Predict"
//! data_dir = "/srv/prices"
//! request_timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::selection::DateBounds;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/LSTM_Predict";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Full URL of the prediction endpoint.
    pub endpoint: String,
    /// Directory holding `<TICKER>_data.csv` files.
    pub data_dir: PathBuf,
    /// Earliest date either picker accepts.
    pub min_date: NaiveDate,
    /// Latest date either picker accepts.
    pub max_date: NaiveDate,
    /// Overall timeout for the prediction call; `None` leaves the transport default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            min_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            max_date: NaiveDate::from_ymd_opt(2022, 12, 31).unwrap_or_default(),
            request_timeout_secs: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, DashboardError> {
        let config: DashboardConfig =
            toml::from_str(raw).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("reading {}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.min_date > self.max_date {
            return Err(DashboardError::Config(format!(
                "min_date {} is after max_date {}",
                self.min_date, self.max_date
            )));
        }
        if self.endpoint.trim().is_empty() {
            return Err(DashboardError::Config("endpoint must not be empty".into()));
        }
        Ok(())
    }

    pub fn bounds(&self) -> DateBounds {
        DateBounds {
            min: self.min_date,
            max: self.max_date,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
