// src/lib.rs

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod prediction;
pub mod price_store;
pub mod selection;
pub mod series;
pub mod window;

pub use chart::{Chart, Trace};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, Forecast, Interaction, InteractionRequest, Notice, Severity};
pub use error::{DashboardError, PredictionError};
pub use prediction::{PredictionClient, PredictionService};
pub use price_store::{CsvPriceStore, PriceStore};
pub use selection::{Selection, Ticker};
pub use series::{PredictionOverlay, PriceSeries, PricePoint};
pub use window::DateWindowFilter;
