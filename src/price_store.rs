// src/price_store.rs

use std::path::PathBuf;

use polars::prelude::*;
use tracing::debug;

use crate::error::DashboardError;
use crate::selection::Ticker;

pub const DATE_COLUMN: &str = "Date";
pub const CLOSE_COLUMN: &str = "Close";

/// Cell spellings price exports use for a missing value.
const NULL_SPELLINGS: [&str; 5] = ["", "null", "NaN", "nan", "NA"];

/// Source of a ticker's full price history.
///
/// Implementations return a frame with a string `Date` column and a
/// `Float64` `Close` column, in the order the source holds them.
pub trait PriceStore {
    fn load(&self, ticker: Ticker) -> Result<DataFrame, DashboardError>;
}

/// Reads `<data_dir>/<TICKER>_data.csv`.
#[derive(Debug, Clone)]
pub struct CsvPriceStore {
    data_dir: PathBuf,
}

impl CsvPriceStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        CsvPriceStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, ticker: Ticker) -> PathBuf {
        self.data_dir.join(format!("{}_data.csv", ticker))
    }
}

impl PriceStore for CsvPriceStore {
    fn load(&self, ticker: Ticker) -> Result<DataFrame, DashboardError> {
        let path = self.path_for(ticker);
        if !path.exists() {
            return Err(DashboardError::MissingData { ticker, path });
        }

        debug!(%ticker, path = %path.display(), "reading price file");
        let null_values = NullValues::AllColumns(NULL_SPELLINGS.iter().map(|s| s.to_string()).collect());
        let raw = CsvReader::from_path(&path)?
            .has_header(true)
            .with_null_values(Some(null_values))
            .finish()
            .map_err(|e| DashboardError::MalformedData(format!("{}: {}", path.display(), e)))?;
        let df = PriceFrame::normalize(&raw)?;
        debug!(%ticker, rows = df.height(), "loaded price history");
        Ok(df)
    }
}

/// Reduces an arbitrary price table to the two columns the dashboard reads.
pub struct PriceFrame;

impl PriceFrame {
    pub fn normalize(raw: &DataFrame) -> Result<DataFrame, DashboardError> {
        let names = raw.get_column_names();
        for wanted in [DATE_COLUMN, CLOSE_COLUMN] {
            if !names.contains(&wanted) {
                return Err(DashboardError::MalformedData(format!(
                    "missing '{}' column (found: {})",
                    wanted,
                    names.join(", ")
                )));
            }
        }

        // A header-only or all-null column carries no type information.
        let close = raw.column(CLOSE_COLUMN)?;
        if !close.dtype().is_numeric() && close.null_count() < close.len() {
            return Err(DashboardError::MalformedData(format!(
                "'{}' column is not numeric ({})",
                CLOSE_COLUMN,
                close.dtype()
            )));
        }

        let date = raw.column(DATE_COLUMN)?.cast(&DataType::String)?;
        let close = close.cast(&DataType::Float64)?;
        Ok(DataFrame::new(vec![date, close])?)
    }
}
