// src/error.rs

use std::path::PathBuf;

use chrono::NaiveDate;
use polars::prelude::PolarsError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::selection::Ticker;

/// Errors that abort a dashboard interaction before anything is charted.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The requested window is inverted.
    #[error("End date must be after start date.")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A date falls outside the range the date pickers allow.
    #[error("{field} date {date} is outside the allowed range {min} to {max}")]
    DateOutOfBounds {
        field: &'static str,
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("Unknown ticker '{0}', expected one of AAPL, TSLA, AMZN, MSFT")]
    UnknownTicker(String),

    /// No backing file exists for the ticker.
    #[error("No local data found for {ticker} at {}", path.display())]
    MissingData { ticker: Ticker, path: PathBuf },

    /// The file exists but does not carry usable `Date`/`Close` columns.
    #[error("Malformed price data: {0}")]
    MalformedData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// Failure kinds of a single call to the prediction endpoint.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// Transport-level failure: refused connection, DNS, timeout.
    #[error("connection to prediction service failed: {0}")]
    ConnectionFailed(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("prediction service returned {status}: {body}")]
    BadStatus { status: StatusCode, body: String },

    /// The body was not a JSON object with a numeric `prediction` array.
    #[error("malformed prediction response: {0}")]
    MalformedBody(String),
}

impl PredictionError {
    /// Whether repeating the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            PredictionError::ConnectionFailed(_) => true,
            PredictionError::BadStatus { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            PredictionError::MalformedBody(_) => false,
        }
    }
}
