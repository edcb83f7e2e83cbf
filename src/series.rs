// src/series.rs

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::warn;

use crate::error::DashboardError;
use crate::price_store::{CLOSE_COLUMN, DATE_COLUMN};
use crate::window::parse_date;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    /// `None` where the source row had no close price.
    pub close: Option<f64>,
}

/// Dated closing prices in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        PriceSeries { points }
    }

    /// Converts a normalized price frame; rows with a null date are skipped.
    pub fn from_frame(df: &DataFrame) -> Result<Self, DashboardError> {
        let dates = df.column(DATE_COLUMN)?.str()?;
        let closes = df.column(CLOSE_COLUMN)?.f64()?;

        let mut points = Vec::with_capacity(df.height());
        for (raw, close) in dates.into_iter().zip(closes.into_iter()) {
            let Some(raw) = raw else { continue };
            let date = parse_date(raw)
                .ok_or_else(|| DashboardError::MalformedData(format!("unparseable date '{}'", raw)))?;
            points.push(PricePoint { date, close });
        }
        Ok(PriceSeries { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn closes(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Pairs predicted values with the trailing dates of this series.
    ///
    /// With `k` predictions and `N` rows, `predictions[i]` lands on date
    /// `N - k + i`. When `k > N` every date is used and the surplus
    /// predictions past the `N`th are dropped.
    pub fn align_predictions(&self, predictions: &[f64]) -> PredictionOverlay {
        let n = self.points.len();
        let k = predictions.len();
        if k > n {
            warn!(
                predictions = k,
                rows = n,
                "more predictions than dates in window; surplus values dropped"
            );
        }

        let offset = n.saturating_sub(k);
        let points = self.points[offset..]
            .iter()
            .zip(predictions.iter())
            .map(|(point, value)| PredictedPoint {
                date: point.date,
                value: *value,
            })
            .collect();

        PredictionOverlay {
            points,
            received: k,
            window_len: n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Predicted values placed on the dates they were paired with.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOverlay {
    points: Vec<PredictedPoint>,
    received: usize,
    window_len: usize,
}

impl PredictionOverlay {
    pub fn points(&self) -> &[PredictedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of values the service returned.
    pub fn received(&self) -> usize {
        self.received
    }

    /// False when some returned values had no date to land on.
    pub fn is_complete(&self) -> bool {
        self.received <= self.window_len
    }
}
