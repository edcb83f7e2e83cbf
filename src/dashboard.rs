// src/dashboard.rs

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::chart::Chart;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, PredictionError};
use crate::prediction::{PredictionClient, PredictionService};
use crate::price_store::{CsvPriceStore, PriceStore};
use crate::selection::{Selection, Ticker};
use crate::series::{PredictionOverlay, PriceSeries};
use crate::window::DateWindowFilter;

/// Raw control values for one interaction, as the user entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionRequest {
    pub ticker: String,
    /// `None` means the picker was left at its default (the lower bound).
    pub start_date: Option<NaiveDate>,
    /// `None` means the picker was left at its default (the upper bound).
    pub end_date: Option<NaiveDate>,
    /// Whether the user pressed "Predict".
    pub predict: bool,
}

/// What one pass through the dashboard produced.
#[derive(Debug)]
pub enum Interaction {
    /// Input or data problem; nothing was charted.
    Rejected(DashboardError),
    /// The window holds no rows; nothing was charted.
    NoData(Selection),
    Charted {
        selection: Selection,
        actual: Chart,
        /// `None` unless a prediction was requested.
        prediction: Option<Result<Forecast, PredictionError>>,
    },
}

/// A successful prediction: the combined chart and the overlay behind it.
#[derive(Debug)]
pub struct Forecast {
    pub chart: Chart,
    pub overlay: PredictionOverlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    fn error(message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl Interaction {
    /// Messages to show the user, in display order.
    pub fn notices(&self) -> Vec<Notice> {
        match self {
            Interaction::Rejected(error) => vec![Notice::error(error.to_string())],
            Interaction::NoData(_) => vec![Notice::warning("No data available in the selected date range.")],
            Interaction::Charted {
                prediction: Some(Err(error)),
                ..
            } => vec![Notice::error(format!(
                "Error occurred while making the prediction request:\n\n{}",
                error
            ))],
            Interaction::Charted {
                prediction: Some(Ok(forecast)),
                ..
            } if !forecast.overlay.is_complete() => vec![Notice::warning(format!(
                "Received {} predicted values but only {} dates in the selected range; {} not shown.",
                forecast.overlay.received(),
                forecast.overlay.len(),
                forecast.overlay.received() - forecast.overlay.len()
            ))],
            Interaction::Charted { .. } => Vec::new(),
        }
    }

    /// Charts to render, in display order.
    pub fn charts(&self) -> Vec<&Chart> {
        match self {
            Interaction::Charted { actual, prediction, .. } => {
                let mut charts = vec![actual];
                if let Some(Ok(forecast)) = prediction {
                    charts.push(&forecast.chart);
                }
                charts
            }
            _ => Vec::new(),
        }
    }
}

/// Runs the linear select, load, filter, chart, predict flow.
///
/// Holds no state between interactions beyond its injected collaborators.
pub struct Dashboard<S, P> {
    config: DashboardConfig,
    store: S,
    predictor: P,
}

impl Dashboard<CsvPriceStore, PredictionClient> {
    /// CSV files from `config.data_dir` and the HTTP prediction client.
    pub fn from_config(config: DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        let store = CsvPriceStore::new(config.data_dir.clone());
        let predictor = PredictionClient::from_config(&config)?;
        Ok(Dashboard::new(config, store, predictor))
    }
}

impl<S, P> Dashboard<S, P>
where
    S: PriceStore,
    P: PredictionService,
{
    pub fn new(config: DashboardConfig, store: S, predictor: P) -> Self {
        Dashboard {
            config,
            store,
            predictor,
        }
    }

    /// Parses and validates the controls. Never touches the store.
    pub fn collect_selection(
        &self,
        ticker: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Selection, DashboardError> {
        let ticker: Ticker = ticker.parse()?;
        let bounds = self.config.bounds();
        let start_date = bounds.check("Start", start_date.unwrap_or(bounds.min))?;
        let end_date = bounds.check("End", end_date.unwrap_or(bounds.max))?;
        Selection::new(ticker, start_date, end_date)
    }

    /// Loads the ticker's history and keeps the selected window.
    pub fn load_series(&self, selection: &Selection) -> Result<PriceSeries, DashboardError> {
        let df = self.store.load(selection.ticker)?;
        let windowed = DateWindowFilter::new(&df, selection).filter()?;
        PriceSeries::from_frame(&windowed)
    }

    /// Requests a forecast and overlays it on the trailing dates of `series`.
    pub async fn predict(&self, selection: &Selection, series: &PriceSeries) -> Result<Forecast, PredictionError> {
        let predictions = self.predictor.predict(selection.ticker).await?;
        let overlay = series.align_predictions(&predictions);
        let chart = Chart::actual_vs_predicted(selection.ticker, series, &overlay);
        Ok(Forecast { chart, overlay })
    }

    pub async fn run(&self, request: &InteractionRequest) -> Interaction {
        // 1. Controls, bounds and window order; aborts before any file access
        let selection = match self.collect_selection(&request.ticker, request.start_date, request.end_date) {
            Ok(selection) => selection,
            Err(error) => {
                info!(%error, "selection rejected");
                return Interaction::Rejected(error);
            }
        };

        // 2. History for the window
        let series = match self.load_series(&selection) {
            Ok(series) => series,
            Err(error) => {
                info!(ticker = %selection.ticker, %error, "price data unavailable");
                return Interaction::Rejected(error);
            }
        };
        if series.is_empty() {
            info!(
                ticker = %selection.ticker,
                start = %selection.start_date,
                end = %selection.end_date,
                "window is empty"
            );
            return Interaction::NoData(selection);
        }

        // 3. Actual chart
        let actual = Chart::actual(selection.ticker, &series);
        info!(ticker = %selection.ticker, rows = series.len(), "charted actual prices");

        // 4. Optional prediction overlay
        let prediction = if request.predict {
            let result = self.predict(&selection, &series).await;
            if let Err(error) = &result {
                warn!(ticker = %selection.ticker, %error, retryable = error.is_retryable(), "prediction failed");
            }
            Some(result)
        } else {
            None
        };

        Interaction::Charted {
            selection,
            actual,
            prediction,
        }
    }
}
