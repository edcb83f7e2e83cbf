// src/prediction.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DashboardConfig;
use crate::error::PredictionError;
use crate::selection::Ticker;

/// Something that can forecast prices for a ticker.
#[async_trait]
pub trait PredictionService {
    async fn predict(&self, ticker: Ticker) -> Result<Vec<f64>, PredictionError>;
}

#[derive(Debug, Serialize)]
pub struct PredictionRequest<'a> {
    pub stock_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    pub prediction: Vec<f64>,
}

/// HTTP client for the LSTM prediction endpoint.
///
/// Sends one `POST {"stock_name": ..}` per call and never retries.
pub struct PredictionClient {
    client: Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        PredictionClient {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, PredictionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(PredictionClient {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict(&self, ticker: Ticker) -> Result<Vec<f64>, PredictionError> {
        let payload = PredictionRequest {
            stock_name: ticker.symbol(),
        };
        debug!(%ticker, endpoint = %self.endpoint, "requesting prediction");

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PredictionError::BadStatus { status, body });
        }

        let body = response.bytes().await?;
        let parsed: PredictionResponse =
            serde_json::from_slice(&body).map_err(|e| PredictionError::MalformedBody(e.to_string()))?;
        debug!(%ticker, values = parsed.prediction.len(), "prediction received");
        Ok(parsed.prediction)
    }
}
