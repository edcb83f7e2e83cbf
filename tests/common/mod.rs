#![allow(dead_code)]

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use async_trait::async_trait;
use chrono::NaiveDate;
use polars::prelude::*;
use reqwest::StatusCode;
use stockcast::{DashboardConfig, DashboardError, PredictionError, PredictionService, PriceStore, Ticker};
use tempfile::TempDir;

/// Yahoo-style export: 2 rows outside the AAPL example window, 8 inside.
pub const AAPL_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2019-12-31,72.48,73.42,72.38,73.41,72.44,100805600
2020-01-01,73.41,73.41,73.41,73.41,72.44,0
2020-01-02,74.06,75.15,73.80,75.09,74.10,135480400
2020-01-03,74.29,75.14,74.13,74.36,73.38,146322800
2020-01-06,73.45,74.99,73.19,74.95,73.96,118387200
2020-01-07,74.96,75.22,74.37,74.60,73.62,108872000
2020-01-08,74.29,76.11,74.29,75.80,74.80,132079200
2020-01-09,76.81,77.61,76.55,77.41,76.39,170108400
2020-01-10,77.65,78.17,77.06,77.58,76.56,140644800
2020-01-13,77.91,79.27,77.79,79.24,78.20,121532000
";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A temporary data directory holding `<TICKER>_data.csv` fixtures.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        DataDir {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub fn with_aapl() -> Self {
        let data = DataDir::new();
        data.write(Ticker::Aapl, AAPL_CSV);
        data
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, ticker: Ticker, contents: &str) -> PathBuf {
        let path = self.dir.path().join(format!("{}_data.csv", ticker));
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn config(&self) -> DashboardConfig {
        DashboardConfig {
            data_dir: self.path().to_path_buf(),
            ..DashboardConfig::default()
        }
    }
}

/// In-memory store that counts how often it was asked for data.
pub struct FakeStore {
    frame: Option<DataFrame>,
    loads: AtomicUsize,
}

impl FakeStore {
    pub fn with_frame(frame: DataFrame) -> Self {
        FakeStore {
            frame: Some(frame),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        FakeStore {
            frame: None,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl<'a> PriceStore for &'a FakeStore {
    fn load(&self, ticker: Ticker) -> Result<DataFrame, DashboardError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.frame {
            Some(frame) => Ok(frame.clone()),
            None => Err(DashboardError::MissingData {
                ticker,
                path: PathBuf::from("memory"),
            }),
        }
    }
}

pub enum Canned {
    Values(Vec<f64>),
    Status(u16),
    Malformed,
}

/// Prediction service returning a fixed answer.
pub struct FakePredictor {
    canned: Canned,
    calls: AtomicUsize,
}

impl FakePredictor {
    pub fn new(canned: Canned) -> Self {
        FakePredictor {
            canned,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<'a> PredictionService for &'a FakePredictor {
    async fn predict(&self, _ticker: Ticker) -> Result<Vec<f64>, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.canned {
            Canned::Values(values) => Ok(values.clone()),
            Canned::Status(code) => Err(PredictionError::BadStatus {
                status: StatusCode::from_u16(*code).unwrap(),
                body: "canned failure".to_string(),
            }),
            Canned::Malformed => Err(PredictionError::MalformedBody("canned".to_string())),
        }
    }
}

/// What the fake endpoint saw.
#[derive(Debug)]
pub struct Received {
    pub method: String,
    pub url: String,
    pub body: String,
}

/// A local HTTP endpoint that answers exactly one request.
pub struct FakeEndpoint {
    pub url: String,
    handle: JoinHandle<Option<Received>>,
}

impl FakeEndpoint {
    pub fn serve_once(status: u16, body: &str) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fake endpoint");
        let addr = server.server_addr().to_ip().expect("ip listener");
        let url = format!("http://{}/LSTM_Predict", addr);
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let mut request = server.recv().ok()?;
            let mut received = String::new();
            request.as_reader().read_to_string(&mut received).ok()?;
            let seen = Received {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body: received,
            };
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            request.respond(response).ok()?;
            Some(seen)
        });

        FakeEndpoint { url, handle }
    }

    pub fn received(self) -> Received {
        self.handle.join().expect("endpoint thread").expect("request received")
    }
}

/// URL of a local port nothing is listening on.
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}/LSTM_Predict", addr)
}
