// tests/selection_tests.rs

use std::time::Duration;

use stockcast::{DashboardConfig, DashboardError, Selection, Ticker};

mod common;
use common::date;

#[test]
fn test_ticker_parsing() {
    assert_eq!("AAPL".parse::<Ticker>().unwrap(), Ticker::Aapl);
    assert_eq!("tsla".parse::<Ticker>().unwrap(), Ticker::Tsla);
    assert_eq!(" Amzn ".parse::<Ticker>().unwrap(), Ticker::Amzn);
    assert_eq!("MSFT".parse::<Ticker>().unwrap(), Ticker::Msft);

    match "GOOGL".parse::<Ticker>() {
        Err(DashboardError::UnknownTicker(raw)) => assert_eq!(raw, "GOOGL"),
        other => panic!("expected UnknownTicker, got {:?}", other),
    }
}

#[test]
fn test_ticker_display_order() {
    let symbols: Vec<String> = Ticker::ALL.iter().map(|t| t.to_string()).collect();
    assert_eq!(symbols, vec!["AAPL", "TSLA", "AMZN", "MSFT"]);
    assert_eq!(Ticker::default(), Ticker::Aapl);
}

#[test]
fn test_selection_accepts_single_day_window() {
    let day = date(2021, 6, 1);
    let selection = Selection::new(Ticker::Aapl, day, day).unwrap();
    assert!(selection.contains(day));
    assert!(!selection.contains(date(2021, 6, 2)));
}

#[test]
fn test_selection_rejects_inverted_window() {
    let err = Selection::new(Ticker::Msft, date(2021, 6, 2), date(2021, 6, 1)).unwrap_err();
    assert!(matches!(err, DashboardError::InvalidRange { .. }));
    assert_eq!(err.to_string(), "End date must be after start date.");
}

#[test]
fn test_bounds_check() {
    let bounds = DashboardConfig::default().bounds();
    assert_eq!(bounds.min, date(2020, 1, 1));
    assert_eq!(bounds.max, date(2022, 12, 31));

    assert!(bounds.check("Start", date(2020, 1, 1)).is_ok());
    assert!(bounds.check("End", date(2022, 12, 31)).is_ok());
    assert!(matches!(
        bounds.check("Start", date(2019, 12, 31)),
        Err(DashboardError::DateOutOfBounds { field: "Start", .. })
    ));
    assert!(matches!(
        bounds.check("End", date(2023, 1, 1)),
        Err(DashboardError::DateOutOfBounds { field: "End", .. })
    ));
}

#[test]
fn test_config_defaults() {
    let config = DashboardConfig::default();
    assert_eq!(config.endpoint, "http://127.0.0.1:8000/LSTM_Predict");
    assert_eq!(config.data_dir.to_str(), Some("data"));
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn test_config_partial_toml() {
    let config = DashboardConfig::from_toml_str(
        r#"
        endpoint = "http://forecast:9000/LSTM_Predict"
        request_timeout_secs = 15
        max_date = "2021-12-31"
        "#,
    )
    .unwrap();

    assert_eq!(config.endpoint, "http://forecast:9000/LSTM_Predict");
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    assert_eq!(config.max_date, date(2021, 12, 31));
    assert_eq!(config.min_date, date(2020, 1, 1));
    assert_eq!(config.data_dir.to_str(), Some("data"));
}

#[test]
fn test_config_rejects_bad_input() {
    assert!(matches!(
        DashboardConfig::from_toml_str("min_date = \"2023-01-01\""),
        Err(DashboardError::Config(_))
    ));
    assert!(matches!(
        DashboardConfig::from_toml_str("endpont = \"typo\""),
        Err(DashboardError::Config(_))
    ));
    assert!(matches!(
        DashboardConfig::load("/definitely/not/here.toml"),
        Err(DashboardError::Config(_))
    ));
}
