// src/main.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use stockcast::{Chart, Dashboard, DashboardConfig, InteractionRequest, Severity};
use tracing_subscriber::EnvFilter;

/// Stock Price Predictor: chart historical closes and overlay an LSTM forecast.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Stock to chart: AAPL, TSLA, AMZN or MSFT
    #[arg(short, long, default_value = "AAPL")]
    ticker: String,

    /// First date of the window (YYYY-MM-DD); defaults to the earliest allowed date
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last date of the window (YYYY-MM-DD); defaults to the latest allowed date
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Request a prediction and chart it against the actual prices
    #[arg(long)]
    predict: bool,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding <TICKER>_data.csv files (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Prediction endpoint URL (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory to write HTML charts into
    #[arg(short, long, default_value = "charts")]
    out: PathBuf,

    /// Print figure JSON to stdout instead of writing HTML files
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir.clone() {
        config.data_dir = data_dir;
    }
    if let Some(endpoint) = cli.endpoint.clone() {
        config.endpoint = endpoint;
    }

    let dashboard = Dashboard::from_config(config)?;
    let request = InteractionRequest {
        ticker: cli.ticker.clone(),
        start_date: cli.start,
        end_date: cli.end,
        predict: cli.predict,
    };

    let interaction = dashboard.run(&request).await;

    for notice in interaction.notices() {
        match notice.severity {
            Severity::Error => eprintln!("error: {}", notice.message),
            Severity::Warning => eprintln!("warning: {}", notice.message),
        }
    }

    let charts = interaction.charts();
    if cli.json {
        for chart in charts {
            println!("{}", chart.to_json()?);
        }
    } else if !charts.is_empty() {
        fs::create_dir_all(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;
        for chart in charts {
            let path = write_chart(&cli.out, chart)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn write_chart(dir: &Path, chart: &Chart) -> Result<PathBuf> {
    let file_name: String = chart
        .title()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let path = dir.join(format!("{}.html", file_name));
    fs::write(&path, chart.to_html()?).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
