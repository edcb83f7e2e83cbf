// src/chart.rs

//! Line charts in Plotly's figure shape (`{"data": [...], "layout": {...}}`),
//! so the JSON can be handed to `Plotly.newPlot` as-is.

use chrono::NaiveDate;
use serde::Serialize;

use crate::selection::Ticker;
use crate::series::{PredictionOverlay, PriceSeries};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    data: Vec<Trace>,
    layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    kind: &'static str,
    mode: &'static str,
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
}

impl Trace {
    pub fn line(name: impl Into<String>, x: Vec<NaiveDate>, y: Vec<Option<f64>>) -> Self {
        Trace {
            kind: "scatter",
            mode: "lines",
            name: name.into(),
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Layout {
    title: Title,
    xaxis: Axis,
    yaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Axis {
    title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Title {
    text: String,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Title { text: text.into() }
    }
}

impl Chart {
    pub fn new(title: impl Into<String>, traces: Vec<Trace>) -> Self {
        Chart {
            data: traces,
            layout: Layout {
                title: Title::new(title),
                xaxis: Axis { title: Title::new("Date") },
                yaxis: Axis { title: Title::new("Price") },
            },
        }
    }

    /// Close price over the filtered window.
    pub fn actual(ticker: Ticker, series: &PriceSeries) -> Self {
        Chart::new(
            format!("{} Stock Price", ticker),
            vec![Trace::line("Actual Close Price", series.dates(), series.closes())],
        )
    }

    /// Full window close price with the prediction overlay on its trailing dates.
    pub fn actual_vs_predicted(ticker: Ticker, series: &PriceSeries, overlay: &PredictionOverlay) -> Self {
        let predicted = overlay.values().into_iter().map(Some).collect();
        Chart::new(
            format!("{} - Actual vs Predicted", ticker),
            vec![
                Trace::line("Actual", series.dates(), series.closes()),
                Trace::line("Predicted", overlay.dates(), predicted),
            ],
        )
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    pub fn traces(&self) -> &[Trace] {
        &self.data
    }

    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.data.iter().find(|t| t.name == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// A standalone page that draws the chart with plotly.js.
    pub fn to_html(&self) -> Result<String, serde_json::Error> {
        // Keep a "</script>" inside a trace name from closing the tag early.
        let figure = self.to_json()?.replace("</", "<\\/");
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Stock Price Predictor - {title}</title>
<script src="{cdn}"></script>
</head>
<body>
<h1>Stock Price Predictor</h1>
<div id="chart"></div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#,
            title = html_escape(self.title()),
            cdn = PLOTLY_CDN,
            figure = figure,
        ))
    }
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
