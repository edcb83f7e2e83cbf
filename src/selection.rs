// src/selection.rs

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// The fixed set of instruments the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ticker {
    #[default]
    Aapl,
    Tsla,
    Amzn,
    Msft,
}

impl Ticker {
    /// All selectable tickers, in the order the selector presents them.
    pub const ALL: [Ticker; 4] = [Ticker::Aapl, Ticker::Tsla, Ticker::Amzn, Ticker::Msft];

    pub fn symbol(&self) -> &'static str {
        match self {
            Ticker::Aapl => "AAPL",
            Ticker::Tsla => "TSLA",
            Ticker::Amzn => "AMZN",
            Ticker::Msft => "MSFT",
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Ticker {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Ticker::ALL
            .into_iter()
            .find(|ticker| ticker.symbol().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DashboardError::UnknownTicker(wanted.to_string()))
    }
}

/// A validated user selection: ticker plus an inclusive, non-inverted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub ticker: Ticker,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Selection {
    /// Builds a selection, rejecting an inverted window.
    pub fn new(ticker: Ticker, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, DashboardError> {
        if start_date > end_date {
            return Err(DashboardError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Selection {
            ticker,
            start_date,
            end_date,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Inclusive calendar range a date picker accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn check(&self, field: &'static str, date: NaiveDate) -> Result<NaiveDate, DashboardError> {
        if date < self.min || date > self.max {
            return Err(DashboardError::DateOutOfBounds {
                field,
                date,
                min: self.min,
                max: self.max,
            });
        }
        Ok(date)
    }
}
