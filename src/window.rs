// src/window.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::error::DashboardError;
use crate::price_store::DATE_COLUMN;
use crate::selection::Selection;

/// Keeps the rows of a price frame whose `Date` lies in the selection's
/// inclusive window. Row order is preserved.
pub struct DateWindowFilter<'a> {
    df: &'a DataFrame,
    selection: Selection,
}

impl<'a> DateWindowFilter<'a> {
    pub fn new(df: &'a DataFrame, selection: &Selection) -> Self {
        DateWindowFilter {
            df,
            selection: *selection,
        }
    }

    pub fn filter(&self) -> Result<DataFrame, DashboardError> {
        let dates = self.df.column(DATE_COLUMN)?.str()?;

        let mut mask = Vec::with_capacity(dates.len());
        for (row, raw) in dates.into_iter().enumerate() {
            let keep = match raw {
                Some(raw) => {
                    let date = parse_date(raw).ok_or_else(|| {
                        DashboardError::MalformedData(format!("row {}: unparseable date '{}'", row, raw))
                    })?;
                    self.selection.contains(date)
                }
                None => false,
            };
            mask.push(keep);
        }

        let mask = BooleanChunked::from_slice("in_window", &mask);
        Ok(self.df.filter(&mask)?)
    }
}

/// Parses the calendar date out of the timestamp shapes price exports use.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(datetime) = DateTime::parse_from_str(raw, format) {
            return Some(datetime.date_naive());
        }
    }
    None
}
