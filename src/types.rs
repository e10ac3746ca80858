//! Common types for the dashboard
//!
//! Table rows shared by the dataset, aggregation and chart modules.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Chart rows carry dates as local midnight (`2004-02-01T00:00:00`). A bare
/// `2004-02-01` is read as UTC by the browser and lands on the previous day
/// west of Greenwich.
const CHART_DATE_FORMAT: &str = "%Y-%m-%dT00:00:00";

fn serialize_chart_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(CHART_DATE_FORMAT))
}

/// One closing price of one symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    #[serde(serialize_with = "serialize_chart_date")]
    pub date: NaiveDate,
    pub symbol: String,
    pub price: f64,
}

/// The filtered source table, loaded once and shared read-only
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockTable {
    pub rows: Vec<Observation>,
}

impl StockTable {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct symbols in ascending order
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.symbol.as_str()).collect()
    }
}

/// Hand-authored label pinned to a point of the time-series chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    #[serde(serialize_with = "serialize_chart_date")]
    pub date: NaiveDate,
    pub price: f64,
    pub marker: String,
    pub description: String,
}

/// Mean price of one symbol over the whole table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedObservation {
    pub symbol: String,
    pub price: f64,
}
