//! Stock dataset provider
//!
//! Fetches the vega-datasets `stocks.csv` table once per isolate, keeps the
//! rows after the configured cutoff, and hands out the same `Arc` to every
//! page render afterwards.

use std::future::Future;
use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::types::{Observation, StockTable};

/// Date format used by the source table, e.g. `Jan 1 2000`
const SOURCE_DATE_FORMAT: &str = "%b %d %Y";

static STOCKS: DatasetCache = DatasetCache::new();

/// Initialize-once holder for the filtered table
pub struct DatasetCache {
    cell: OnceLock<Arc<StockTable>>,
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    /// Return the cached table, running `load` only if nothing is cached yet.
    /// A failed load leaves the cache empty so the next render retries.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<StockTable>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StockTable>>,
    {
        if let Some(table) = self.cell.get() {
            return Ok(Arc::clone(table));
        }
        let table = load().await?;
        Ok(Arc::clone(self.cell.get_or_init(|| Arc::new(table))))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Whether the process-wide table has been loaded
pub fn is_cached() -> bool {
    STOCKS.is_loaded()
}

/// Get the process-wide stock table
pub async fn get_data(config: &Config) -> Result<Arc<StockTable>> {
    STOCKS
        .get_or_load(|| load_stocks(&config.dataset_url, config.date_cutoff))
        .await
}

/// Fetch, parse and filter the source table
async fn load_stocks(url: &str, cutoff: NaiveDate) -> Result<StockTable> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DashboardError::Http(format!("HTTP {status} fetching {url}")));
    }
    let body = response.text().await?;

    let rows = parse_stocks_csv(&body)?;
    let total = rows.len();
    let table = filter_after(rows, cutoff);
    worker::console_log!(
        "Loaded stocks dataset: {} rows, {} after {}",
        total,
        table.len(),
        cutoff
    );
    Ok(table)
}

/// Parse `symbol,date,price` CSV text. The header row is required.
pub fn parse_stocks_csv(text: &str) -> Result<Vec<Observation>> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| DashboardError::Dataset("empty dataset".into()))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let index_of = |name: &str| {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| DashboardError::Dataset(format!("missing column {name:?}")))
    };
    let symbol_idx = index_of("symbol")?;
    let date_idx = index_of("date")?;
    let price_idx = index_of("price")?;

    lines
        .map(|(n, line)| -> Result<Observation> {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let field = |idx: usize| {
                fields.get(idx).copied().ok_or_else(|| {
                    DashboardError::Dataset(format!("line {}: expected {} fields", n + 1, columns.len()))
                })
            };

            let date = NaiveDate::parse_from_str(field(date_idx)?, SOURCE_DATE_FORMAT)
                .map_err(|e| DashboardError::Dataset(format!("line {}: bad date: {e}", n + 1)))?;
            let price = field(price_idx)?
                .parse::<f64>()
                .map_err(|e| DashboardError::Dataset(format!("line {}: bad price: {e}", n + 1)))?;

            Ok(Observation {
                date,
                symbol: field(symbol_idx)?.to_string(),
                price,
            })
        })
        .collect()
}

/// Keep rows strictly after `cutoff`
pub fn filter_after(rows: Vec<Observation>, cutoff: NaiveDate) -> StockTable {
    StockTable::new(rows.into_iter().filter(|r| r.date > cutoff).collect())
}
