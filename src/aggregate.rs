//! Per-symbol summary statistics for the summary page

use std::collections::BTreeMap;

use crate::types::{AggregatedObservation, StockTable};

/// Mean price per symbol, one row per distinct symbol in ascending symbol
/// order. An empty table yields no rows.
pub fn aggregate_mean(table: &StockTable) -> Vec<AggregatedObservation> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in &table.rows {
        let (sum, count) = groups.entry(row.symbol.as_str()).or_insert((0.0, 0));
        *sum += row.price;
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(symbol, (sum, count))| AggregatedObservation {
            symbol: symbol.to_string(),
            price: sum / count as f64,
        })
        .collect()
}
