//! Row normalization and category grouping (pipeline stages 1 and 2).

use ahash::AHashMap;
use chrono::NaiveDate;

use crate::error::{ChartError, Result};
use crate::models::{RawRecord, Row};

/// Fixed input date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse raw records into typed rows.
///
/// A date that does not match [`DATE_FORMAT`] or a value that is not a finite
/// number aborts the render before any layout happens, naming the offending
/// row.
pub fn parse_rows(records: &[RawRecord]) -> Result<Vec<Row>> {
    if records.is_empty() {
        return Err(ChartError::EmptyData);
    }
    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let date = NaiveDate::parse_from_str(rec.date.trim(), DATE_FORMAT).map_err(|e| {
            ChartError::InvalidInput {
                row: i,
                field: "date",
                value: rec.date.clone(),
                reason: e.to_string(),
            }
        })?;
        let value: f64 = rec.value.trim().parse().map_err(|e: std::num::ParseFloatError| {
            ChartError::InvalidInput {
                row: i,
                field: "value",
                value: rec.value.clone(),
                reason: e.to_string(),
            }
        })?;
        if !value.is_finite() {
            return Err(ChartError::InvalidInput {
                row: i,
                field: "value",
                value: rec.value.clone(),
                reason: "not a finite number".into(),
            });
        }
        rows.push(Row {
            date,
            key: rec.key.clone(),
            value,
        });
    }
    Ok(rows)
}

/// Partition rows by category key.
///
/// First-seen key order becomes the stacking order (bottom to top); per-key
/// row order is preserved as given. Any number of keys is supported; the
/// palette, not the grouper, caps how many distinct colors come out.
pub fn group_by_key(rows: Vec<Row>) -> Vec<(String, Vec<Row>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: AHashMap<String, Vec<Row>> = AHashMap::new();
    for row in rows {
        if !groups.contains_key(&row.key) {
            order.push(row.key.clone());
        }
        groups.entry(row.key.clone()).or_default().push(row);
    }
    order
        .into_iter()
        .map(|key| {
            let rows = groups.remove(&key).unwrap_or_default();
            (key, rows)
        })
        .collect()
}
