//! Stack builder (pipeline stage 3): turns grouped rows into non-overlapping
//! stacked layers over the union date grid.

use std::collections::BTreeSet;
use std::str::FromStr;

use ahash::AHashMap;
use chrono::NaiveDate;
use log::debug;

use crate::error::ChartError;
use crate::models::{Layer, Row, StackedPoint};

/// Baseline rule applied at each date of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetPolicy {
    /// Baselines start at zero; bands stack upward.
    Zero,
    /// The whole stack is centered under its tallest column, so the total
    /// balances around the horizontal midline.
    #[default]
    Silhouette,
    /// Derivative-minimizing baseline of the classic streamgraph.
    Wiggle,
    /// Per-date normalization to the unit interval.
    Expand,
}

impl FromStr for OffsetPolicy {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, ChartError> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "silhouette" => Ok(Self::Silhouette),
            "wiggle" => Ok(Self::Wiggle),
            "expand" => Ok(Self::Expand),
            _ => Err(ChartError::UnknownOffset(s.to_string())),
        }
    }
}

/// Stack grouped rows into layers.
///
/// The grid is the sorted union of every category's dates. A date missing in
/// a category contributes zero to that category's band there (zero-fill), so
/// summing `thickness` across layers at any grid date reproduces the total of
/// the observed values at that date.
pub fn stack(groups: &[(String, Vec<Row>)], policy: OffsetPolicy) -> Vec<Layer> {
    let grid: Vec<NaiveDate> = groups
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|r| r.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let m = grid.len();
    let date_pos: AHashMap<NaiveDate, usize> =
        grid.iter().copied().enumerate().map(|(j, d)| (d, j)).collect();

    // Raw values on the grid, one row of the matrix per category.
    let mut values: Vec<Vec<f64>> = Vec::with_capacity(groups.len());
    for (key, rows) in groups {
        let mut vals = vec![0.0; m];
        for row in rows {
            if let Some(&j) = date_pos.get(&row.date) {
                vals[j] = row.value;
            }
        }
        if rows.len() < m {
            debug!(
                "category {key:?}: {} of {m} grid dates observed, rest zero-filled",
                rows.len()
            );
        }
        values.push(vals);
    }
    let raw = values.clone();

    let mut totals: Vec<f64> = (0..m)
        .map(|j| values.iter().map(|v| v[j]).sum())
        .collect();

    if policy == OffsetPolicy::Expand {
        for j in 0..m {
            if totals[j] != 0.0 {
                for vals in &mut values {
                    vals[j] /= totals[j];
                }
            }
        }
        totals = (0..m).map(|j| values.iter().map(|v| v[j]).sum()).collect();
    }

    let base = bottom_baseline(policy, &grid, &values, &totals);

    let mut layers = Vec::with_capacity(groups.len());
    let mut cum = base;
    for (i, (key, _)) in groups.iter().enumerate() {
        let points: Vec<StackedPoint> = grid
            .iter()
            .enumerate()
            .map(|(j, &date)| StackedPoint {
                date,
                value: raw[i][j],
                baseline: cum[j],
                thickness: values[i][j],
            })
            .collect();
        for (j, c) in cum.iter_mut().enumerate() {
            *c += values[i][j];
        }
        layers.push(Layer {
            key: key.clone(),
            index: i,
            points,
        });
    }
    layers
}

/// Baseline of the bottom band at each grid date.
fn bottom_baseline(
    policy: OffsetPolicy,
    grid: &[NaiveDate],
    values: &[Vec<f64>],
    totals: &[f64],
) -> Vec<f64> {
    let m = grid.len();
    match policy {
        OffsetPolicy::Zero | OffsetPolicy::Expand => vec![0.0; m],
        OffsetPolicy::Silhouette => {
            let max_total = totals.iter().copied().fold(0.0_f64, f64::max);
            totals.iter().map(|t| (max_total - t) / 2.0).collect()
        }
        OffsetPolicy::Wiggle => {
            // Minimizes the summed squared slope of the bands; the baseline
            // walks from zero, one grid step at a time.
            let n = values.len();
            let mut base = vec![0.0; m];
            let mut o = 0.0;
            for j in 1..m {
                let dx = (grid[j] - grid[j - 1]).num_days() as f64;
                if dx == 0.0 {
                    base[j] = o;
                    continue;
                }
                let mut s2 = 0.0;
                for i in 0..n {
                    let mut s3 = (values[i][j] - values[i][j - 1]) / (2.0 * dx);
                    for k in 0..i {
                        s3 += (values[k][j] - values[k][j - 1]) / dx;
                    }
                    s2 += s3 * values[i][j];
                }
                if totals[j] != 0.0 {
                    o -= s2 / totals[j] * dx;
                }
                base[j] = o;
            }
            base
        }
    }
}
