use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw tabular record as supplied by the host (all fields still strings).
///
/// This is the wire shape of one data-frame row: a fixed-format date, an
/// opaque category key, and a numeric-coercible value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRecord {
    pub date: String,
    pub key: String,
    pub value: String,
}

impl RawRecord {
    pub fn new(
        date: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Typed observation produced by the row normalizer.
///
/// Within one category, rows are assumed sorted by date; the pipeline does
/// not re-sort them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Row {
    pub date: NaiveDate,
    pub key: String,
    pub value: f64,
}

/// One stacked sample: the band for a category covers
/// `[baseline, baseline + thickness]` at `date` in value space.
///
/// `value` is the original observation, untouched by offset policies that
/// rescale thickness (tooltips report it as-is).
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct StackedPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub baseline: f64,
    pub thickness: f64,
}

impl StackedPoint {
    /// Upper edge of the band at this date.
    pub fn top(&self) -> f64 {
        self.baseline + self.thickness
    }
}

/// Ordered stacked series for one category key.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Layer {
    pub key: String,
    /// Stacking position, bottom to top; also the palette index.
    pub index: usize,
    /// One point per date of the union grid, chronological.
    pub points: Vec<StackedPoint>,
}
