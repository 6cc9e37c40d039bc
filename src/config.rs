//! The configuration bundle supplied by the host per render call.
//!
//! Mirrors the params object the embedding layer hands over: string-typed
//! option names plus the tabular data itself. The bundle is read-only within
//! the pipeline; names are validated once at the start of each render and a
//! resize re-supplies the whole bundle, so there is no incremental diffing.

use serde::Deserialize;

use crate::models::RawRecord;

/// Margins around the drawable area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20,
            right: 40,
            bottom: 30,
            left: 40,
        }
    }
}

/// Recognized rendering options.
///
/// Unknown palette/offset/interpolation/tick-unit names are rejected when a
/// render begins, not at construction time. Absent margins fall back to
/// 20/40/30/40 (top/right/bottom/left).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    /// Tabular rows convertible to (date, key, value) triples.
    pub data: Vec<RawRecord>,
    /// Named color scheme, looked up by (name, category count).
    pub palette: String,
    /// Stacking offset policy name.
    pub offset: String,
    /// Curve style name for band outlines.
    pub interpolate: String,
    /// Enables the pointer-driven interaction layer.
    pub interactive: bool,
    /// Calendar unit for horizontal ticks.
    pub x_tick_units: String,
    /// Tick every this many units.
    pub x_tick_interval: u32,
    /// chrono format string for horizontal tick labels.
    pub x_tick_format: String,
    /// Number of vertical tick intervals.
    pub y_tick_count: usize,
    /// Optional numeric format name for vertical tick labels
    /// (`","` selects locale-grouped integers).
    pub y_tick_format: Option<String>,
    /// Fill opacity applied to non-hovered bands while one band is hovered.
    pub dim_opacity: f64,
    /// Opacity transition length reported to the host, in milliseconds.
    pub transition_ms: u32,
    pub top: Option<u32>,
    pub right: Option<u32>,
    pub bottom: Option<u32>,
    pub left: Option<u32>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            palette: "Spectral".into(),
            offset: "silhouette".into(),
            interpolate: "cardinal".into(),
            interactive: true,
            x_tick_units: "months".into(),
            x_tick_interval: 1,
            x_tick_format: "%b %Y".into(),
            y_tick_count: 5,
            y_tick_format: None,
            dim_opacity: crate::interact::DIM_OPACITY,
            transition_ms: crate::interact::TRANSITION_MS,
            top: None,
            right: None,
            bottom: None,
            left: None,
        }
    }
}

impl ChartConfig {
    /// Effective margins, with documented defaults for absent sides.
    pub fn margins(&self) -> Margins {
        let d = Margins::default();
        Margins {
            top: self.top.unwrap_or(d.top),
            right: self.right.unwrap_or(d.right),
            bottom: self.bottom.unwrap_or(d.bottom),
            left: self.left.unwrap_or(d.left),
        }
    }
}
