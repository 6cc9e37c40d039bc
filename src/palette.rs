//! Bounded color palettes, looked up by (name, size).
//!
//! Swatch tables follow the ColorBrewer sets the original chart shipped with:
//! per-size lists from 3 up to 9 colors. A category count above nine clamps
//! to the largest set and colors repeat; below three, the three-color set is
//! indexed into. The list is reversed before assignment so the first-stacked
//! category receives the strongest hue.

use log::warn;

use crate::error::ChartError;

/// Largest swatch set any scheme provides.
pub const MAX_COLORS: usize = 9;
/// Smallest swatch set any scheme provides.
pub const MIN_COLORS: usize = 3;

/// RGB swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Rgb {
    // Table entries are trusted; a malformed one decodes to black.
    let v = u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0);
    Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// An ordered set of colors assigned to layers by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Look up `name` with one swatch per category.
    ///
    /// More than [`MAX_COLORS`] categories is reported as a warning, never a
    /// failure: the nine-color set is used and assignment wraps around.
    pub fn lookup(name: &str, categories: usize) -> Result<Self, ChartError> {
        let table =
            swatch_table(name).ok_or_else(|| ChartError::UnknownPalette(name.to_string()))?;
        if categories > MAX_COLORS {
            warn!(
                "palette {name:?} holds at most {MAX_COLORS} colors, \
                 {categories} categories requested; colors will repeat"
            );
        }
        let size = categories.clamp(MIN_COLORS, MAX_COLORS);
        let mut colors: Vec<Rgb> = table[size - MIN_COLORS]
            .iter()
            .map(|h| parse_hex(h))
            .collect();
        colors.reverse();
        Ok(Self {
            name: name.to_string(),
            colors,
        })
    }

    /// Color for a layer index; indices past the swatch count wrap.
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    /// Stroke color used for the hovered band outline (first swatch after
    /// reversal, i.e. the strongest hue).
    pub fn stroke(&self) -> Rgb {
        self.colors[0]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

type SwatchTable = [&'static [&'static str]; 7];

fn swatch_table(name: &str) -> Option<&'static SwatchTable> {
    match name.to_ascii_lowercase().as_str() {
        "spectral" => Some(&SPECTRAL),
        "blues" => Some(&BLUES),
        "greens" => Some(&GREENS),
        "oranges" => Some(&ORANGES),
        "purples" => Some(&PURPLES),
        "reds" => Some(&REDS),
        _ => None,
    }
}

const SPECTRAL: SwatchTable = [
    &["#fc8d59", "#ffffbf", "#99d594"],
    &["#d7191c", "#fdae61", "#abdda4", "#2b83ba"],
    &["#d7191c", "#fdae61", "#ffffbf", "#abdda4", "#2b83ba"],
    &["#d53e4f", "#fc8d59", "#fee08b", "#e6f598", "#99d594", "#3288bd"],
    &["#d53e4f", "#fc8d59", "#fee08b", "#ffffbf", "#e6f598", "#99d594", "#3288bd"],
    &["#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#e6f598", "#abdda4", "#66c2a5", "#3288bd"],
    &[
        "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4", "#66c2a5",
        "#3288bd",
    ],
];

const BLUES: SwatchTable = [
    &["#deebf7", "#9ecae1", "#3182bd"],
    &["#eff3ff", "#bdd7e7", "#6baed6", "#2171b5"],
    &["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"],
    &["#eff3ff", "#c6dbef", "#9ecae1", "#6baed6", "#3182bd", "#08519c"],
    &["#eff3ff", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594"],
    &["#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594"],
    &[
        "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
        "#08306b",
    ],
];

const GREENS: SwatchTable = [
    &["#e5f5e0", "#a1d99b", "#31a354"],
    &["#edf8e9", "#bae4b3", "#74c476", "#238b45"],
    &["#edf8e9", "#bae4b3", "#74c476", "#31a354", "#006d2c"],
    &["#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#31a354", "#006d2c"],
    &["#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
    &["#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
    &[
        "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
        "#00441b",
    ],
];

const ORANGES: SwatchTable = [
    &["#fee6ce", "#fdae6b", "#e6550d"],
    &["#feedde", "#fdbe85", "#fd8d3c", "#d94701"],
    &["#feedde", "#fdbe85", "#fd8d3c", "#e6550d", "#a63603"],
    &["#feedde", "#fdd0a2", "#fdae6b", "#fd8d3c", "#e6550d", "#a63603"],
    &["#feedde", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#8c2d04"],
    &["#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#8c2d04"],
    &[
        "#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#a63603",
        "#7f2704",
    ],
];

const PURPLES: SwatchTable = [
    &["#efedf5", "#bcbddc", "#756bb1"],
    &["#f2f0f7", "#cbc9e2", "#9e9ac8", "#6a51a3"],
    &["#f2f0f7", "#cbc9e2", "#9e9ac8", "#756bb1", "#54278f"],
    &["#f2f0f7", "#dadaeb", "#bcbddc", "#9e9ac8", "#756bb1", "#54278f"],
    &["#f2f0f7", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#4a1486"],
    &["#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#4a1486"],
    &[
        "#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#54278f",
        "#3f007d",
    ],
];

const REDS: SwatchTable = [
    &["#fee0d2", "#fc9272", "#de2d26"],
    &["#fee5d9", "#fcae91", "#fb6a4a", "#cb181d"],
    &["#fee5d9", "#fcae91", "#fb6a4a", "#de2d26", "#a50f15"],
    &["#fee5d9", "#fcbba1", "#fc9272", "#fb6a4a", "#de2d26", "#a50f15"],
    &["#fee5d9", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#99000d"],
    &["#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#99000d"],
    &[
        "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
        "#67000d",
    ],
];
