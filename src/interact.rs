//! Pointer-driven highlighting (pipeline stage 6): hover state machine, band
//! hit testing, and nearest-point lookup.
//!
//! The core never touches an event loop. The host forwards pointer positions
//! in surface coordinates; each call returns the next [`HoverState`] plus a
//! [`Highlight`] describing what the surface should show: per-band opacity
//! targets, the stroked band, tooltip text, and how long the opacity
//! transition should take.

use chrono::NaiveDate;

use crate::viz::Scene;

/// Default opacity applied to non-hovered bands while one band is hovered.
pub const DIM_OPACITY: f64 = 0.6;
/// Default opacity transition length reported to the host, in milliseconds.
pub const TRANSITION_MS: u32 = 200;

/// Interaction state of the chart as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// No band highlighted; all bands at full opacity.
    #[default]
    Idle,
    /// One band highlighted, siblings dimmed.
    Hovered { layer: usize },
}

/// Presentation targets after a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    /// Fill opacity per band, aligned with the scene's layers.
    pub opacities: Vec<f64>,
    /// Band to outline with the palette's stroke color, if any.
    pub stroked: Option<usize>,
    /// `"<key>: <value>"` for the nearest point in the hovered band.
    pub tooltip: Option<String>,
    /// Transition duration the host should animate opacity changes over.
    pub transition_ms: u32,
}

impl Highlight {
    /// All bands at rest, with the default transition length.
    pub fn idle(bands: usize) -> Self {
        Self {
            opacities: vec![1.0; bands],
            stroked: None,
            tooltip: None,
            transition_ms: TRANSITION_MS,
        }
    }
}

/// All of a scene's bands at rest, honoring its configured transition length.
pub fn rest(scene: &Scene) -> Highlight {
    Highlight {
        transition_ms: scene.transition_ms,
        ..Highlight::idle(scene.layers.len())
    }
}

/// Index of the sample nearest to `target` in a sorted date sequence.
///
/// Binary search for the insertion point, then the closer of the two
/// straddling candidates (ties go to the earlier one). Targets outside the
/// range clamp to the boundary sample.
pub fn nearest_index(dates: &[NaiveDate], target: NaiveDate) -> usize {
    if dates.is_empty() {
        return 0;
    }
    let i = dates.partition_point(|d| *d < target);
    if i == 0 {
        return 0;
    }
    if i == dates.len() {
        return dates.len() - 1;
    }
    let before = target - dates[i - 1];
    let after = dates[i] - target;
    if after < before { i } else { i - 1 }
}

/// Hit-test a surface position against the stacked bands.
///
/// The cursor's horizontal position is inverted to the nearest grid date
/// (clamped to the data's range), then the bands' stacked intervals at that
/// date are scanned for one containing the cursor's vertical position.
pub fn hit_test(scene: &Scene, px: f64, py: f64) -> Option<usize> {
    let idx = nearest_index(
        &scene.dates,
        scene.x.invert(px - f64::from(scene.margins.left)),
    );
    for layer in &scene.layers {
        let p = layer.points.get(idx)?;
        let top_px = scene.surface_y(p.top());
        let base_px = scene.surface_y(p.baseline);
        if py >= top_px && py <= base_px {
            return Some(layer.index);
        }
    }
    None
}

/// Advance the state machine for a pointer position.
///
/// Entering a band dims its siblings; moving within it follows the nearest
/// data point with the tooltip and stroke; leaving all bands returns the
/// chart to rest. Non-interactive scenes always report rest.
pub fn pointer_moved(scene: &Scene, px: f64, py: f64) -> (HoverState, Highlight) {
    let bands = scene.layers.len();
    if !scene.interactive {
        return (HoverState::Idle, rest(scene));
    }
    match hit_test(scene, px, py) {
        None => (HoverState::Idle, rest(scene)),
        Some(layer) => {
            let idx = nearest_index(
                &scene.dates,
                scene.x.invert(px - f64::from(scene.margins.left)),
            );
            let point = &scene.layers[layer].points[idx];
            let mut opacities = vec![scene.dim_opacity; bands];
            opacities[layer] = 1.0;
            let tooltip = format!("{}: {}", scene.layers[layer].key, point.value);
            (
                HoverState::Hovered { layer },
                Highlight {
                    opacities,
                    stroked: Some(layer),
                    tooltip: Some(tooltip),
                    transition_ms: scene.transition_ms,
                },
            )
        }
    }
}

/// Pointer left the surface: everything back to rest.
pub fn pointer_left(scene: &Scene) -> (HoverState, Highlight) {
    (HoverState::Idle, rest(scene))
}
