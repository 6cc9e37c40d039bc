//! Widget shell: the render/resize entry points the host embeds against.
//!
//! Everything is owned by the [`Streamgraph`] value and threaded through the
//! pipeline explicitly; there is no module-wide state. All work runs
//! synchronously on the caller's thread. The host owns the event loop and is
//! responsible for serializing render, resize, and pointer calls for one
//! surface.

use crate::config::ChartConfig;
use crate::error::Result;
use crate::interact::{self, Highlight, HoverState};
use crate::viz::{self, Scene};

/// One streamgraph bound to a host surface.
///
/// Caches the configuration between calls so a resize can re-run the full
/// pipeline without the host re-supplying anything; resize cost equals one
/// render, and equal inputs produce byte-identical output.
#[derive(Debug)]
pub struct Streamgraph {
    config: ChartConfig,
    scene: Option<Scene>,
    hover: HoverState,
    highlight: Highlight,
}

impl Streamgraph {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            scene: None,
            hover: HoverState::Idle,
            highlight: Highlight::idle(0),
        }
    }

    /// Run the full pipeline at the given dimensions and produce the SVG
    /// document. Any prior scene and hover state are discarded.
    pub fn render(&mut self, width: u32, height: u32) -> Result<String> {
        let scene = viz::layout(&self.config, width, height)?;
        self.hover = HoverState::Idle;
        self.highlight = interact::rest(&scene);
        let svg = viz::render_svg(&scene, &self.highlight)?;
        self.scene = Some(scene);
        Ok(svg)
    }

    /// Re-run the pipeline with the cached configuration at new dimensions.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<String> {
        self.render(width, height)
    }

    /// Forward a pointer position in surface coordinates.
    ///
    /// Returns the re-rendered document when the highlight changed, `None`
    /// when nothing needs redrawing (not rendered yet, interactivity off, or
    /// an unchanged highlight).
    pub fn pointer_moved(&mut self, px: f64, py: f64) -> Result<Option<String>> {
        let Some(scene) = &self.scene else {
            return Ok(None);
        };
        if !scene.interactive {
            return Ok(None);
        }
        let (hover, highlight) = interact::pointer_moved(scene, px, py);
        self.apply(hover, highlight)
    }

    /// Forward a pointer-leave event.
    pub fn pointer_left(&mut self) -> Result<Option<String>> {
        let Some(scene) = &self.scene else {
            return Ok(None);
        };
        if !scene.interactive {
            return Ok(None);
        }
        let (hover, highlight) = interact::pointer_left(scene);
        self.apply(hover, highlight)
    }

    fn apply(&mut self, hover: HoverState, highlight: Highlight) -> Result<Option<String>> {
        if highlight == self.highlight {
            self.hover = hover;
            return Ok(None);
        }
        self.hover = hover;
        self.highlight = highlight;
        let Some(scene) = &self.scene else {
            return Ok(None);
        };
        let svg = viz::render_svg(scene, &self.highlight)?;
        Ok(Some(svg))
    }

    /// Derived geometry from the last render, if any.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Presentation targets currently applied to the surface.
    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }
}

/// One-shot convenience: lay out and render without keeping a widget around.
pub fn render(config: &ChartConfig, width: u32, height: u32) -> Result<String> {
    let scene = viz::layout(config, width, height)?;
    viz::render_svg(&scene, &interact::rest(&scene))
}
