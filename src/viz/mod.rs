//! Scene assembly and SVG rendering: the band renderer and its axes.
//!
//! [`layout`] runs the layout half of the pipeline (normalize, group, stack,
//! scales, ticks, colors, outlines) and returns a [`Scene`] holding all
//! derived geometry for one render. [`render_svg`] draws a scene into a
//! fresh SVG document: one filled polygon per band, axes as tick marks and
//! labels, the hover highlight and tooltip on top. Nothing is diffed or
//! reused; a render replaces whatever the surface held before.

pub mod curve;
pub mod scale;

use chrono::NaiveDate;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;

use std::path::Path;

use crate::config::{ChartConfig, Margins};
use crate::error::{ChartError, Result};
use crate::interact::Highlight;
use crate::models::Layer;
use crate::normalize;
use crate::palette::{Palette, Rgb};
use crate::stack::{self, OffsetPolicy};

use curve::CurveStyle;
use scale::{LinearScale, TickUnit, TimeScale};

/// Gap kept between the stack floor and the horizontal axis, in pixels.
const FLOOR_GAP: u32 = 10;
/// Tick mark length.
const TICK_LEN: i32 = 5;
/// Gap between a tick mark and its label.
const TICK_PADDING: i32 = 8;
/// Axis label font size.
const LABEL_FONT_PX: u32 = 12;
/// Tooltip anchor inside the surface, matching the original's fixed offsets.
const TOOLTIP_POS: (i32, i32) = (55, 30);

/// Sampled outline of one band, in surface pixel coordinates.
#[derive(Debug, Clone)]
pub struct BandOutline {
    /// Lower boundary, left to right.
    pub lower: Vec<(f64, f64)>,
    /// Upper boundary, left to right.
    pub upper: Vec<(f64, f64)>,
}

/// Fully derived geometry for one render.
///
/// Owned by the chart for the lifetime of that render; a new render (or a
/// resize) tears the scene down and rebuilds it from the raw configuration.
/// Equal configuration and dimensions always produce an equal scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
    /// Union date grid, sorted; every layer carries one point per entry.
    pub dates: Vec<NaiveDate>,
    pub layers: Vec<Layer>,
    /// Fill color per layer, aligned with `layers`.
    pub colors: Vec<Rgb>,
    /// Stroke color for the hovered band outline.
    pub stroke: Rgb,
    pub x: TimeScale,
    pub y: LinearScale,
    pub x_ticks: Vec<(NaiveDate, String)>,
    pub y_ticks: Vec<(f64, String)>,
    pub outlines: Vec<BandOutline>,
    pub interactive: bool,
    /// Fill opacity for non-hovered bands while one band is hovered.
    pub dim_opacity: f64,
    /// Opacity transition length reported to the host, in milliseconds.
    pub transition_ms: u32,
}

impl Scene {
    /// Horizontal surface position of a date.
    pub fn surface_x(&self, date: NaiveDate) -> f64 {
        f64::from(self.margins.left) + self.x.position(date)
    }

    /// Vertical surface position of a stacked value.
    pub fn surface_y(&self, v: f64) -> f64 {
        f64::from(self.margins.top) + self.y.position(v)
    }

    /// Width of the drawable area between the side margins.
    pub fn inner_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margins.left + self.margins.right)
            .max(1)
    }

    /// Height of the drawable area between the vertical margins.
    pub fn inner_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margins.top + self.margins.bottom)
            .max(1)
    }
}

/// Run the layout pipeline: rows in, scene out.
pub fn layout(config: &ChartConfig, width: u32, height: u32) -> Result<Scene> {
    let offset: OffsetPolicy = config.offset.parse()?;
    let curve_style: CurveStyle = config.interpolate.parse()?;
    let unit: TickUnit = config.x_tick_units.parse()?;

    let rows = normalize::parse_rows(&config.data)?;
    let groups = normalize::group_by_key(rows);
    let layers = stack::stack(&groups, offset);

    let palette = Palette::lookup(&config.palette, layers.len())?;
    let colors: Vec<Rgb> = (0..layers.len()).map(|i| palette.color(i)).collect();
    let stroke = palette.stroke();

    let margins = config.margins();
    let inner_w = width
        .saturating_sub(margins.left + margins.right)
        .max(1);
    let inner_h = height
        .saturating_sub(margins.top + margins.bottom)
        .max(1);
    let plot_h = inner_h.saturating_sub(FLOOR_GAP).max(1);

    let dates: Vec<NaiveDate> = layers
        .first()
        .map(|l| l.points.iter().map(|p| p.date).collect())
        .unwrap_or_default();
    let (start, end) = match (dates.first(), dates.last()) {
        (Some(&s), Some(&e)) => (s, e),
        _ => return Err(ChartError::EmptyData),
    };
    let x = TimeScale::new(start, end, f64::from(inner_w));

    let y_max = layers
        .iter()
        .flat_map(|l| l.points.iter().map(|p| p.top()))
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = layers
        .iter()
        .flat_map(|l| l.points.iter().map(|p| p.baseline))
        .fold(0.0_f64, f64::min);
    let y = LinearScale::new(y_min, y_max, f64::from(plot_h));

    let x_ticks = scale::date_ticks(start, end, unit, config.x_tick_interval)
        .into_iter()
        .map(|d| (d, scale::format_date(d, &config.x_tick_format)))
        .collect();
    let y_ticks = y
        .ticks(config.y_tick_count)
        .into_iter()
        .map(|v| (v, scale::format_value(v, config.y_tick_format.as_deref())))
        .collect();

    let mut scene = Scene {
        width,
        height,
        margins,
        dates,
        layers,
        colors,
        stroke,
        x,
        y,
        x_ticks,
        y_ticks,
        outlines: Vec::new(),
        interactive: config.interactive,
        dim_opacity: config.dim_opacity,
        transition_ms: config.transition_ms,
    };
    scene.outlines = band_outlines(&scene, curve_style);
    Ok(scene)
}

fn band_outlines(scene: &Scene, style: CurveStyle) -> Vec<BandOutline> {
    scene
        .layers
        .iter()
        .map(|layer| {
            let lower: Vec<(f64, f64)> = layer
                .points
                .iter()
                .map(|p| (scene.surface_x(p.date), scene.surface_y(p.baseline)))
                .collect();
            let upper: Vec<(f64, f64)> = layer
                .points
                .iter()
                .map(|p| (scene.surface_x(p.date), scene.surface_y(p.top())))
                .collect();
            BandOutline {
                lower: curve::interpolate(&lower, style),
                upper: curve::interpolate(&upper, style),
            }
        })
        .collect()
}

/// Render the scene into an SVG document string.
pub fn render_svg(scene: &Scene, highlight: &Highlight) -> Result<String> {
    let mut buf = String::new();
    {
        let root =
            SVGBackend::with_string(&mut buf, (scene.width, scene.height)).into_drawing_area();
        draw(&root, scene, highlight)?;
    }
    Ok(buf)
}

/// Render the scene into an SVG file.
pub fn render_to_file<P: AsRef<Path>>(
    scene: &Scene,
    highlight: &Highlight,
    out_path: P,
) -> Result<()> {
    let path_string = out_path.as_ref().to_string_lossy().into_owned();
    let root =
        SVGBackend::new(path_string.as_str(), (scene.width, scene.height)).into_drawing_area();
    draw(&root, scene, highlight)
}

fn backend_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Backend(format!("{e:?}"))
}

fn draw<DB>(root: &DrawingArea<DB, Shift>, scene: &Scene, highlight: &Highlight) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(backend_err)?;

    for (i, outline) in scene.outlines.iter().enumerate() {
        let rgb = scene.colors[i];
        let color = RGBColor(rgb.r, rgb.g, rgb.b);
        let opacity = highlight.opacities.get(i).copied().unwrap_or(1.0);

        // closed ring: lower boundary forward, upper boundary reversed
        let mut ring: Vec<(i32, i32)> =
            Vec::with_capacity(outline.lower.len() + outline.upper.len());
        ring.extend(outline.lower.iter().map(|&(x, y)| px(x, y)));
        ring.extend(outline.upper.iter().rev().map(|&(x, y)| px(x, y)));

        root.draw(&Polygon::new(ring.clone(), color.mix(opacity).filled()))
            .map_err(backend_err)?;

        if highlight.stroked == Some(i) {
            let s = scene.stroke;
            let stroke_color = RGBColor(s.r, s.g, s.b);
            let mut closed = ring;
            if let Some(&first) = closed.first() {
                closed.push(first);
            }
            root.draw(&PathElement::new(closed, stroke_color.stroke_width(1)))
                .map_err(backend_err)?;
        }
    }

    draw_axes(root, scene)?;

    if let Some(text) = &highlight.tooltip {
        draw_tooltip(root, text)?;
    }

    root.present().map_err(backend_err)?;
    Ok(())
}

fn draw_axes<DB>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()>
where
    DB: DrawingBackend,
{
    let left = scene.margins.left as i32;
    let top = scene.margins.top as i32;
    let axis_y = top + scene.inner_height() as i32;
    let right = left + scene.inner_width() as i32;

    let x_label_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Top));
    let y_label_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .pos(Pos::new(HPos::Right, VPos::Center));

    // horizontal axis
    root.draw(&PathElement::new(
        vec![(left, axis_y), (right, axis_y)],
        BLACK.stroke_width(1),
    ))
    .map_err(backend_err)?;
    for (date, label) in &scene.x_ticks {
        let tx = scene.surface_x(*date).round() as i32;
        root.draw(&PathElement::new(
            vec![(tx, axis_y), (tx, axis_y + TICK_LEN)],
            BLACK.stroke_width(1),
        ))
        .map_err(backend_err)?;
        root.draw(&Text::new(
            label.as_str(),
            (tx, axis_y + TICK_LEN + TICK_PADDING),
            x_label_style.clone(),
        ))
        .map_err(backend_err)?;
    }

    // vertical axis
    root.draw(&PathElement::new(
        vec![(left, top), (left, axis_y)],
        BLACK.stroke_width(1),
    ))
    .map_err(backend_err)?;
    for (v, label) in &scene.y_ticks {
        let ty = scene.surface_y(*v).round() as i32;
        root.draw(&PathElement::new(
            vec![(left - TICK_LEN, ty), (left, ty)],
            BLACK.stroke_width(1),
        ))
        .map_err(backend_err)?;
        root.draw(&Text::new(
            label.as_str(),
            (left - TICK_LEN - 3, ty),
            y_label_style.clone(),
        ))
        .map_err(backend_err)?;
    }

    Ok(())
}

fn draw_tooltip<DB>(root: &DrawingArea<DB, Shift>, text: &str) -> Result<()>
where
    DB: DrawingBackend,
{
    let font_px: u32 = 14;
    let (tx, ty) = TOOLTIP_POS;
    let text_w = estimate_text_width_px(text, font_px) as i32;
    let pad = 4;

    root.draw(&Rectangle::new(
        [
            (tx - pad, ty - pad),
            (tx + text_w + pad, ty + font_px as i32 + pad),
        ],
        WHITE.mix(0.85).filled(),
    ))
    .map_err(backend_err)?;
    root.draw(&Text::new(
        text,
        (tx, ty),
        TextStyle::from((FontFamily::SansSerif, font_px)).pos(Pos::new(HPos::Left, VPos::Top)),
    ))
    .map_err(backend_err)?;
    Ok(())
}

/// Heuristic text width (Plotters has no built-in text measuring).
fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

fn px(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}
