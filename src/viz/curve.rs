//! Curve interpolation for band outlines.
//!
//! Splines are flattened to polylines at a fixed subdivision; both spline
//! styles clamp their endpoints so outlines start and end exactly on the
//! first and last stacked point.

use std::str::FromStr;

use crate::error::ChartError;

/// Samples per segment when flattening splines.
const SEGMENT_STEPS: usize = 8;

/// Cardinal spline tension matching the original renderer.
const CARDINAL_TENSION: f64 = 0.7;

/// Curve style for band outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveStyle {
    /// Straight segments between points.
    Linear,
    /// Cardinal spline through the points.
    #[default]
    Cardinal,
    /// Uniform cubic B-spline (smooths across points).
    Basis,
    /// Horizontal step holding each value until the next date.
    StepAfter,
}

impl FromStr for CurveStyle {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, ChartError> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "cardinal" => Ok(Self::Cardinal),
            "basis" => Ok(Self::Basis),
            "step-after" | "step_after" => Ok(Self::StepAfter),
            _ => Err(ChartError::UnknownCurve(s.to_string())),
        }
    }
}

/// Interpolate a polyline through `points` (pixel space).
pub fn interpolate(points: &[(f64, f64)], style: CurveStyle) -> Vec<(f64, f64)> {
    match style {
        CurveStyle::Linear => points.to_vec(),
        CurveStyle::StepAfter => step_after(points),
        CurveStyle::Cardinal => cardinal(points, CARDINAL_TENSION),
        CurveStyle::Basis => basis(points),
    }
}

fn step_after(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for pair in points.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        out.push(p);
        out.push((q.0, p.1));
    }
    if let Some(&last) = points.last() {
        out.push(last);
    }
    out
}

/// Hermite-sampled cardinal spline. Tangents at interior points span their
/// neighbors scaled by `(1 - tension) / 2`; endpoints use one-sided tangents.
fn cardinal(points: &[(f64, f64)], tension: f64) -> Vec<(f64, f64)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let s = (1.0 - tension) / 2.0;
    let mut out = Vec::with_capacity((n - 1) * SEGMENT_STEPS + 1);
    out.push(points[0]);
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        for step in 1..=SEGMENT_STEPS {
            let t = step as f64 / SEGMENT_STEPS as f64;
            out.push(hermite(p0, p1, p2, p3, s, t));
        }
    }
    out
}

#[allow(clippy::many_single_char_names)]
fn hermite(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    s: f64,
    t: f64,
) -> (f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    let coord = |a: f64, b: f64, c: f64, d: f64| {
        let m1 = s * (c - a);
        let m2 = s * (d - b);
        h00 * b + h10 * m1 + h01 * c + h11 * m2
    };
    (
        coord(p0.0, p1.0, p2.0, p3.0),
        coord(p0.1, p1.1, p2.1, p3.1),
    )
}

/// Uniform cubic B-spline with tripled endpoints so the curve is clamped.
fn basis(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut ctrl = Vec::with_capacity(n + 4);
    ctrl.push(points[0]);
    ctrl.push(points[0]);
    ctrl.extend_from_slice(points);
    ctrl.push(points[n - 1]);
    ctrl.push(points[n - 1]);

    let mut out = vec![points[0]];
    for w in ctrl.windows(4) {
        for step in 1..=SEGMENT_STEPS {
            let t = step as f64 / SEGMENT_STEPS as f64;
            out.push(bspline(w[0], w[1], w[2], w[3], t));
        }
    }
    out
}

fn bspline(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let b0 = (1.0 - t).powi(3) / 6.0;
    let b1 = (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0;
    let b2 = (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0;
    let b3 = t3 / 6.0;
    (
        b0 * p0.0 + b1 * p1.0 + b2 * p2.0 + b3 * p3.0,
        b0 * p0.1 + b1 * p1.1 + b2 * p2.1 + b3 * p3.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_passes_through_data_points() {
        let pts = [(0.0, 0.0), (10.0, 5.0), (20.0, 2.0), (30.0, 8.0)];
        let sampled = interpolate(&pts, CurveStyle::Cardinal);
        for p in &pts {
            assert!(
                sampled
                    .iter()
                    .any(|q| (q.0 - p.0).abs() < 1e-9 && (q.1 - p.1).abs() < 1e-9),
                "missing {p:?}"
            );
        }
    }

    #[test]
    fn basis_is_endpoint_clamped() {
        let pts = [(0.0, 1.0), (5.0, 4.0), (10.0, 1.0)];
        let sampled = interpolate(&pts, CurveStyle::Basis);
        let first = sampled.first().unwrap();
        let last = sampled.last().unwrap();
        assert!((first.0 - 0.0).abs() < 1e-9 && (first.1 - 1.0).abs() < 1e-9);
        assert!((last.0 - 10.0).abs() < 1e-9 && (last.1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn step_after_holds_values() {
        let pts = [(0.0, 1.0), (10.0, 3.0)];
        let sampled = interpolate(&pts, CurveStyle::StepAfter);
        assert_eq!(sampled, vec![(0.0, 1.0), (10.0, 1.0), (10.0, 3.0)]);
    }

    #[test]
    fn unknown_style_is_rejected() {
        assert!("wavy".parse::<CurveStyle>().is_err());
    }
}
