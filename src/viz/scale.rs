//! Continuous scales and axis tick enumeration (pipeline stage 4).

use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use num_format::{Locale, ToFormattedString};

use crate::error::ChartError;

/// Continuous mapping from a date domain onto `[0, range_px]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: NaiveDate,
    end: NaiveDate,
    range_px: f64,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, range_px: f64) -> Self {
        Self {
            start,
            end,
            range_px,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Horizontal offset of a date within the drawable area.
    ///
    /// A degenerate single-date domain maps everything to the left edge.
    pub fn position(&self, date: NaiveDate) -> f64 {
        let span = (self.end - self.start).num_days();
        if span <= 0 {
            return 0.0;
        }
        (date - self.start).num_days() as f64 / span as f64 * self.range_px
    }

    /// Invert a horizontal offset back to a date, clamped to the domain.
    pub fn invert(&self, px: f64) -> NaiveDate {
        let span = (self.end - self.start).num_days();
        if span <= 0 || self.range_px <= 0.0 {
            return self.start;
        }
        let t = (px / self.range_px).clamp(0.0, 1.0);
        self.start + Duration::days((t * span as f64).round() as i64)
    }
}

/// Continuous mapping from a value domain onto `[range_px, 0]`, inverted so
/// larger values sit higher on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    min: f64,
    max: f64,
    range_px: f64,
}

impl LinearScale {
    pub fn new(min: f64, max: f64, range_px: f64) -> Self {
        Self { min, max, range_px }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Vertical offset of a value: domain max maps to 0, domain min to the
    /// full range.
    pub fn position(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return self.range_px;
        }
        self.range_px - (v - self.min) / span * self.range_px
    }

    /// Round tick values covering the domain, aiming for `count` intervals.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let span = self.max - self.min;
        if count == 0 || span <= 0.0 {
            return vec![self.min];
        }
        let step = tick_step(span, count);
        let mut v = (self.min / step).ceil() * step;
        let mut out = Vec::new();
        while v <= self.max + step * 1e-9 {
            // normalize -0.0 and float dust near zero
            out.push(if v.abs() < step * 1e-9 { 0.0 } else { v });
            v += step;
        }
        out
    }
}

/// Largest round step (1/2/5 times a power of ten) giving at most `count`
/// intervals over `span`.
fn tick_step(span: f64, count: usize) -> f64 {
    let raw = span / count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual >= 50f64.sqrt() {
        10.0
    } else if residual >= 10f64.sqrt() {
        5.0
    } else if residual >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    magnitude * factor
}

/// Calendar unit for horizontal tick stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl FromStr for TickUnit {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, ChartError> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Self::Days),
            "week" | "weeks" => Ok(Self::Weeks),
            "month" | "months" => Ok(Self::Months),
            "year" | "years" => Ok(Self::Years),
            _ => Err(ChartError::UnknownTickUnit(s.to_string())),
        }
    }
}

/// Tick dates from the first `unit` boundary at or after `start`, stepping by
/// `interval` units, up to and including `end`.
pub fn date_ticks(
    start: NaiveDate,
    end: NaiveDate,
    unit: TickUnit,
    interval: u32,
) -> Vec<NaiveDate> {
    let interval = interval.max(1);
    let mut out = Vec::new();
    let mut tick = match first_boundary(start, unit) {
        Some(t) => t,
        None => return out,
    };
    while tick <= end {
        out.push(tick);
        tick = match step(tick, unit, interval) {
            Some(t) => t,
            None => break,
        };
    }
    out
}

fn first_boundary(start: NaiveDate, unit: TickUnit) -> Option<NaiveDate> {
    match unit {
        TickUnit::Days => Some(start),
        TickUnit::Weeks => {
            // week boundaries fall on Sundays
            let mut d = start;
            while d.weekday() != Weekday::Sun {
                d = d.succ_opt()?;
            }
            Some(d)
        }
        TickUnit::Months => {
            if start.day() == 1 {
                Some(start)
            } else {
                NaiveDate::from_ymd_opt(start.year(), start.month(), 1)
                    .and_then(|d| d.checked_add_months(Months::new(1)))
            }
        }
        TickUnit::Years => {
            if start.month() == 1 && start.day() == 1 {
                Some(start)
            } else {
                NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
            }
        }
    }
}

fn step(tick: NaiveDate, unit: TickUnit, interval: u32) -> Option<NaiveDate> {
    match unit {
        TickUnit::Days => tick.checked_add_days(chrono::Days::new(u64::from(interval))),
        TickUnit::Weeks => tick.checked_add_days(chrono::Days::new(7 * u64::from(interval))),
        TickUnit::Months => tick.checked_add_months(Months::new(interval)),
        TickUnit::Years => tick.checked_add_months(Months::new(12 * interval)),
    }
}

/// Format a tick date with a chrono format string, falling back to ISO when
/// the format string itself is malformed.
pub fn format_date(date: NaiveDate, fmt: &str) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    if write!(out, "{}", date.format(fmt)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format("%Y-%m-%d"));
    }
    out
}

/// Format a vertical tick label.
///
/// `","` selects locale-grouped integers; anything else falls back to a
/// compact precision ladder (whole numbers once labels reach three digits).
pub fn format_value(v: f64, fmt: Option<&str>) -> String {
    match fmt {
        Some(",") => (v.round() as i64).to_formatted_string(&Locale::en),
        _ => {
            let a = v.abs();
            let prec = if a >= 100.0 {
                0
            } else if a >= 10.0 {
                1
            } else {
                2
            };
            format!("{:.*}", prec, v)
        }
    }
}
