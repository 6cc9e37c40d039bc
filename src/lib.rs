//! streamgraph-rs
//!
//! A lightweight Rust library for laying out and rendering interactive
//! streamgraph charts from tabular time series.
//!
//! ### Features
//! - Stacked-band layout over a shared date grid with selectable offset
//!   policies (zero, silhouette, wiggle, expand) and explicit zero-fill for
//!   sparse categories
//! - Date and value scales with configurable margins, tick units/intervals,
//!   and tick formats
//! - Smooth band outlines (cardinal, basis, step interpolation) rendered to
//!   SVG, colored from bounded palettes
//! - Optional pointer-driven highlighting: hover dimming, nearest-point
//!   tooltips, stroke outline
//!
//! ### Example
//! ```no_run
//! use streamgraph_rs::{ChartConfig, Streamgraph};
//!
//! let mut config = ChartConfig::default();
//! config.data = streamgraph_rs::storage::load_csv("movies.csv")?;
//! config.offset = "silhouette".into();
//! let mut chart = Streamgraph::new(config);
//! let svg = chart.render(800, 480)?;
//! std::fs::write("movies.svg", svg)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod interact;
pub mod models;
pub mod normalize;
pub mod palette;
pub mod stack;
pub mod storage;
pub mod viz;
pub mod widget;

pub use config::{ChartConfig, Margins};
pub use error::ChartError;
pub use models::{Layer, RawRecord, Row, StackedPoint};
pub use stack::OffsetPolicy;
pub use widget::Streamgraph;
