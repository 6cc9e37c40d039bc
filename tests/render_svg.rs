use streamgraph_rs::interact::Highlight;
use streamgraph_rs::models::RawRecord;
use streamgraph_rs::viz;
use streamgraph_rs::{ChartConfig, ChartError, Streamgraph, widget};

fn sample_config() -> ChartConfig {
    ChartConfig {
        data: vec![
            RawRecord::new("2020-01-01", "A", "1"),
            RawRecord::new("2020-01-01", "B", "3"),
            RawRecord::new("2020-02-01", "A", "2"),
            RawRecord::new("2020-02-01", "B", "2"),
            RawRecord::new("2020-03-01", "A", "4"),
            RawRecord::new("2020-03-01", "B", "1"),
        ],
        ..ChartConfig::default()
    }
}

#[test]
fn render_produces_one_band_per_category() {
    let svg = widget::render(&sample_config(), 800, 480).unwrap();
    assert!(svg.starts_with("<?xml") || svg.contains("<svg"));
    let bands = svg.matches("<polygon").count();
    assert!(bands >= 2, "expected at least two bands, found {bands}");
    // axis labels made it into the document
    assert!(svg.contains("Jan 2020"));
}

#[test]
fn resize_is_idempotent() {
    let mut chart = Streamgraph::new(sample_config());
    let first = chart.render(800, 480).unwrap();
    let second = chart.resize(800, 480).unwrap();
    let third = chart.resize(800, 480).unwrap();
    assert_eq!(first, second);
    assert_eq!(second, third);

    let smaller = chart.resize(400, 300).unwrap();
    assert_ne!(first, smaller);
}

#[test]
fn invalid_rows_abort_before_rendering() {
    let config = ChartConfig {
        data: vec![RawRecord::new("soon", "A", "1")],
        ..ChartConfig::default()
    };
    let err = widget::render(&config, 800, 480).unwrap_err();
    assert!(matches!(err, ChartError::InvalidInput { row: 0, .. }));

    let empty = ChartConfig::default();
    let err = widget::render(&empty, 800, 480).unwrap_err();
    assert!(matches!(err, ChartError::EmptyData));
}

#[test]
fn unknown_option_names_are_rejected() {
    let config = ChartConfig {
        palette: "Rainbow".into(),
        ..sample_config()
    };
    assert!(matches!(
        widget::render(&config, 800, 480).unwrap_err(),
        ChartError::UnknownPalette(_)
    ));

    let config = ChartConfig {
        offset: "spiral".into(),
        ..sample_config()
    };
    assert!(matches!(
        widget::render(&config, 800, 480).unwrap_err(),
        ChartError::UnknownOffset(_)
    ));

    let config = ChartConfig {
        interpolate: "wavy".into(),
        ..sample_config()
    };
    assert!(matches!(
        widget::render(&config, 800, 480).unwrap_err(),
        ChartError::UnknownCurve(_)
    ));
}

#[test]
fn grouped_tick_labels_appear_when_requested() {
    let config = ChartConfig {
        data: vec![
            RawRecord::new("2020-01-01", "A", "1000"),
            RawRecord::new("2020-02-01", "A", "4000"),
        ],
        y_tick_format: Some(",".into()),
        ..ChartConfig::default()
    };
    let svg = widget::render(&config, 800, 480).unwrap();
    assert!(svg.contains("1,000"), "grouped y labels expected");
}

#[test]
fn hover_rerender_adds_tooltip_text() {
    let scene = viz::layout(&sample_config(), 800, 480).unwrap();
    let mut highlight = Highlight::idle(scene.layers.len());
    highlight.stroked = Some(1);
    highlight.tooltip = Some("B: 3".into());
    let svg = viz::render_svg(&scene, &highlight).unwrap();
    assert!(svg.contains("B: 3"));
}

#[test]
fn render_to_file_writes_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    let scene = viz::layout(&sample_config(), 640, 400).unwrap();
    viz::render_to_file(&scene, &Highlight::idle(scene.layers.len()), &path).unwrap();
    let meta = std::fs::metadata(&path).unwrap();
    assert!(meta.len() > 0, "svg has content");
}

#[test]
fn every_curve_style_renders() {
    for style in ["linear", "cardinal", "basis", "step-after"] {
        let config = ChartConfig {
            interpolate: style.into(),
            ..sample_config()
        };
        let svg = widget::render(&config, 640, 400).unwrap();
        assert!(svg.contains("<polygon"), "{style} produced no bands");
    }
}
