use chrono::NaiveDate;
use streamgraph_rs::viz::scale::{
    LinearScale, TickUnit, TimeScale, date_ticks, format_date, format_value,
};
use streamgraph_rs::{ChartConfig, Margins};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn time_scale_maps_domain_onto_pixels() {
    let x = TimeScale::new(d(2020, 1, 1), d(2020, 1, 11), 100.0);
    assert_eq!(x.position(d(2020, 1, 1)), 0.0);
    assert_eq!(x.position(d(2020, 1, 11)), 100.0);
    assert_eq!(x.position(d(2020, 1, 6)), 50.0);
}

#[test]
fn time_scale_invert_round_trips_and_clamps() {
    let x = TimeScale::new(d(2020, 1, 1), d(2020, 1, 11), 100.0);
    assert_eq!(x.invert(50.0), d(2020, 1, 6));
    assert_eq!(x.invert(-30.0), d(2020, 1, 1));
    assert_eq!(x.invert(500.0), d(2020, 1, 11));
}

#[test]
fn degenerate_single_date_domain_maps_to_left_edge() {
    let x = TimeScale::new(d(2020, 1, 1), d(2020, 1, 1), 100.0);
    assert_eq!(x.position(d(2020, 1, 1)), 0.0);
    assert_eq!(x.invert(70.0), d(2020, 1, 1));
}

#[test]
fn linear_scale_is_inverted() {
    let y = LinearScale::new(0.0, 4.0, 40.0);
    assert_eq!(y.position(4.0), 0.0);
    assert_eq!(y.position(0.0), 40.0);
    assert_eq!(y.position(1.0), 30.0);
}

#[test]
fn linear_ticks_are_round_values() {
    let y = LinearScale::new(0.0, 4.0, 40.0);
    assert_eq!(y.ticks(5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);

    let y = LinearScale::new(0.0, 4000.0, 400.0);
    assert_eq!(y.ticks(5), vec![0.0, 1000.0, 2000.0, 3000.0, 4000.0]);
}

#[test]
fn month_ticks_step_from_the_first_boundary() {
    let ticks = date_ticks(d(2020, 1, 15), d(2020, 5, 1), TickUnit::Months, 1);
    assert_eq!(
        ticks,
        vec![d(2020, 2, 1), d(2020, 3, 1), d(2020, 4, 1), d(2020, 5, 1)]
    );

    let ticks = date_ticks(d(2020, 1, 1), d(2020, 7, 1), TickUnit::Months, 3);
    assert_eq!(ticks, vec![d(2020, 1, 1), d(2020, 4, 1), d(2020, 7, 1)]);
}

#[test]
fn year_and_week_ticks() {
    let ticks = date_ticks(d(2019, 3, 1), d(2023, 1, 1), TickUnit::Years, 2);
    assert_eq!(ticks, vec![d(2020, 1, 1), d(2022, 1, 1)]);

    // 2020-01-05 was a Sunday
    let ticks = date_ticks(d(2020, 1, 1), d(2020, 1, 20), TickUnit::Weeks, 1);
    assert_eq!(ticks, vec![d(2020, 1, 5), d(2020, 1, 12), d(2020, 1, 19)]);
}

#[test]
fn tick_unit_names_parse() {
    assert_eq!("months".parse::<TickUnit>().unwrap(), TickUnit::Months);
    assert_eq!("Year".parse::<TickUnit>().unwrap(), TickUnit::Years);
    assert!("fortnights".parse::<TickUnit>().is_err());
}

#[test]
fn date_labels_honor_the_format_string() {
    assert_eq!(format_date(d(2020, 3, 1), "%b %Y"), "Mar 2020");
    assert_eq!(format_date(d(2020, 3, 1), "%Y-%m"), "2020-03");
}

#[test]
fn value_labels_group_thousands_when_asked() {
    assert_eq!(format_value(1000.0, Some(",")), "1,000");
    assert_eq!(format_value(1234567.0, Some(",")), "1,234,567");
    assert_eq!(format_value(3.0, None), "3.00");
    assert_eq!(format_value(42.5, None), "42.5");
    assert_eq!(format_value(250.0, None), "250");
}

#[test]
fn margins_default_to_documented_values() {
    let config = ChartConfig::default();
    assert_eq!(config.margins(), Margins {
        top: 20,
        right: 40,
        bottom: 30,
        left: 40,
    });

    let custom = ChartConfig {
        left: Some(60),
        ..ChartConfig::default()
    };
    let m = custom.margins();
    assert_eq!(m.left, 60);
    assert_eq!(m.top, 20);
}

#[test]
fn config_deserializes_with_absent_fields() {
    let config: ChartConfig = serde_json::from_str(
        r#"{
            "data": [{"date": "2020-01-01", "key": "A", "value": "1"}],
            "palette": "Blues",
            "interactive": false
        }"#,
    )
    .unwrap();
    assert_eq!(config.data.len(), 1);
    assert_eq!(config.palette, "Blues");
    assert!(!config.interactive);
    assert_eq!(config.offset, "silhouette");
    assert_eq!(config.margins(), Margins::default());
}
