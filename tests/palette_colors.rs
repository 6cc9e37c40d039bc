use streamgraph_rs::ChartError;
use streamgraph_rs::palette::{MAX_COLORS, Palette, Rgb};

#[test]
fn spectral_nine_reversed_leads_with_blue() {
    let p = Palette::lookup("Spectral", 9).unwrap();
    assert_eq!(p.len(), 9);
    // the swatch list is reversed, so index 0 is the table's last entry
    assert_eq!(p.color(0), Rgb::new(0x32, 0x88, 0xbd));
    assert_eq!(p.color(0).hex(), "#3288bd");
    assert_eq!(p.stroke(), p.color(0));
}

#[test]
fn assignment_is_stable_across_lookups() {
    let a = Palette::lookup("Blues", 6).unwrap();
    let b = Palette::lookup("Blues", 6).unwrap();
    assert_eq!(a, b);
    for i in 0..6 {
        assert_eq!(a.color(i), b.color(i));
    }
}

#[test]
fn overflow_clamps_to_nine_with_deterministic_reuse() {
    let _ = env_logger::builder().is_test(true).try_init();
    let p = Palette::lookup("Spectral", 12).unwrap();
    assert_eq!(p.len(), MAX_COLORS);

    let distinct: std::collections::BTreeSet<String> =
        (0..12).map(|i| p.color(i).hex()).collect();
    assert_eq!(distinct.len(), 9);

    assert_eq!(p.color(9), p.color(0));
    assert_eq!(p.color(10), p.color(1));
    assert_eq!(p.color(11), p.color(2));
}

#[test]
fn small_category_counts_borrow_the_three_color_set() {
    let two = Palette::lookup("Greens", 2).unwrap();
    assert_eq!(two.len(), 3);
    let one = Palette::lookup("Greens", 1).unwrap();
    assert_eq!(one, two);
}

#[test]
fn names_are_case_insensitive() {
    let a = Palette::lookup("spectral", 5).unwrap();
    let b = Palette::lookup("Spectral", 5).unwrap();
    for i in 0..5 {
        assert_eq!(a.color(i), b.color(i));
    }
}

#[test]
fn unknown_name_is_rejected() {
    let err = Palette::lookup("Rainbow", 5).unwrap_err();
    assert!(matches!(err, ChartError::UnknownPalette(name) if name == "Rainbow"));
}

#[test]
fn every_scheme_covers_sizes_three_through_nine() {
    for name in ["Spectral", "Blues", "Greens", "Oranges", "Purples", "Reds"] {
        for n in 3..=9 {
            let p = Palette::lookup(name, n).unwrap();
            assert_eq!(p.len(), n, "{name} size {n}");
            let distinct: std::collections::BTreeSet<String> =
                (0..n).map(|i| p.color(i).hex()).collect();
            assert_eq!(distinct.len(), n, "{name} size {n} has duplicate swatches");
        }
    }
}
