use super::*;

#[test]
fn ternary_levels_get_distinct_colors() {
    let p = Palette::default();
    assert_eq!(p.color_for(Levels::Binary, 1), p.fill);
    assert_eq!(p.color_for(Levels::Ternary, 1), p.mid);
    assert_eq!(p.color_for(Levels::Ternary, 2), p.dark);
    assert_eq!(p.color_for(Levels::Ternary, 0), p.background);
    assert_ne!(p.mid, p.dark);
}

#[test]
fn every_third_line_is_thick() {
    let s = RenderStyle::with_cell_size(32);
    let widths: Vec<_> = (0..7).map(|i| s.line_width(i)).collect();
    assert_eq!(widths, vec![3, 1, 1, 3, 1, 1, 3]);
}

#[test]
fn validate_rejects_degenerate_geometry() {
    assert!(RenderStyle::with_cell_size(0).validate().is_err());
    let mut s = RenderStyle::with_cell_size(2);
    assert!(s.validate().is_err());
    s.thick_line_px = 2;
    assert!(s.validate().is_ok());
}

#[test]
fn palette_json_fills_missing_fields() {
    let p: Palette = serde_json::from_str(r#"{ "fill": [255, 0, 0] }"#).unwrap();
    assert_eq!(p.fill, crate::foundation::core::Rgb8::new(255, 0, 0));
    assert_eq!(p.background, Palette::default().background);
    assert!(serde_json::from_str::<Palette>(r#"{ "nope": [0, 0, 0] }"#).is_err());
}
