use super::*;

#[test]
fn draw_without_layout_is_a_validation_error() {
    let mut r = TextRender::new();
    let mut surface = crate::raster::surface::new_surface(8, 8).unwrap();
    let err = r.draw(&mut surface, None, None).unwrap_err();
    assert!(matches!(err, KeylcdError::Validation(_)));
}

#[test]
fn measure_is_zero_before_layout() {
    let r = TextRender::new();
    assert_eq!(r.measure(), (0.0, 0.0, 0.0, 0.0));
}

#[test]
fn invalid_point_size_is_rejected() {
    let mut r = TextRender::new();
    let attrs = TextAttributes {
        text: "x".to_string(),
        point_size: Some(0.0),
        ..TextAttributes::default()
    };
    assert!(r.set_attributes(&attrs).is_err());

    let attrs = TextAttributes {
        text: "x".to_string(),
        point_size: Some(f32::NAN),
        ..TextAttributes::default()
    };
    assert!(r.set_attributes(&attrs).is_err());
}

#[test]
fn empty_text_lays_out_and_draws() {
    let mut r = TextRender::new();
    let attrs = TextAttributes {
        text: String::new(),
        bounds: Some(Bounds::new(0.0, 0.0, 32.0, 16.0)),
        ..TextAttributes::default()
    };
    r.set_attributes(&attrs).unwrap();
    let (_, _, w, _) = r.measure();
    assert_eq!(w, 0.0);

    let mut surface = crate::raster::surface::new_surface(32, 16).unwrap();
    r.draw(&mut surface, None, None).unwrap();
    assert!(surface.data().iter().all(|&b| b == 0));
}

#[test]
fn defaults_are_opaque_black_left_top() {
    let attrs = TextAttributes::default();
    assert_eq!(attrs.align, Align::Left);
    assert_eq!(attrs.valign, VAlign::Top);
    assert_eq!(attrs.wrap, Wrap::None);
    assert_eq!(attrs.slant, Slant::Normal);
    assert_eq!(attrs.color, TextColor { r: 0, g: 0, b: 0, a: 255 });
}
