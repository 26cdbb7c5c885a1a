use super::*;

#[test]
fn device_defaults_cover_the_control_surface() {
    let set = ControlSet::device_defaults();
    for id in ["backlight_colour", "lcd_brightness", "foreground", "background"] {
        assert!(set.get(id).is_some(), "missing {id}");
    }
    assert_eq!(set.iter().count(), 4);
}

#[test]
fn hints_select_the_theme_fills() {
    let set = ControlSet::device_defaults();
    let fg = set.for_hint(ControlHint::FOREGROUND).unwrap();
    assert_eq!(fg.value.color(), Some((255, 255, 255)));
    let bg = set.for_hint(ControlHint::BACKGROUND).unwrap();
    assert_eq!(bg.value.as_hex_rgb().unwrap(), "#000000");
}

#[test]
fn scalar_updates_clamp_to_the_declared_range() {
    let mut set = ControlSet::device_defaults();
    set.set_value("lcd_brightness", ControlValue::Scalar(250)).unwrap();
    assert_eq!(set.get("lcd_brightness").unwrap().value, ControlValue::Scalar(100));
    set.set_value("lcd_brightness", ControlValue::Scalar(-5)).unwrap();
    assert_eq!(set.get("lcd_brightness").unwrap().value, ControlValue::Scalar(0));
}

#[test]
fn unknown_control_is_a_validation_error() {
    let mut set = ControlSet::device_defaults();
    let err = set.set_value("nope", ControlValue::Scalar(1)).unwrap_err();
    assert!(matches!(err, KeylcdError::Validation(_)));
}

#[test]
fn hex_formatting_pads_channels() {
    let v = ControlValue::Color(1, 2, 3);
    assert_eq!(v.as_hex_rgb().unwrap(), "#010203");
    assert!(ControlValue::Scalar(5).as_hex_rgb().is_none());
}
