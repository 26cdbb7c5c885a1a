use super::*;

#[test]
fn truthiness_both_polarities() {
    assert!(PropertyValue::from("on").truthy());
    assert!(!PropertyValue::from("").truthy());
    assert!(PropertyValue::from(1.0).truthy());
    assert!(!PropertyValue::from(0.0).truthy());
    assert!(PropertyValue::from(true).truthy());
    assert!(!PropertyValue::from(false).truthy());
    assert!(PropertyValue::Bytes(vec![]).truthy());
}

#[test]
fn numbers_display_without_fraction_when_integral() {
    assert_eq!(PropertyValue::from(50.0).display_string().unwrap(), "50");
    assert_eq!(PropertyValue::from(0.5).display_string().unwrap(), "0.5");
    assert_eq!(PropertyValue::from(true).display_string().unwrap(), "true");
    assert!(PropertyValue::Bytes(vec![1]).display_string().is_none());
}

#[test]
fn as_f64_parses_text() {
    assert_eq!(PropertyValue::from(" 42 ").as_f64(), Some(42.0));
    assert_eq!(PropertyValue::from("x").as_f64(), None);
    assert_eq!(PropertyValue::from(3.5).as_f64(), Some(3.5));
}

#[test]
fn escape_handles_markup_characters() {
    assert_eq!(escape_xml("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    assert_eq!(escape_xml("plain"), "plain");
}

#[test]
fn substitute_resolves_known_keys() {
    let mut values = std::collections::BTreeMap::new();
    values.insert("title".to_string(), "Songs".to_string());
    assert_eq!(substitute("<text>${title}</text>", &values), "<text>Songs</text>");
}

#[test]
fn substitute_is_total_over_missing_keys() {
    let values = std::collections::BTreeMap::new();
    // Missing keys, bare dollars and unterminated placeholders all pass
    // through byte-identical.
    for text in ["${missing}", "cost: $5", "${", "${not valid}", "${a${b}"] {
        assert_eq!(substitute(text, &values), text);
    }
}

#[test]
fn substitute_handles_adjacent_placeholders() {
    let mut values = std::collections::BTreeMap::new();
    values.insert("a".to_string(), "1".to_string());
    values.insert("b".to_string(), "2".to_string());
    assert_eq!(substitute("${a}${b}${c}", &values), "12${c}");
}
