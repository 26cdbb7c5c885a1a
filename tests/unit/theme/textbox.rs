use super::*;
use crate::document::parse::parse_document;
use crate::theme::properties::PropertyValue;

const TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="240">
  <g transform="translate(5, 5)">
    <rect class="textbox" id="line" x="10" y="10" width="100" height="20"/>
    <text id="line_text" style="font-size:10pt;fill:#ff0000">fallback</text>
  </g>
</svg>"#;

#[test]
fn bounds_compose_ancestor_transforms() {
    let mut doc = parse_document(TEMPLATE).unwrap();
    let boxes = extract_text_boxes(&mut doc, &PropertyMap::new());
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].bounds, Bounds::new(15.0, 15.0, 100.0, 20.0));
}

#[test]
fn property_value_overrides_literal_text() {
    let mut doc = parse_document(TEMPLATE).unwrap();
    let mut properties = PropertyMap::new();
    properties.insert("line".to_string(), PropertyValue::from("Now Playing"));
    let boxes = extract_text_boxes(&mut doc, &properties);
    assert_eq!(boxes[0].text, "Now Playing");
}

#[test]
fn literal_text_is_the_fallback() {
    let mut doc = parse_document(TEMPLATE).unwrap();
    let boxes = extract_text_boxes(&mut doc, &PropertyMap::new());
    assert_eq!(boxes[0].text, "fallback");
}

#[test]
fn style_comes_from_the_text_element() {
    let mut doc = parse_document(TEMPLATE).unwrap();
    let boxes = extract_text_boxes(&mut doc, &PropertyMap::new());
    assert_eq!(boxes[0].style.get("font-size").map(String::as_str), Some("10pt"));
    assert_eq!(boxes[0].style.get("fill").map(String::as_str), Some("#ff0000"));
}

#[test]
fn both_elements_are_removed() {
    let mut doc = parse_document(TEMPLATE).unwrap();
    extract_text_boxes(&mut doc, &PropertyMap::new());
    assert!(doc.find_by_id("line").is_none());
    assert!(doc.find_by_id("line_text").is_none());
}

#[test]
fn textbox_without_text_element_is_skipped() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect class="textbox" id="orphan" width="10" height="10"/></svg>"#;
    let mut doc = parse_document(src).unwrap();
    let boxes = extract_text_boxes(&mut doc, &PropertyMap::new());
    assert!(boxes.is_empty());
    // The orphan stays in the document untouched.
    assert!(doc.find_by_id("orphan").is_some());
}
