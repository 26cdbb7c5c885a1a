use super::*;
use crate::document::parse::parse_document;

#[test]
fn parse_write_round_trip_is_stable() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><g id="a"><rect x="1" width="2" height="3"/><text>hi</text></g></svg>"#;
    let doc = parse_document(src).unwrap();
    let out = write_document(&doc);
    let doc2 = parse_document(&out).unwrap();
    assert_eq!(doc, doc2);
}

#[test]
fn output_preserves_attribute_order() {
    let mut root = Element::new("svg");
    root.set_attr("width", "5");
    root.set_attr("height", "6");
    let out = write_document(&VectorDocument::new(root));
    let w = out.find("width").unwrap();
    let h = out.find("height").unwrap();
    assert!(w < h);
}

#[test]
fn text_children_are_serialized() {
    let mut root = Element::new("svg");
    let mut label = Element::new("text");
    label.children.push(Node::Text("volume".to_string()));
    root.children.push(Node::Element(label));
    let out = write_document(&VectorDocument::new(root));
    assert!(out.contains("<text>volume</text>"));
}
