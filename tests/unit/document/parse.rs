use super::*;

const TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"
    xmlns:xlink="http://www.w3.org/1999/xlink" width="320" height="240">
  <g id="layer">
    <rect id="bar" x="1" y="2" width="3" height="4"/>
    <image xlink:href="a.png"/>
    <text id="label">hello</text>
  </g>
</svg>"#;

#[test]
fn namespaces_are_hoisted_to_root_attributes() {
    let doc = parse_document(TEMPLATE).unwrap();
    assert_eq!(
        doc.root.attr("xmlns"),
        Some("http://www.w3.org/2000/svg")
    );
    assert_eq!(
        doc.root.attr("xmlns:xlink"),
        Some("http://www.w3.org/1999/xlink")
    );
    assert_eq!(doc.root.attr("width"), Some("320"));
}

#[test]
fn namespaced_attributes_keep_their_prefix() {
    let doc = parse_document(TEMPLATE).unwrap();
    let image = doc.root.find(&|e| e.name == "image").unwrap();
    assert!(image.attrs.iter().any(|(n, v)| n == "xlink:href" && v == "a.png"));
}

#[test]
fn indentation_text_is_dropped_but_content_kept() {
    let doc = parse_document(TEMPLATE).unwrap();
    let layer = doc.find_by_id("layer").unwrap();
    assert!(layer.children.iter().all(|n| matches!(n, Node::Element(_))));
    assert_eq!(doc.find_by_id("label").unwrap().text(), "hello");
}

#[test]
fn malformed_text_is_a_parse_error() {
    let err = parse_document("<svg><unclosed></svg>").unwrap_err();
    assert!(matches!(err, KeylcdError::Parse(_)));
}
