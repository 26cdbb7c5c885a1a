use super::*;

fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
    let mut e = Element::new("rect");
    e.set_attr("id", id);
    e.set_attr("x", x.to_string());
    e.set_attr("y", y.to_string());
    e.set_attr("width", w.to_string());
    e.set_attr("height", h.to_string());
    e
}

#[test]
fn attr_matches_unprefixed_namespaced_names() {
    let mut e = Element::new("image");
    e.attrs.push(("xlink:href".to_string(), "a.png".to_string()));
    assert_eq!(e.attr("href"), Some("a.png"));
    assert_eq!(e.attr("xlink:href"), Some("a.png"));
    assert_eq!(e.attr("x"), None);
}

#[test]
fn set_attr_replaces_in_place() {
    let mut e = Element::new("rect");
    e.set_attr("x", "1");
    e.set_attr("x", "2");
    assert_eq!(e.attrs.len(), 1);
    assert_eq!(e.attr("x"), Some("2"));
    assert_eq!(e.remove_attr("x"), Some("2".to_string()));
    assert_eq!(e.attr("x"), None);
}

#[test]
fn class_list_is_whitespace_separated() {
    let mut e = Element::new("rect");
    e.set_attr("class", "progress  highlight");
    assert!(e.has_class("progress"));
    assert!(e.has_class("highlight"));
    assert!(!e.has_class("high"));
}

#[test]
fn geom_attr_defaults_to_zero() {
    let mut e = Element::new("rect");
    e.set_attr("width", "12.5");
    e.set_attr("height", "nope");
    assert_eq!(e.geom_attr("width"), 12.5);
    assert_eq!(e.geom_attr("height"), 0.0);
    assert_eq!(e.geom_attr("x"), 0.0);
}

#[test]
fn find_by_id_searches_depth_first() {
    let mut root = Element::new("svg");
    let mut group = Element::new("g");
    group.children.push(Node::Element(rect("inner", 1.0, 2.0, 3.0, 4.0)));
    root.children.push(Node::Element(group));
    let doc = VectorDocument::new(root);

    assert!(doc.find_by_id("inner").is_some());
    assert!(doc.find_by_id("missing").is_none());
}

#[test]
fn absolute_bounds_composes_ancestor_transforms() {
    let mut root = Element::new("svg");
    let mut group = Element::new("g");
    group.set_attr("transform", "translate(5, 5)");
    group.children.push(Node::Element(rect("box", 10.0, 10.0, 100.0, 20.0)));
    root.children.push(Node::Element(group));

    let b = root.absolute_bounds("box").unwrap();
    assert_eq!(b, crate::foundation::geom::Bounds::new(15.0, 15.0, 100.0, 20.0));
}

#[test]
fn remove_descendants_counts_and_recurses() {
    let mut root = Element::new("svg");
    let mut group = Element::new("g");
    group.children.push(Node::Element(rect("a", 0.0, 0.0, 1.0, 1.0)));
    root.children.push(Node::Element(group));
    root.children.push(Node::Element(rect("b", 0.0, 0.0, 1.0, 1.0)));

    let removed = root.remove_descendants(&|e| e.name == "rect");
    assert_eq!(removed, 2);
    assert!(root.find_by_id("a").is_none());
    assert!(root.find_by_id("b").is_none());
}

#[test]
fn text_concatenates_direct_children_only() {
    let mut el = Element::new("text");
    el.children.push(Node::Text("Hello ".to_string()));
    let mut span = Element::new("tspan");
    span.children.push(Node::Text("nested".to_string()));
    el.children.push(Node::Element(span));
    el.children.push(Node::Text("World".to_string()));
    assert_eq!(el.text(), "Hello World");
}
