use super::*;
use crate::document::parse::parse_document;
use crate::raster::surface::new_surface;
use crate::theme::redraw::RedrawScheduler;

const TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="240">
  <g id="scroll">
    <rect class="track" x="310" y="0" width="4" height="100"/>
    <rect class="knob" x="310" y="0" width="4" height="100"/>
  </g>
</svg>"#;

fn draw(values: ScrollValues) -> VectorDocument {
    let mut doc = parse_document(TEMPLATE).unwrap();
    let mut bar = Scrollbar::new("scroll", move |_, _| values);
    bar.configure(&doc).unwrap();

    let mut surface = new_surface(320, 240).unwrap();
    let properties = PropertyMap::new();
    let attributes = PropertyMap::new();
    let scheduler = RedrawScheduler::new();
    let mut ctx = DrawContext {
        surface: &mut surface,
        properties: &properties,
        attributes: &attributes,
        scheduler: &scheduler,
    };
    let element = doc.find_by_id_mut("scroll").unwrap();
    bar.draw(&mut ctx, element).unwrap();
    doc
}

#[test]
fn knob_is_scaled_and_positioned() {
    // Content twice the viewport, scrolled a quarter in: scale = 4.
    let doc = draw((200.0, 50.0, 25.0));
    let knob = doc.root.find(&|e| e.has_class("knob")).unwrap();
    assert_eq!(knob.attr("y"), Some("6"));
    assert_eq!(knob.attr("height"), Some("25"));
}

#[test]
fn at_top_knob_keeps_origin() {
    let doc = draw((200.0, 100.0, 0.0));
    let knob = doc.root.find(&|e| e.has_class("knob")).unwrap();
    assert_eq!(knob.attr("y"), Some("0"));
    assert_eq!(knob.attr("height"), Some("50"));
}

#[test]
fn empty_content_is_a_noop() {
    let doc = draw((0.0, 50.0, 0.0));
    let knob = doc.root.find(&|e| e.has_class("knob")).unwrap();
    assert_eq!(knob.attr("height"), Some("100"));
}

#[test]
fn missing_knob_is_tolerated() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="scroll"><rect class="track" height="10"/></g></svg>"#;
    let mut doc = parse_document(src).unwrap();
    let mut bar = Scrollbar::new("scroll", |_, _| (10.0, 5.0, 0.0));
    bar.configure(&doc).unwrap();

    let mut surface = new_surface(8, 8).unwrap();
    let properties = PropertyMap::new();
    let attributes = PropertyMap::new();
    let scheduler = RedrawScheduler::new();
    let mut ctx = DrawContext {
        surface: &mut surface,
        properties: &properties,
        attributes: &attributes,
        scheduler: &scheduler,
    };
    let element = doc.find_by_id_mut("scroll").unwrap();
    assert!(bar.draw(&mut ctx, element).is_ok());
}
