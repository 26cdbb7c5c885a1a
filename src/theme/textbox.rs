use std::collections::BTreeMap;

use kurbo::Affine;
use tracing::warn;

use crate::document::css::parse_style;
use crate::document::model::{Element, VectorDocument};
use crate::foundation::geom::{Bounds, parse_transform, translation_of};
use crate::theme::properties::PropertyMap;

#[derive(Clone, Debug)]
/// An out-of-band text region extracted from the document.
///
/// The vector rasterizer's flowed-text support is too limited for wrapped,
/// aligned labels, so `textbox` elements are pulled out of the document
/// before rasterization and drawn on top afterwards via the text renderer.
/// A text box lives for exactly one render pass.
pub struct TextBox {
    /// Absolute bounds in device pixels, ancestor transforms applied.
    pub bounds: Bounds,
    /// Text to lay out.
    pub text: String,
    /// Parsed style of the matching `<id>_text` element.
    pub style: BTreeMap<String, String>,
}

/// Extract every `textbox`/`<id>_text` pair from the document.
///
/// For each element of class `textbox` with id `ID`, the element with id
/// `ID_text` supplies the style; the drawn text is the property named `ID`
/// (falling back to the text element's literal content). Both elements are
/// removed from the document. Bounds compose the textbox's local
/// translation with every ancestor transform up to the root, outermost
/// first.
pub fn extract_text_boxes(
    document: &mut VectorDocument,
    properties: &PropertyMap,
) -> Vec<TextBox> {
    let mut found: Vec<(String, Bounds)> = Vec::new();
    collect(&document.root, Affine::IDENTITY, &mut found);

    let mut boxes = Vec::new();
    for (id, bounds) in found {
        let text_id = format!("{id}_text");
        let Some(text_el) = document.find_by_id(&text_id) else {
            warn!(id, "textbox has no matching text element; skipped");
            continue;
        };
        let style = parse_style(text_el.attr("style").unwrap_or(""));
        let text = match properties.get(&id).and_then(|v| v.display_string()) {
            Some(t) => t,
            None => text_el.text(),
        };

        document
            .root
            .remove_descendants(&|e| e.id() == Some(id.as_str()) || e.id() == Some(text_id.as_str()));
        boxes.push(TextBox {
            bounds,
            text,
            style,
        });
    }
    boxes
}

fn collect(element: &Element, ancestors: Affine, out: &mut Vec<(String, Bounds)>) {
    let acc = match element.attr("transform") {
        Some(t) => ancestors * parse_transform(t),
        None => ancestors,
    };

    if element.has_class("textbox") {
        match element.id() {
            Some(id) => {
                let local = element.bounds();
                let absolute = acc * Affine::translate((local.x, local.y));
                let (x, y) = translation_of(absolute);
                out.push((id.to_string(), Bounds::new(x, y, local.w, local.h)));
            }
            None => warn!("textbox element without id; skipped"),
        }
    }

    for child in element.child_elements() {
        collect(child, acc, out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/textbox.rs"]
mod tests;
