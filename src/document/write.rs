use crate::document::model::{Element, Node, VectorDocument};

/// Serialize a document back to XML text.
///
/// Output is unindented; attribute and child order are preserved from the
/// in-memory tree, so serialization differences against the source are
/// limited to whitespace normalization.
pub fn write_document(doc: &VectorDocument) -> String {
    let opt = xmlwriter::Options {
        use_single_quote: false,
        indent: xmlwriter::Indent::None,
        attributes_indent: xmlwriter::Indent::None,
    };
    let mut w = xmlwriter::XmlWriter::new(opt);
    write_element(&mut w, &doc.root);
    w.end_document()
}

fn write_element(w: &mut xmlwriter::XmlWriter, element: &Element) {
    w.start_element(&element.name);
    for (name, value) in &element.attrs {
        w.write_attribute(name, value);
    }
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(w, e),
            Node::Text(t) => w.write_text(t),
        }
    }
    w.end_element();
}

#[cfg(test)]
#[path = "../../tests/unit/document/write.rs"]
mod tests;
