use crate::document::model::{Element, Node, VectorDocument};
use crate::foundation::error::{KeylcdError, KeylcdResult};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse XML text into a mutable [`VectorDocument`].
///
/// Namespace declarations are re-attached to the root element as literal
/// `xmlns`/`xmlns:prefix` attributes so the tree serializes back to valid
/// standalone SVG. Comments and processing instructions are dropped.
pub fn parse_document(text: &str) -> KeylcdResult<VectorDocument> {
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| KeylcdError::parse(format!("malformed document: {e}")))?;
    let src_root = doc.root_element();

    let mut root = convert_element(src_root);

    // Hoist every namespace in scope at the root into serialized form.
    let mut xmlns = Vec::new();
    for ns in src_root.namespaces() {
        if ns.uri() == XML_NS {
            continue;
        }
        let attr_name = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        xmlns.push((attr_name, ns.uri().to_string()));
    }
    xmlns.extend(root.attrs.drain(..));
    root.attrs = xmlns;

    Ok(VectorDocument::new(root))
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let mut out = Element::new(qualified_tag_name(node));

    for attr in node.attributes() {
        let name = match attr.namespace() {
            Some(uri) => match node.lookup_prefix(uri) {
                Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", attr.name()),
                _ => attr.name().to_string(),
            },
            None => attr.name().to_string(),
        };
        out.attrs.push((name, attr.value().to_string()));
    }

    for child in node.children() {
        if child.is_element() {
            out.children.push(Node::Element(convert_element(child)));
        } else if child.is_text() {
            if let Some(t) = child.text() {
                // Inter-element indentation is serialization noise.
                if !t.trim().is_empty() {
                    out.children.push(Node::Text(t.to_string()));
                }
            }
        }
    }

    out
}

fn qualified_tag_name(node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace().and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", tag.name()),
        _ => tag.name().to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/parse.rs"]
mod tests;
