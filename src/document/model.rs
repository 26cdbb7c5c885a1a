use crate::foundation::geom::Bounds;

#[derive(Clone, Debug, PartialEq)]
/// A node in a [`VectorDocument`]: either a child element or literal text.
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Character data.
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
/// One element of a vector document.
///
/// Names are stored as serialized (possibly prefixed) qualified names, and
/// attributes preserve document order so a parse/serialize round trip is
/// stable up to whitespace.
pub struct Element {
    /// Qualified tag name as written in the source, e.g. `svg` or `svg:rect`.
    pub name: String,
    /// Attributes in document order, names as written (e.g. `xlink:href`).
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Construct an empty element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Attribute value by name (matches the serialized name, or its
    /// unprefixed form for namespaced attributes like `xlink:href`).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name || n.rsplit_once(':').map(|(_, l)| l) == Some(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }

    /// Remove an attribute if present, returning its value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(n, _)| n == name)?;
        Some(self.attrs.remove(idx).1)
    }

    /// `id` attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Numeric geometry attribute, defaulting to 0 when absent or malformed.
    pub fn geom_attr(&self, name: &str) -> f64 {
        self.attr(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0.0)
    }

    /// Local bounds from the `x`/`y`/`width`/`height` attributes.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.geom_attr("x"),
            self.geom_attr("y"),
            self.geom_attr("width"),
            self.geom_attr("height"),
        )
    }

    /// Concatenated text content of direct text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let Node::Text(t) = child {
                out.push_str(t);
            }
        }
        out
    }

    /// Iterator over direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Depth-first search of this subtree (self included) for an element id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find_by_id(id))
    }

    /// Mutable depth-first search of this subtree (self included).
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(e) = child
                && let Some(found) = e.find_by_id_mut(id)
            {
                return Some(found);
            }
        }
        None
    }

    /// First descendant (self included) matching a predicate.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(pred))
    }

    /// Mutable variant of [`Element::find`].
    pub fn find_mut(&mut self, pred: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(e) = child
                && let Some(found) = e.find_mut(pred)
            {
                return Some(found);
            }
        }
        None
    }

    /// Visit every element of this subtree, self included.
    pub fn for_each(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in self.child_elements() {
            child.for_each(f);
        }
    }

    /// Mutably visit every element of this subtree, self included.
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(e) = child {
                e.for_each_mut(f);
            }
        }
    }

    /// Absolute bounds of the descendant with the given id: its local
    /// `x`/`y` translation composed with every `transform` attribute from
    /// the root down, outermost first.
    pub fn absolute_bounds(&self, id: &str) -> Option<Bounds> {
        fn walk(el: &Element, ancestors: kurbo::Affine, id: &str) -> Option<Bounds> {
            let acc = match el.attr("transform") {
                Some(t) => ancestors * crate::foundation::geom::parse_transform(t),
                None => ancestors,
            };
            if el.id() == Some(id) {
                let local = el.bounds();
                let (x, y) = crate::foundation::geom::translation_of(
                    acc * kurbo::Affine::translate((local.x, local.y)),
                );
                return Some(Bounds::new(x, y, local.w, local.h));
            }
            el.child_elements().find_map(|c| walk(c, acc, id))
        }
        walk(self, kurbo::Affine::IDENTITY, id)
    }

    /// Remove every descendant element (never self) matching the predicate.
    /// Returns the number of removed elements.
    pub fn remove_descendants(&mut self, pred: &impl Fn(&Element) -> bool) -> usize {
        let mut removed = 0;
        self.children.retain(|n| match n {
            Node::Element(e) => {
                if pred(e) {
                    removed += 1;
                    false
                } else {
                    true
                }
            }
            Node::Text(_) => true,
        });
        for child in &mut self.children {
            if let Node::Element(e) = child {
                removed += e.remove_descendants(pred);
            }
        }
        removed
    }
}

#[derive(Clone, Debug, PartialEq)]
/// An in-memory vector-graphics document.
///
/// The engine caches one of these per theme as an immutable template and
/// deep-copies it at the start of every render pass, so per-frame mutations
/// never leak between frames.
pub struct VectorDocument {
    /// Document root element.
    pub root: Element,
}

impl VectorDocument {
    /// Wrap a root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Find any element by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find_by_id(id)
    }

    /// Find any element by id, mutably.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_by_id_mut(id)
    }

    /// Bounds of the root element.
    pub fn bounds(&self) -> Bounds {
        self.root.bounds()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
