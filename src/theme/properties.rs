use std::collections::BTreeMap;

/// External state fed into a render pass, keyed by template identifier.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

#[derive(Clone, Debug)]
/// One property value supplied by the application per frame.
pub enum PropertyValue {
    /// Text value, substituted into `${key}` placeholders.
    Text(String),
    /// Numeric value (progress percentages and the like).
    Num(f64),
    /// Boolean flag used by `del`/`del !` conditional directives.
    Bool(bool),
    /// Raster surface, PNG-encoded on demand for `embedded_image` elements.
    Surface(resvg::tiny_skia::Pixmap),
    /// Pre-encoded image payload passed through to `href` verbatim.
    Bytes(Vec<u8>),
}

impl PropertyValue {
    /// Truthiness used by conditional pruning: empty strings, `false` and
    /// zero are falsy; surfaces and byte payloads are always truthy.
    pub fn truthy(&self) -> bool {
        match self {
            PropertyValue::Text(s) => !s.is_empty(),
            PropertyValue::Num(n) => *n != 0.0,
            PropertyValue::Bool(b) => *b,
            PropertyValue::Surface(_) | PropertyValue::Bytes(_) => true,
        }
    }

    /// Numeric interpretation, parsing text values when possible.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Num(n) => Some(*n),
            PropertyValue::Text(s) => s.trim().parse().ok(),
            PropertyValue::Bool(_) | PropertyValue::Surface(_) | PropertyValue::Bytes(_) => None,
        }
    }

    /// Textual form used for placeholder substitution. Surfaces and raw
    /// bytes have no textual form.
    pub fn display_string(&self) -> Option<String> {
        match self {
            PropertyValue::Text(s) => Some(s.clone()),
            PropertyValue::Num(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            PropertyValue::Bool(b) => Some(b.to_string()),
            PropertyValue::Surface(_) | PropertyValue::Bytes(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Num(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

/// Escape `&`, `<` and `>` for embedding a value in XML text.
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Substitute `${key}` placeholders from `values`.
///
/// Safe-substitute semantics: placeholders with no matching key, and any
/// stray `$` that does not open a placeholder, pass through verbatim.
pub fn substitute(text: &str, values: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if is_identifier(&after[..end]) => {
                let key = &after[..end];
                match values.get(key) {
                    Some(v) => out.push_str(v),
                    None => {
                        out.push_str("${");
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "../../tests/unit/theme/properties.rs"]
mod tests;
