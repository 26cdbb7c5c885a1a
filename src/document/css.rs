use std::collections::BTreeMap;

use tracing::warn;

/// Base pixel size used when converting CSS sizes to `em` units.
const BASE_PX: f64 = 18.0;

/// Parse a CSS-like `style` attribute into a property map.
///
/// Entries without a `:` separator are logged and skipped.
pub fn parse_style(style: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for decl in style.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }
        match decl.split_once(':') {
            Some((name, value)) => {
                out.insert(name.trim().to_string(), value.trim().to_string());
            }
            None => warn!(declaration = decl, "malformed style declaration"),
        }
    }
    out
}

/// Format a style map back into a `style` attribute value.
pub fn format_style(style: &BTreeMap<String, String>) -> String {
    let mut buf = String::new();
    for (name, value) in style {
        buf.push_str(name);
        buf.push(':');
        buf.push_str(value);
        buf.push(';');
    }
    buf
}

/// Convert a CSS font size (`px`, `pt`, `%` or `em`) to `em` units.
///
/// Returns `None` for units the theme format does not use.
pub fn size_to_em(css_size: &str) -> Option<f64> {
    let s = css_size.trim();
    if let Some(px) = s.strip_suffix("px") {
        return px.trim().parse::<f64>().ok().map(|px| px / BASE_PX);
    }
    if let Some(pt) = s.strip_suffix("pt") {
        return pt
            .trim()
            .parse::<f64>()
            .ok()
            .map(|pt| (pt * 96.0 / 72.0) / BASE_PX);
    }
    if let Some(pct) = s.strip_suffix('%') {
        return pct.trim().parse::<f64>().ok().map(|p| p / 100.0);
    }
    if let Some(em) = s.strip_suffix("em") {
        return em.trim().parse::<f64>().ok();
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/document/css.rs"]
mod tests;
