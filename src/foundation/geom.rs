use kurbo::Affine;

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis-aligned rectangle in device pixels.
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Bounds {
    /// Construct bounds from components.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Bounds grown by `px` on every side.
    pub fn expand(self, px: f64) -> Self {
        Self {
            x: self.x - px,
            y: self.y - px,
            w: self.w + 2.0 * px,
            h: self.h + 2.0 * px,
        }
    }
}

/// Parse an SVG `transform` attribute into an affine matrix.
///
/// Supports the subset theme templates actually use: `matrix(a,b,c,d,e,f)`,
/// `translate(tx[,ty])` and `scale(sx[,sy])`, in left-to-right application
/// order. Unrecognized functions are skipped.
pub fn parse_transform(value: &str) -> Affine {
    let mut out = Affine::IDENTITY;
    for func in value.split(')') {
        let func = func.trim().trim_start_matches(',').trim();
        if func.is_empty() {
            continue;
        }
        let Some((name, args)) = func.split_once('(') else {
            continue;
        };
        let nums: Vec<f64> = args
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        let m = match (name.trim(), nums.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Affine::new([*a, *b, *c, *d, *e, *f]),
            ("translate", [tx]) => Affine::translate((*tx, 0.0)),
            ("translate", [tx, ty]) => Affine::translate((*tx, *ty)),
            ("scale", [s]) => Affine::scale(*s),
            ("scale", [sx, sy]) => Affine::scale_non_uniform(*sx, *sy),
            _ => continue,
        };
        out *= m;
    }
    out
}

/// Translation components of an affine matrix.
pub fn translation_of(t: Affine) -> (f64, f64) {
    let [_, _, _, _, e, f] = t.as_coeffs();
    (e, f)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geom.rs"]
mod tests;
