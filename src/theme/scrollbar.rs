use tracing::warn;

use crate::document::model::{Element, VectorDocument};
use crate::foundation::error::KeylcdResult;
use crate::theme::component::{Component, DrawContext};
use crate::theme::properties::PropertyMap;

/// `(max, view_size, position)` triple describing scrollable content.
pub type ScrollValues = (f64, f64, f64);

/// Proportional scrollbar bound to a template element.
///
/// Owns no state: every draw recomputes the knob geometry from the values
/// callback. The bound element must contain one descendant of class `knob`
/// and one of class `track`; the knob is repositioned and resized so that
/// `knob.height = track.height / (max / view_size)`.
pub struct Scrollbar {
    id: String,
    values: Box<dyn Fn(&PropertyMap, &PropertyMap) -> ScrollValues>,
}

impl Scrollbar {
    /// Create a scrollbar bound to element `id`, deriving its geometry from
    /// `values` on every draw.
    pub fn new(
        id: impl Into<String>,
        values: impl Fn(&PropertyMap, &PropertyMap) -> ScrollValues + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            values: Box::new(values),
        }
    }
}

impl Component for Scrollbar {
    fn id(&self) -> &str {
        &self.id
    }

    fn configure(&mut self, _document: &VectorDocument) -> KeylcdResult<()> {
        Ok(())
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, element: &mut Element) -> KeylcdResult<()> {
        let (max, view_size, position) = (self.values)(ctx.properties, ctx.attributes);
        if max <= 0.0 || view_size <= 0.0 {
            return Ok(());
        }
        let scale = max / view_size;

        let Some(track_bounds) = element
            .find(&|e| e.has_class("track"))
            .map(|track| track.bounds())
        else {
            warn!(id = %self.id, "scrollbar has no track element");
            return Ok(());
        };
        let Some(knob) = element.find_mut(&|e| e.has_class("knob")) else {
            warn!(id = %self.id, "scrollbar has no knob element");
            return Ok(());
        };

        let knob_y = knob.geom_attr("y");
        knob.set_attr("y", ((knob_y + position / scale) as i64).to_string());
        knob.set_attr("height", ((track_bounds.h / scale) as i64).to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/scrollbar.rs"]
mod tests;
