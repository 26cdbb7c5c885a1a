use std::time::Duration;

use crate::document::model::{Element, VectorDocument};
use crate::foundation::error::{KeylcdError, KeylcdResult};
use crate::foundation::geom::Bounds;
use crate::raster::surface::{new_surface, premul_over_blit};
use crate::theme::component::{Component, DrawContext};
use crate::theme::properties::PropertyMap;
use crate::theme::scrollbar::ScrollValues;

/// Delay before the follow-up redraw that continues an eased scroll.
const SCROLL_REDRAW_DELAY: Duration = Duration::from_millis(50);

/// Item list backing a [`Menu`].
///
/// Entries are uniform height (the height typically comes from a nested
/// entry sub-theme's root bounds). `paint_entry` draws one entry at the
/// origin of the supplied entry-sized surface; the menu positions, culls
/// and clips it.
pub trait MenuModel {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the model has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the selected entry, if any.
    fn selected(&self) -> Option<usize>;

    /// Paint entry `index` into `surface` (entry-sized, origin top-left).
    fn paint_entry(
        &self,
        surface: &mut resvg::tiny_skia::Pixmap,
        index: usize,
        selected: bool,
        properties: &PropertyMap,
        attributes: &PropertyMap,
    ) -> KeylcdResult<()>;
}

/// Auto-scrolling menu bound to a viewport element.
///
/// The only persistent state is the pixel scroll offset `base`. On each
/// draw the menu derives where the selected entry should sit, eases `base`
/// a bounded step toward that target and, when a step was applied, asks the
/// owning surface for one deferred redraw so the scroll animates without an
/// external animation framework.
pub struct Menu {
    id: String,
    model: Box<dyn MenuModel>,
    entry_height: f64,
    view_bounds: Bounds,
    base: f64,
}

impl Menu {
    /// Create a menu bound to element `id` with uniform `entry_height`.
    pub fn new(id: impl Into<String>, model: Box<dyn MenuModel>, entry_height: f64) -> Self {
        Self {
            id: id.into(),
            model,
            entry_height,
            view_bounds: Bounds::default(),
            base: 0.0,
        }
    }

    /// Current scroll offset in pixels.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Backing model.
    pub fn model(&self) -> &dyn MenuModel {
        self.model.as_ref()
    }

    /// Replace the backing model, keeping scroll state.
    pub fn set_model(&mut self, model: Box<dyn MenuModel>) {
        self.model = model;
    }

    /// `(max, view_size, position)` for wiring a
    /// [`crate::Scrollbar`] to this menu.
    pub fn scroll_values(&self) -> ScrollValues {
        (
            self.model.len() as f64 * self.entry_height,
            self.view_bounds.h,
            self.base,
        )
    }

    /// Scroll target that makes the selected entry just visible, or the
    /// current base when no adjustment is needed.
    fn target_base(&self) -> f64 {
        let Some(selected) = self.model.selected() else {
            return self.base;
        };
        let ih = self.entry_height;
        let selected_y = selected as f64 * ih;
        let v_space = self.view_bounds.h;

        if selected_y >= self.base + v_space - ih {
            // Clipped below the fold: bottom-align it.
            (selected_y + ih) - v_space
        } else if selected_y < self.base {
            // Above the viewport: top-align it.
            selected_y
        } else {
            self.base
        }
    }
}

impl Component for Menu {
    fn id(&self) -> &str {
        &self.id
    }

    fn configure(&mut self, document: &VectorDocument) -> KeylcdResult<()> {
        self.view_bounds = document.root.absolute_bounds(&self.id).ok_or_else(|| {
            KeylcdError::validation(format!(
                "no element with id '{}'; required by the menu component",
                self.id
            ))
        })?;
        Ok(())
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, _element: &mut Element) -> KeylcdResult<()> {
        let target = self.target_base();
        if target != self.base {
            let step = ((target - self.base).abs() / 10.0).max(1.0);
            self.base = if target < self.base {
                (self.base - step).max(target)
            } else {
                (self.base + step).min(target)
            };
            ctx.scheduler.request(SCROLL_REDRAW_DELAY);
        }

        let ih = self.entry_height;
        if ih <= 0.0 || self.view_bounds.w <= 0.0 {
            return Ok(());
        }

        let mut entry = new_surface(self.view_bounds.w.ceil() as u32, ih.ceil() as u32)?;
        for index in 0..self.model.len() {
            // Position relative to the viewport top; entries fully outside
            // are culled but still advance the stacking cursor.
            let y = index as f64 * ih - self.base;
            if y < -ih || y > self.view_bounds.h + ih {
                continue;
            }
            entry.data_mut().fill(0);
            self.model.paint_entry(
                &mut entry,
                index,
                self.model.selected() == Some(index),
                ctx.properties,
                ctx.attributes,
            )?;
            premul_over_blit(
                ctx.surface,
                entry.data(),
                entry.width(),
                entry.height(),
                self.view_bounds.x.round() as i32,
                (self.view_bounds.y + y).round() as i32,
                Some(self.view_bounds),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/menu.rs"]
mod tests;
