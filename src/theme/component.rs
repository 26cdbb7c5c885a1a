use crate::document::model::{Element, VectorDocument};
use crate::foundation::error::KeylcdResult;
use crate::theme::properties::PropertyMap;
use crate::theme::redraw::RedrawScheduler;

/// Per-draw state handed to a component.
pub struct DrawContext<'a> {
    /// Target raster surface. Component draws land *under* the rasterized
    /// document, which is composited over afterwards.
    pub surface: &'a mut resvg::tiny_skia::Pixmap,
    /// Property snapshot for this pass.
    pub properties: &'a PropertyMap,
    /// Attribute snapshot for this pass.
    pub attributes: &'a PropertyMap,
    /// Redraw scheduling facility of the owning display surface.
    pub scheduler: &'a RedrawScheduler,
}

/// A long-lived drawable bound to one document element by id.
///
/// Components own whatever layout/animation state persists across render
/// passes (e.g. a menu's scroll offset). They are configured once against
/// exactly one theme and invoked on every pass; on draw they may mutate
/// their bound element's subtree, draw directly to the raster, or both.
pub trait Component {
    /// Id of the template element this component binds to.
    fn id(&self) -> &str;

    /// Called once when the component is registered with a theme. The
    /// cached template document is supplied for layout discovery.
    fn configure(&mut self, document: &VectorDocument) -> KeylcdResult<()>;

    /// Called once per render pass with the matched element from the cloned
    /// document.
    fn draw(&mut self, ctx: &mut DrawContext<'_>, element: &mut Element) -> KeylcdResult<()>;
}
