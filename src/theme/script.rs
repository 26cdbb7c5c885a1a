use std::any::Any;

use crate::document::model::VectorDocument;
use crate::theme::properties::PropertyMap;

/// External document-processor hook invoked between component mutation and
/// rasterization. Failures are logged and isolated by the engine.
pub type DocumentProcessor =
    Box<dyn FnMut(&mut VectorDocument, &PropertyMap, &PropertyMap) -> anyhow::Result<()>>;

/// Optional per-theme script capability interface.
///
/// Every method is independently optional: the defaults are no-ops, so a
/// script implements only the hooks it needs. A hook returning an error is
/// logged by the engine and rendering continues with whatever prior state
/// exists; hooks can never abort a render pass.
pub trait ThemeScript {
    /// Draw under the rasterized document, before any mutation.
    fn paint_background(
        &mut self,
        _surface: &mut resvg::tiny_skia::Pixmap,
        _properties: &PropertyMap,
        _attributes: &PropertyMap,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// Mutate the cloned document before substitution and rasterization.
    ///
    /// The returned value, if any, is handed back to
    /// [`ThemeScript::paint_foreground`] at the end of the same pass.
    fn process_document(
        &mut self,
        _document: &mut VectorDocument,
        _properties: &PropertyMap,
        _attributes: &PropertyMap,
    ) -> anyhow::Result<Option<Box<dyn Any>>> {
        Ok(None)
    }

    /// Draw over the finished raster.
    fn paint_foreground(
        &mut self,
        _surface: &mut resvg::tiny_skia::Pixmap,
        _properties: &PropertyMap,
        _attributes: &PropertyMap,
        _process_result: Option<&(dyn Any)>,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}
