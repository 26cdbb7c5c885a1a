//! Theme engine: template loading and the per-frame render pass.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, error, warn};

use crate::document::css::{format_style, parse_style};
use crate::document::model::{Element, Node, VectorDocument};
use crate::document::parse::parse_document;
use crate::document::write::write_document;
use crate::driver::control::{ControlHint, ControlSet};
use crate::driver::daemon::{LCD_HEIGHT, LCD_WIDTH};
use crate::foundation::error::{KeylcdError, KeylcdResult};
use crate::foundation::geom::Bounds;
use crate::raster::surface::{new_surface, png_data_uri, premul_over_blit};
use crate::text::render::{
    Align, Slant, TextAttributes, TextColor, TextRender, VAlign, Wrap,
};
use crate::theme::component::{Component, DrawContext};
use crate::theme::properties::{PropertyMap, PropertyValue, escape_xml, substitute};
use crate::theme::redraw::RedrawScheduler;
use crate::theme::resources::resolve_variant_path;
use crate::theme::script::{DocumentProcessor, ThemeScript};
use crate::theme::textbox::{TextBox, extract_text_boxes};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Handle to an off-screen window reservation made with
/// [`Theme::reserve_window`].
pub struct WindowHandle(usize);

struct Window {
    id: String,
    bounds: Bounds,
    surface: Option<resvg::tiny_skia::Pixmap>,
}

/// Result of one render pass.
pub struct RenderOutput {
    /// The finished raster, component draws underneath the rasterized
    /// document, text boxes and hooks on top.
    pub surface: resvg::tiny_skia::Pixmap,
    /// The mutated document as it stood before placeholder substitution.
    /// Useful for diagnostics and assertions on structural mutation.
    pub document: VectorDocument,
}

/// A loaded theme: an immutable template document plus the mutable state
/// that drives each render pass.
///
/// The template is cached behind an [`Arc`] and deep-copied at the start of
/// every pass, so per-frame mutation never leaks between frames. Registered
/// [`Component`]s, the optional [`ThemeScript`] and document processor, the
/// control set and any reserved windows all persist across passes.
///
/// A theme is single-threaded by contract: [`Theme::render`] takes `&mut
/// self` and must not be called concurrently.
pub struct Theme {
    template: Arc<VectorDocument>,
    size: (u32, u32),
    components: Vec<Box<dyn Component>>,
    script: Option<Box<dyn ThemeScript>>,
    processor: Option<DocumentProcessor>,
    windows: Vec<Window>,
    controls: ControlSet,
    scheduler: Arc<RedrawScheduler>,
    text_render: TextRender,
}

impl Theme {
    /// Load a theme template for a device model and optional variant from
    /// `dir`, resolving `<model>[-variant].svg` with a `default` fallback.
    /// A missing template is fatal.
    pub fn load(
        dir: &Path,
        model: &str,
        variant: Option<&str>,
        controls: ControlSet,
    ) -> KeylcdResult<Self> {
        let path = resolve_variant_path(dir, "", model, variant, "svg", true)?
            .ok_or_else(|| KeylcdError::resource("template resolution returned no path"))?;
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read theme template '{}'", path.display()))?;
        debug!(path = %path.display(), "loaded theme template");
        Self::from_template(&text, controls)
    }

    /// Build a theme from template text directly.
    pub fn from_template(text: &str, controls: ControlSet) -> KeylcdResult<Self> {
        let template = parse_document(text)?;
        let size = (
            dimension_attr(&template.root, "width").unwrap_or(LCD_WIDTH),
            dimension_attr(&template.root, "height").unwrap_or(LCD_HEIGHT),
        );
        Ok(Self {
            template: Arc::new(template),
            size,
            components: Vec::new(),
            script: None,
            processor: None,
            windows: Vec::new(),
            controls,
            scheduler: Arc::new(RedrawScheduler::new()),
            text_render: TextRender::new(),
        })
    }

    /// Raster size of the template in device pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// The cached template document.
    pub fn template(&self) -> &VectorDocument {
        &self.template
    }

    /// The redraw scheduler shared with components.
    pub fn scheduler(&self) -> &Arc<RedrawScheduler> {
        &self.scheduler
    }

    /// Control set consulted for default foreground/background fills.
    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    /// Mutable control set.
    pub fn controls_mut(&mut self) -> &mut ControlSet {
        &mut self.controls
    }

    /// Attach the theme script invoked by the hook steps of the render pass.
    pub fn set_script(&mut self, script: Box<dyn ThemeScript>) {
        self.script = Some(script);
    }

    /// Attach an external document processor, run before the script's
    /// document hook on every pass.
    pub fn set_document_processor(&mut self, processor: DocumentProcessor) {
        self.processor = Some(processor);
    }

    /// Register a component, configuring it against the cached template.
    /// Components draw in registration order.
    pub fn add_component(&mut self, mut component: Box<dyn Component>) -> KeylcdResult<()> {
        component.configure(&self.template)?;
        self.components.push(component);
        Ok(())
    }

    /// Reserve the element with the given id as an off-screen window slot.
    ///
    /// The element's absolute bounds are recorded from the template and the
    /// element itself is excluded from rasterization; a sub-surface set via
    /// [`Theme::set_window_surface`] composites at those bounds each pass.
    pub fn reserve_window(&mut self, id: &str) -> KeylcdResult<WindowHandle> {
        let bounds = self
            .template
            .root
            .absolute_bounds(id)
            .ok_or_else(|| {
                KeylcdError::validation(format!("no element '{id}' to reserve as a window"))
            })?;
        self.windows.push(Window {
            id: id.to_string(),
            bounds,
            surface: None,
        });
        Ok(WindowHandle(self.windows.len() - 1))
    }

    /// Recorded bounds of a reserved window.
    pub fn window_bounds(&self, handle: WindowHandle) -> Option<Bounds> {
        self.windows.get(handle.0).map(|w| w.bounds)
    }

    /// Set (or clear) the sub-surface composited at a reserved window's
    /// bounds on subsequent passes.
    pub fn set_window_surface(
        &mut self,
        handle: WindowHandle,
        surface: Option<resvg::tiny_skia::Pixmap>,
    ) -> KeylcdResult<()> {
        let window = self
            .windows
            .get_mut(handle.0)
            .ok_or_else(|| KeylcdError::validation("stale window handle"))?;
        window.surface = surface;
        Ok(())
    }

    /// Run one render pass.
    ///
    /// `properties` drive conditional pruning, progress widths, embedded
    /// images, text boxes and `${key}` substitution; `attributes` are opaque
    /// per-pass state handed through to components and script hooks.
    ///
    /// Hook and structural failures are logged and isolated; the pass always
    /// produces a raster, partial if rasterization itself failed.
    #[tracing::instrument(skip_all)]
    pub fn render(
        &mut self,
        properties: &PropertyMap,
        attributes: &PropertyMap,
    ) -> KeylcdResult<RenderOutput> {
        // Step 1: fresh copy of the immutable template.
        let mut document = (*self.template).clone();
        let mut surface = new_surface(self.size.0, self.size.1)?;

        for window in &self.windows {
            let id = window.id.clone();
            document
                .root
                .remove_descendants(&|e| e.id() == Some(id.as_str()));
        }

        // Step 2: background hook, under everything else.
        if let Some(script) = &mut self.script
            && let Err(e) = script.paint_background(&mut surface, properties, attributes)
        {
            error!(error = %e, "paint_background hook failed");
        }

        // Step 3: conditional pruning from `del <flag>` directives.
        prune_conditionals(&mut document.root, properties);

        // Step 4: component draws, under the rasterized document.
        for component in &mut self.components {
            let Some(element) = document.root.find_by_id_mut(component.id()) else {
                warn!(id = component.id(), "component element missing; skipped");
                continue;
            };
            let mut ctx = DrawContext {
                surface: &mut surface,
                properties,
                attributes,
                scheduler: &self.scheduler,
            };
            if let Err(e) = component.draw(&mut ctx, element) {
                warn!(id = component.id(), error = %e, "component draw failed");
            }
        }

        // Step 5: progress bar widths.
        apply_progress(&mut document.root, properties);

        // Step 6: embedded raster properties.
        apply_embedded_images(&mut document.root, properties);

        // Step 7: shadow duplicates, filled with the background color.
        let shadow_fill = self
            .controls
            .for_hint(ControlHint::BACKGROUND)
            .and_then(|c| c.value.as_hex_rgb())
            .unwrap_or_else(|| "#000000".to_string());
        apply_shadows(&mut document.root, &shadow_fill);

        // Step 8: pull text boxes out for the overdraw pass.
        let text_boxes = extract_text_boxes(&mut document, properties);

        // Step 9: external processor, then the script's document hook.
        if let Some(processor) = &mut self.processor
            && let Err(e) = processor(&mut document, properties, attributes)
        {
            error!(error = %e, "document processor failed");
        }
        let mut process_result = None;
        if let Some(script) = &mut self.script {
            match script.process_document(&mut document, properties, attributes) {
                Ok(result) => process_result = result,
                Err(e) => error!(error = %e, "process_document hook failed"),
            }
        }

        // Step 10: default foreground fill on the root; descendants still
        // override locally.
        if let Some(fg) = self
            .controls
            .for_hint(ControlHint::FOREGROUND)
            .and_then(|c| c.value.as_hex_rgb())
        {
            let mut style = parse_style(document.root.attr("style").unwrap_or(""));
            style.insert("fill".to_string(), fg);
            document.root.set_attr("style", format_style(&style));
        }

        // Step 11: escape property values and substitute placeholders in the
        // serialized text. Unresolved placeholders pass through verbatim.
        let mut values = std::collections::BTreeMap::new();
        for (key, value) in properties {
            if let Some(text) = value.display_string() {
                values.insert(key.clone(), escape_xml(&text));
            }
        }
        let svg_text = substitute(&write_document(&document), &values);

        // Step 12: rasterize. Failures keep whatever partial raster exists.
        match usvg::Tree::from_str(&svg_text, &usvg::Options::default()) {
            Ok(tree) => resvg::render(
                &tree,
                resvg::tiny_skia::Transform::identity(),
                &mut surface.as_mut(),
            ),
            Err(e) => {
                error!(error = %e, document = %svg_text, "substituted template failed to parse");
            }
        }

        // Step 13: overdraw text boxes in extraction order.
        for text_box in &text_boxes {
            self.draw_text_box(&mut surface, text_box);
        }

        // Step 14: composite reserved window sub-surfaces.
        for window in &self.windows {
            if let Some(sub) = &window.surface {
                premul_over_blit(
                    &mut surface,
                    sub.data(),
                    sub.width(),
                    sub.height(),
                    window.bounds.x.floor() as i32,
                    window.bounds.y.floor() as i32,
                    Some(window.bounds),
                );
            }
        }

        // Step 15: foreground hook, over everything else.
        if let Some(script) = &mut self.script
            && let Err(e) =
                script.paint_foreground(&mut surface, properties, attributes, process_result.as_deref())
        {
            error!(error = %e, "paint_foreground hook failed");
        }

        // Step 16: raster plus the mutated (pre-substitution) snapshot.
        Ok(RenderOutput { surface, document })
    }

    fn draw_text_box(&mut self, surface: &mut resvg::tiny_skia::Pixmap, text_box: &TextBox) {
        let style = &text_box.style;
        let foreground = self
            .controls
            .for_hint(ControlHint::FOREGROUND)
            .and_then(|c| c.value.color())
            .unwrap_or((255, 255, 255));

        let color = style
            .get("fill")
            .and_then(|v| parse_hex_color(v))
            .unwrap_or(foreground);
        let attrs = TextAttributes {
            text: text_box.text.clone(),
            bounds: Some(text_box.bounds),
            wrap: Wrap::WordChar,
            align: match style.get("text-align").map(String::as_str) {
                Some("center") => Align::Center,
                Some("right") | Some("end") => Align::Right,
                _ => Align::Left,
            },
            width_px: None,
            family: style.get("font-family").map(|f| f.trim_matches('\'').to_string()),
            weight: style.get("font-weight").and_then(|w| match w.as_str() {
                "bold" => Some(700),
                "normal" => Some(400),
                other => other.parse().ok(),
            }),
            slant: match style.get("font-style").map(String::as_str) {
                Some("italic") => Slant::Italic,
                Some("oblique") => Slant::Oblique,
                _ => Slant::Normal,
            },
            point_size: style.get("font-size").and_then(|s| parse_size_points(s)),
            valign: VAlign::Center,
            color: TextColor {
                r: color.0,
                g: color.1,
                b: color.2,
                a: 255,
            },
        };

        if let Err(e) = self.text_render.set_attributes(&attrs) {
            warn!(error = %e, "text box layout failed; skipped");
            return;
        }
        if let Err(e) = self.text_render.draw(surface, None, None) {
            warn!(error = %e, "text box draw failed");
        }
    }
}

/// Remove elements whose `title` carries a `del <flag>` or `del !<flag>`
/// directive and the named property is truthy (resp. falsy). A missing
/// property is falsy.
fn prune_conditionals(root: &mut Element, properties: &PropertyMap) {
    root.remove_descendants(&|e| {
        let Some(directive) = e.attr("title").and_then(|t| t.strip_prefix("del ")) else {
            return false;
        };
        let (flag, negate) = match directive.trim().strip_prefix('!') {
            Some(flag) => (flag, true),
            None => (directive.trim(), false),
        };
        let truthy = properties.get(flag).map(PropertyValue::truthy).unwrap_or(false);
        truthy != negate
    });
}

/// Rescale `width` on `progress` elements to `orig/100 * clamp(value, 0.1,
/// 100)`, reading `value` from the property named by the id minus its
/// `_progress` suffix.
fn apply_progress(root: &mut Element, properties: &PropertyMap) {
    root.for_each_mut(&mut |e| {
        if !e.has_class("progress") {
            return;
        }
        let Some(name) = e.id().and_then(|id| id.strip_suffix("_progress")) else {
            warn!(id = e.id(), "progress element id lacks _progress suffix; skipped");
            return;
        };
        let value = properties
            .get(name)
            .and_then(PropertyValue::as_f64)
            .unwrap_or(0.0)
            .clamp(0.1, 100.0);
        let width = e.geom_attr("width") / 100.0 * value;
        e.set_attr("width", fmt_num(width));
    });
}

/// Set the `href` of `embedded_image` elements from the property named by
/// their `title`: surfaces are PNG-encoded into a `data:` URI, byte and text
/// payloads pass through verbatim.
fn apply_embedded_images(root: &mut Element, properties: &PropertyMap) {
    root.for_each_mut(&mut |e| {
        if !e.has_class("embedded_image") {
            return;
        }
        let Some(name) = e.attr("title").map(str::to_string) else {
            warn!(id = e.id(), "embedded_image element without title; skipped");
            return;
        };
        let href = match properties.get(&name) {
            Some(PropertyValue::Surface(pixmap)) => match png_data_uri(pixmap) {
                Ok(uri) => uri,
                Err(e) => {
                    warn!(property = name, error = %e, "embedded image encode failed");
                    return;
                }
            },
            Some(PropertyValue::Bytes(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
            Some(PropertyValue::Text(text)) => text.clone(),
            Some(_) | None => return,
        };
        set_href(e, href);
    });
}

fn set_href(element: &mut Element, value: String) {
    if let Some(slot) = element
        .attrs
        .iter_mut()
        .find(|(n, _)| n == "href" || n.ends_with(":href"))
    {
        slot.1 = value;
    } else {
        element.attrs.push(("xlink:href".to_string(), value));
    }
}

/// Insert 8 offset duplicates before every `shadow` element, ids suffixed
/// `_1`..`_8`, descendant x/y shifted with the offset, fill forced to the
/// background color. The original stays last so it renders on top.
fn apply_shadows(el: &mut Element, fill: &str) {
    let mut i = 0;
    while i < el.children.len() {
        let shadow = match &el.children[i] {
            Node::Element(e) if e.has_class("shadow") => {
                e.id().map(|id| (id.to_string(), e.clone()))
            }
            _ => None,
        };
        match shadow {
            Some((id, original)) => {
                let mut duplicates = Vec::with_capacity(8);
                let mut n = 0;
                for dy in -1i32..=1 {
                    for dx in -1i32..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        n += 1;
                        let mut dup = original.clone();
                        dup.set_attr("id", format!("{id}_{n}"));
                        dup.for_each_mut(&mut |d| {
                            if d.attr("x").is_some() {
                                d.set_attr("x", fmt_num(d.geom_attr("x") + f64::from(dx)));
                            }
                            if d.attr("y").is_some() {
                                d.set_attr("y", fmt_num(d.geom_attr("y") + f64::from(dy)));
                            }
                            let mut style = parse_style(d.attr("style").unwrap_or(""));
                            style.insert("fill".to_string(), fill.to_string());
                            d.set_attr("style", format_style(&style));
                        });
                        duplicates.push(Node::Element(dup));
                    }
                }
                el.children.splice(i..i, duplicates);
                i += 9; // past the 8 duplicates and the original
            }
            None => {
                if let Node::Element(e) = &mut el.children[i] {
                    apply_shadows(e, fill);
                }
                i += 1;
            }
        }
    }
}

/// Format a geometry value the way templates write them: integral values
/// without a fractional part.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn dimension_attr(el: &Element, name: &str) -> Option<u32> {
    let raw = el.attr(name)?;
    let trimmed = raw.trim().trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let value: f64 = trimmed.trim().parse().ok()?;
    (value > 0.0).then_some(value as u32)
}

fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut it = hex.chars().filter_map(|c| c.to_digit(16));
            let (r, g, b) = (it.next()?, it.next()?, it.next()?);
            Some(((r * 17) as u8, (g * 17) as u8, (b * 17) as u8))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse a CSS font-size as points; bare numbers and `pt` values are points,
/// `px` values are converted at 3:4.
fn parse_size_points(value: &str) -> Option<f32> {
    let s = value.trim();
    if let Some(px) = s.strip_suffix("px") {
        return px.trim().parse::<f32>().ok().map(|v| v * 0.75);
    }
    let s = s.strip_suffix("pt").unwrap_or(s);
    s.trim().parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/theme/engine.rs"]
mod tests;
