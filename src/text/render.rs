use std::borrow::Cow;

use crate::foundation::error::{KeylcdError, KeylcdResult};
use crate::foundation::geom::Bounds;
use crate::raster::surface::premul_over_blit;

/// Horizontal alignment of laid-out text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Align lines to the left edge.
    #[default]
    Left,
    /// Center lines.
    Center,
    /// Align lines to the right edge.
    Right,
}

/// Vertical alignment of the first baseline within the bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    /// No vertical offset.
    #[default]
    Top,
    /// Center using the font ascent.
    Center,
    /// Bottom-align using the font ascent.
    Bottom,
}

/// Line wrapping mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Wrap {
    /// Single line, no wrapping.
    #[default]
    None,
    /// Break lines at word boundaries, falling back to characters when a
    /// word exceeds the wrap width.
    WordChar,
}

/// Font slant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Slant {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
    /// Oblique.
    Oblique,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA brush carried through the text layout.
pub struct TextColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

#[derive(Clone, Debug)]
/// Per-draw-call text configuration.
///
/// A font descriptor is synthesized from `family` + `weight` + `slant` +
/// `point_size`; absent fields fall back to a plain sans face at the
/// engine default size.
pub struct TextAttributes {
    /// Text to lay out.
    pub text: String,
    /// Clip/position bounds in device pixels.
    pub bounds: Option<Bounds>,
    /// Wrap mode.
    pub wrap: Wrap,
    /// Horizontal alignment.
    pub align: Align,
    /// Explicit wrap width, overriding the bounds width.
    pub width_px: Option<f64>,
    /// Font family name.
    pub family: Option<String>,
    /// CSS-style numeric weight (400 normal, 700 bold).
    pub weight: Option<u16>,
    /// Font slant.
    pub slant: Slant,
    /// Size in points (device maps points 4:3 to pixels).
    pub point_size: Option<f32>,
    /// Vertical alignment within the bounds height.
    pub valign: VAlign,
    /// Fill color.
    pub color: TextColor,
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            text: String::new(),
            bounds: None,
            wrap: Wrap::None,
            align: Align::Left,
            width_px: None,
            family: None,
            weight: None,
            slant: Slant::Normal,
            point_size: None,
            valign: VAlign::Top,
            color: TextColor {
                r: 0,
                g: 0,
                b: 0,
                a: 255,
            },
        }
    }
}

const DEFAULT_FAMILY: &str = "sans-serif";
const DEFAULT_POINT_SIZE: f32 = 10.0;

/// Measures and draws styled text runs onto a raster surface.
///
/// Owns its shaping and layout contexts; nothing here is process-global.
/// One instance is configured per draw call: [`TextRender::set_attributes`]
/// builds the layout, then [`TextRender::measure`] and [`TextRender::draw`]
/// operate on it.
pub struct TextRender {
    font_cx: parley::FontContext,
    layout_cx: parley::LayoutContext<TextColor>,
    layout: Option<parley::Layout<TextColor>>,
    bounds: Option<Bounds>,
    valign: VAlign,
    ascent: f64,
}

impl Default for TextRender {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRender {
    /// Construct a renderer with fresh font and layout contexts.
    pub fn new() -> Self {
        Self {
            font_cx: parley::FontContext::default(),
            layout_cx: parley::LayoutContext::new(),
            layout: None,
            bounds: None,
            valign: VAlign::Top,
            ascent: 0.0,
        }
    }

    /// Shape and lay out text for the next measure/draw.
    pub fn set_attributes(&mut self, attrs: &TextAttributes) -> KeylcdResult<()> {
        let family = attrs.family.as_deref().unwrap_or(DEFAULT_FAMILY).to_string();
        let point_size = attrs.point_size.unwrap_or(DEFAULT_POINT_SIZE);
        if !point_size.is_finite() || point_size <= 0.0 {
            return Err(KeylcdError::validation(
                "text point size must be finite and > 0",
            ));
        }
        let size_px = point_size * 4.0 / 3.0;

        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, &attrs.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(attrs.weight.unwrap_or(400))),
        ));
        builder.push_default(parley::style::StyleProperty::FontStyle(match attrs.slant {
            Slant::Normal => parley::style::FontStyle::Normal,
            Slant::Italic => parley::style::FontStyle::Italic,
            Slant::Oblique => parley::style::FontStyle::Oblique(None),
        }));
        builder.push_default(parley::style::StyleProperty::Brush(attrs.color));

        let mut layout: parley::Layout<TextColor> = builder.build(&attrs.text);

        let wrap_width = attrs
            .width_px
            .or_else(|| match (attrs.wrap, attrs.bounds) {
                (Wrap::WordChar, Some(b)) => Some(b.w),
                _ => None,
            })
            .map(|w| w as f32);
        layout.break_all_lines(wrap_width);
        if let Some(w) = wrap_width {
            let alignment = match attrs.align {
                Align::Left => parley::Alignment::Start,
                Align::Center => parley::Alignment::Center,
                Align::Right => parley::Alignment::End,
            };
            layout.align(Some(w), alignment, parley::AlignmentOptions::default());
        }

        self.ascent = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().ascent))
            .unwrap_or(0.0);
        self.bounds = attrs.bounds;
        self.valign = attrs.valign;
        self.layout = Some(layout);
        Ok(())
    }

    /// Ink extents of the configured layout, `(x, y, w, h)` in device px.
    pub fn measure(&self) -> (f64, f64, f64, f64) {
        match &self.layout {
            Some(l) => (0.0, 0.0, f64::from(l.width()), f64::from(l.height())),
            None => (0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Draw the configured layout onto `surface`.
    ///
    /// Positions at the bounds origin unless an explicit `x`/`y` is given;
    /// applies the vertical alignment against the font ascent; clips to the
    /// bounds expanded by one pixel on all sides.
    pub fn draw(
        &mut self,
        surface: &mut resvg::tiny_skia::Pixmap,
        x: Option<f64>,
        y: Option<f64>,
    ) -> KeylcdResult<()> {
        let Some(layout) = &self.layout else {
            return Err(KeylcdError::validation("draw without configured text"));
        };

        let (mut ox, mut oy, clip) = match self.bounds {
            Some(b) => {
                let mut oy = y.unwrap_or(b.y);
                match self.valign {
                    VAlign::Top => {}
                    VAlign::Center => oy += (b.h - self.ascent) / 2.0,
                    VAlign::Bottom => oy += b.h - self.ascent,
                }
                (x.unwrap_or(b.x), oy, b.expand(1.0))
            }
            None => {
                let (_, _, w, h) = self.measure();
                let ox = x.unwrap_or(0.0);
                let oy = y.unwrap_or(0.0);
                (ox, oy, Bounds::new(ox, oy, w, h).expand(1.0))
            }
        };

        let clip_w = clip.w.ceil().max(1.0) as u32;
        let clip_h = clip.h.ceil().max(1.0) as u32;
        if clip_w > u32::from(u16::MAX) || clip_h > u32::from(u16::MAX) {
            return Err(KeylcdError::validation("text clip bounds too large"));
        }
        ox -= clip.x;
        oy -= clip.y;

        let mut ctx = vello_cpu::RenderContext::new(clip_w as u16, clip_h as u16);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((ox, oy)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let font = run.run().font();
                let font_data = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.data.as_ref().to_vec()),
                    font.index,
                );
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(clip_w as u16, clip_h as u16);
        ctx.render_to_pixmap(&mut pixmap);
        premul_over_blit(
            surface,
            pixmap.data_as_u8_slice(),
            clip_w,
            clip_h,
            clip.x.floor() as i32,
            clip.y.floor() as i32,
            None,
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/render.rs"]
mod tests;
