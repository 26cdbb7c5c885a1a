use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{KeylcdError, KeylcdResult};
use crate::foundation::geom::Bounds;

/// Allocate a transparent premultiplied-RGBA8 surface.
pub fn new_surface(width: u32, height: u32) -> KeylcdResult<resvg::tiny_skia::Pixmap> {
    resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| KeylcdError::validation(format!("invalid surface size {width}x{height}")))
}

/// Composite a premultiplied RGBA8 buffer over a surface at `(dx, dy)`.
///
/// Pixels falling outside the destination, or outside `clip` when given,
/// are discarded. Source and destination never alias.
pub fn premul_over_blit(
    dst: &mut resvg::tiny_skia::Pixmap,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    dx: i32,
    dy: i32,
    clip: Option<Bounds>,
) {
    let dst_w = dst.width() as i32;
    let dst_h = dst.height() as i32;
    let data = dst.data_mut();

    let (clip_x0, clip_y0, clip_x1, clip_y1) = match clip {
        Some(c) => (
            c.x.floor() as i32,
            c.y.floor() as i32,
            (c.x + c.w).ceil() as i32,
            (c.y + c.h).ceil() as i32,
        ),
        None => (0, 0, dst_w, dst_h),
    };

    for sy in 0..src_h as i32 {
        let ty = dy + sy;
        if ty < 0 || ty >= dst_h || ty < clip_y0 || ty >= clip_y1 {
            continue;
        }
        for sx in 0..src_w as i32 {
            let tx = dx + sx;
            if tx < 0 || tx >= dst_w || tx < clip_x0 || tx >= clip_x1 {
                continue;
            }
            let si = ((sy as usize) * (src_w as usize) + sx as usize) * 4;
            let di = ((ty as usize) * (dst_w as usize) + tx as usize) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            let d = [data[di], data[di + 1], data[di + 2], data[di + 3]];
            let out = premul_over_px(d, s);
            data[di..di + 4].copy_from_slice(&out);
        }
    }
}

fn premul_over_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as u16;
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        out[c] = src[c].saturating_add(mul_div255_u8(u16::from(dst[c]), inv));
    }
    out
}

fn mul_div255_u8(x: u16, y: u16) -> u8 {
    ((x * y + 127) / 255) as u8
}

/// Encode a surface as a PNG `data:` URI for `embedded_image` elements.
pub fn png_data_uri(surface: &resvg::tiny_skia::Pixmap) -> KeylcdResult<String> {
    let (w, h) = (surface.width(), surface.height());
    let mut rgba = surface.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);

    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| KeylcdError::validation("surface buffer length mismatch"))?;
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("encode embedded image png")?;

    let mut uri = String::from("data:image/png;base64,");
    uri.push_str(&base64::engine::general_purpose::STANDARD.encode(&bytes));
    Ok(uri)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
