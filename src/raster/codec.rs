//! Device pixel format conversion.
//!
//! The display scans vertically, so a finished frame is rotated 270° and
//! flipped horizontally before each pixel is packed into the panel's
//! little-endian 16-bit 5-6-5 color format.

/// Quantize an 8-bit RGB triple into packed 5-6-5, emitted little-endian.
///
/// The scaling is bit-exact with the device protocol: channel values map
/// through `c * levels / 255` integer division and clamp to the field width.
pub fn encode_rgb565(r: u8, g: u8, b: u8) -> [u8; 2] {
    let r5 = (u16::from(r) * 32 / 255).min(31) as u8;
    let g6 = (u16::from(g) * 64 / 255).min(63) as u8;
    let b5 = (u16::from(b) * 32 / 255).min(31) as u8;

    let high = (r5 << 3) | (g6 >> 3);
    let low = (g6 << 5) | b5;
    [low, high]
}

/// Reconstruct an approximate RGB triple from a packed 5-6-5 pair.
///
/// Exact inversion is impossible; each channel is within one quantization
/// step of the encoded value.
pub fn decode_rgb565(low: u8, high: u8) -> (u8, u8, u8) {
    let r5 = u16::from(high >> 3);
    let g6 = u16::from(((high & 0x07) << 3) | (low >> 5));
    let b5 = u16::from(low & 0x1f);

    let r = (r5 * 255 + 15) / 31;
    let g = (g6 * 255 + 31) / 63;
    let b = (b5 * 255 + 15) / 31;
    (r as u8, g as u8, b as u8)
}

/// Rotate a premultiplied RGBA8 raster 270° and flip it horizontally,
/// producing an `height x width` raster in the device's vertical scan order.
///
/// `src` must be exactly `width * height * 4` bytes.
pub fn rotate270_hflip(src: &[u8], width: u32, height: u32) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(src.len(), w * h * 4);

    let mut out = vec![0u8; src.len()];
    // Output dimensions are (height x width); out(u, v) = src(w-1-v, h-1-u).
    for v in 0..w {
        for u in 0..h {
            let sx = w - 1 - v;
            let sy = h - 1 - u;
            let si = (sy * w + sx) * 4;
            let di = (v * h + u) * 4;
            out[di..di + 4].copy_from_slice(&src[si..si + 4]);
        }
    }
    out
}

/// Pack a rendered surface into the device wire format: rotated and flipped
/// to scan order, two bytes per pixel.
pub fn pack_frame(surface: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    let rotated = rotate270_hflip(surface.data(), surface.width(), surface.height());
    let mut out = Vec::with_capacity(rotated.len() / 2);
    for px in rotated.chunks_exact(4) {
        out.extend_from_slice(&encode_rgb565(px[0], px[1], px[2]));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/codec.rs"]
mod tests;
