use super::*;

#[test]
fn pure_colors_pack_to_known_bytes() {
    // Red occupies the top five bits of the high byte.
    assert_eq!(encode_rgb565(255, 0, 0), [0x00, 0xF8]);
    assert_eq!(encode_rgb565(0, 255, 0), [0xE0, 0x07]);
    assert_eq!(encode_rgb565(0, 0, 255), [0x1F, 0x00]);
    assert_eq!(encode_rgb565(0, 0, 0), [0x00, 0x00]);
    assert_eq!(encode_rgb565(255, 255, 255), [0xFF, 0xFF]);
}

#[test]
fn encoding_is_deterministic() {
    assert_eq!(encode_rgb565(17, 130, 211), encode_rgb565(17, 130, 211));
}

#[test]
fn round_trip_stays_within_quantization_error() {
    for &(r, g, b) in &[
        (0u8, 0u8, 0u8),
        (255, 255, 255),
        (10, 20, 30),
        (127, 128, 129),
        (200, 100, 50),
        (31, 63, 31),
    ] {
        let [low, high] = encode_rgb565(r, g, b);
        let (dr, dg, db) = decode_rgb565(low, high);
        assert!(i16::from(dr).abs_diff(i16::from(r)) <= 8, "r {r} -> {dr}");
        assert!(i16::from(dg).abs_diff(i16::from(g)) <= 4, "g {g} -> {dg}");
        assert!(i16::from(db).abs_diff(i16::from(b)) <= 8, "b {b} -> {db}");
    }
}

#[test]
fn rotation_maps_corners_to_scan_order() {
    // 2x3 raster, each pixel tagged with its (x, y).
    let (w, h) = (2u32, 3u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    for y in 0..h {
        for x in 0..w {
            let i = ((y * w + x) * 4) as usize;
            src[i] = x as u8;
            src[i + 1] = y as u8;
            src[i + 3] = 255;
        }
    }

    let out = rotate270_hflip(&src, w, h);
    assert_eq!(out.len(), src.len());

    // out(u, v) = src(w-1-v, h-1-u); output rows are v in 0..w, h px wide.
    for v in 0..w as usize {
        for u in 0..h as usize {
            let di = (v * h as usize + u) * 4;
            let expected_x = (w as usize - 1 - v) as u8;
            let expected_y = (h as usize - 1 - u) as u8;
            assert_eq!(out[di], expected_x, "u={u} v={v}");
            assert_eq!(out[di + 1], expected_y, "u={u} v={v}");
        }
    }
}

#[test]
fn pack_frame_is_two_bytes_per_pixel() {
    let surface = crate::raster::surface::new_surface(4, 2).unwrap();
    assert_eq!(pack_frame(&surface).len(), 4 * 2 * 2);
}

#[test]
fn pack_frame_encodes_solid_fills() {
    let mut surface = crate::raster::surface::new_surface(2, 2).unwrap();
    surface.fill(resvg::tiny_skia::Color::from_rgba8(255, 0, 0, 255));
    let packed = pack_frame(&surface);
    for px in packed.chunks_exact(2) {
        assert_eq!(px, [0x00, 0xF8]);
    }
}
