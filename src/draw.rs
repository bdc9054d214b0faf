// Software drawing into frame buffers: the pen stroke, the built-in template
// shapes, the target thumbnail and the HUD all go through these helpers.

use crate::types::{CanonicalImage, FrameBuffer};

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Solid disc of `radius` centered at (cx,cy). Radius 0 is a single pixel.
pub fn stamp_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    let r2 = radius * radius;
    for y in -radius..=radius {
        for x in -radius..=radius {
            if x * x + y * y <= r2 {
                put_pixel(fb, cx + x, cy + y, color);
            }
        }
    }
}

/// Pen stroke: discs stamped along every Bresenham step of the segment.
pub fn draw_thick_line(
    fb: &mut FrameBuffer,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    radius: i32,
    color: u32,
) {
    if radius <= 0 {
        draw_line(fb, x0, y0, x1, y1, color);
        return;
    }
    let (mut x, mut y) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp_disc(fb, x, y, radius, color);
        if x == x1 && y == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x += sx; }
        if e2 <= dx { err += dx; y += sy; }
    }
}

/// Connect consecutive points; closes the loop when `closed`.
pub fn draw_polyline(fb: &mut FrameBuffer, pts: &[(i32, i32)], closed: bool, radius: i32, color: u32) {
    for w in pts.windows(2) {
        draw_thick_line(fb, w[0], w[1], radius, color);
    }
    if closed && pts.len() > 2 {
        draw_thick_line(fb, pts[pts.len() - 1], pts[0], radius, color);
    }
}

/// Draw a small crosshair centered at (cx,cy), with a gap in the middle.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/// Copy a canonical image into the frame at (x,y), scaled by an integer factor.
pub fn blit_canonical(fb: &mut FrameBuffer, img: &CanonicalImage, x: i32, y: i32, scale: u32) {
    let n = img.size();
    let s = scale.max(1) as i32;
    for row in 0..n {
        for col in 0..n {
            let color = img.at(col, row) & 0x00FF_FFFF;
            for oy in 0..s {
                for ox in 0..s {
                    put_pixel(fb, x + col as i32 * s + ox, y + row as i32 * s + oy, color);
                }
            }
        }
    }
}

/// One-pixel rectangle outline.
pub fn draw_frame(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    draw_line(fb, x, y, x + w - 1, y, color);
    draw_line(fb, x, y + h - 1, x + w - 1, y + h - 1, color);
    draw_line(fb, x, y, x, y + h - 1, color);
    draw_line(fb, x + w - 1, y, x + w - 1, y + h - 1, color);
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters use the uppercase glyph.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel dark shadow.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0x0040_4040);
                }
            }
        }
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; unknown characters leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 0x00FF_FFFF;
    const K: u32 = 0x0000_0000;

    fn count(fb: &FrameBuffer, color: u32) -> usize {
        fb.pixels.iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn put_pixel_ignores_out_of_bounds() {
        let mut fb = FrameBuffer::filled(4, 4, W);
        put_pixel(&mut fb, -1, 0, K);
        put_pixel(&mut fb, 4, 0, K);
        put_pixel(&mut fb, 0, 4, K);
        assert_eq!(count(&fb, K), 0);
        put_pixel(&mut fb, 3, 3, K);
        assert_eq!(fb.get(3, 3), Some(K));
    }

    #[test]
    fn lines_cover_both_endpoints() {
        let mut fb = FrameBuffer::filled(10, 10, W);
        draw_line(&mut fb, 0, 0, 9, 9, K);
        assert_eq!(count(&fb, K), 10);
        assert_eq!(fb.get(0, 0), Some(K));
        assert_eq!(fb.get(9, 9), Some(K));
    }

    #[test]
    fn thick_line_is_wider_than_thin_line() {
        let mut fb = FrameBuffer::filled(20, 20, W);
        draw_thick_line(&mut fb, (5, 10), (15, 10), 1, K);
        // Radius-1 disc is a plus; along a horizontal run the stroke is 3 rows tall.
        for y in 9..=11 {
            assert_eq!(fb.get(10, y), Some(K));
        }
        assert_eq!(fb.get(10, 12), Some(W));
    }

    #[test]
    fn closed_polyline_joins_last_to_first() {
        let mut fb = FrameBuffer::filled(10, 10, W);
        draw_polyline(&mut fb, &[(1, 1), (8, 1), (8, 8)], true, 0, K);
        // Closing edge runs along the main diagonal.
        assert_eq!(fb.get(4, 4), Some(K));
    }

    #[test]
    fn blit_scales_each_pixel() {
        let img = CanonicalImage::from_argb(2, vec![0xFF00_0000, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFF00_0000])
            .unwrap();
        let mut fb = FrameBuffer::filled(6, 6, 0x0012_3456);
        blit_canonical(&mut fb, &img, 1, 1, 2);
        assert_eq!(fb.get(1, 1), Some(K));
        assert_eq!(fb.get(2, 2), Some(K));
        assert_eq!(fb.get(3, 1), Some(W));
        assert_eq!(fb.get(4, 4), Some(K));
        assert_eq!(fb.get(0, 0), Some(0x0012_3456));
    }

    #[test]
    fn text_renders_known_glyphs_only() {
        let mut fb = FrameBuffer::filled(40, 10, K);
        draw_text_5x7(&mut fb, 0, 0, "~", W);
        assert_eq!(count(&fb, W), 0);
        draw_text_5x7(&mut fb, 0, 0, "hit", W);
        assert!(count(&fb, W) > 0);
    }
}
