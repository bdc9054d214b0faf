// Packing helpers for the two pixel layouts we juggle:
//   frames:          0x00RRGGBB (what minifb shows)
//   canonical image: 0xAARRGGBB (alpha, red, green, blue)

use image::{GrayImage, Luma};

use crate::types::CanonicalImage;

/// Channel level at or above which R, G and B count as blank canvas.
pub const BACKGROUND_LEVEL: u8 = 240;

pub const WHITE: u32 = 0x00FF_FFFF;
pub const BLACK: u32 = 0x0000_0000;

#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Returns [a, r, g, b].
#[inline]
pub fn unpack_argb(px: u32) -> [u8; 4] {
    [
        ((px >> 24) & 0xFF) as u8,
        ((px >> 16) & 0xFF) as u8,
        ((px >> 8) & 0xFF) as u8,
        (px & 0xFF) as u8,
    ]
}

/// Split an 0x00RRGGBB (or ARGB, alpha ignored) pixel into (r, g, b).
#[inline]
pub fn rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Frame pixel to canonical ARGB with full alpha.
#[inline]
pub fn opaque(px: u32) -> u32 {
    0xFF00_0000 | (px & 0x00FF_FFFF)
}

/// Near-white test used by the diagonal scan. Alpha does not participate.
#[inline]
pub fn is_background(px: u32) -> bool {
    let (r, g, b) = rgb(px);
    r >= BACKGROUND_LEVEL && g >= BACKGROUND_LEVEL && b >= BACKGROUND_LEVEL
}

/// Floor a computed channel value to a byte.
///
/// Callers clamp upstream; a value outside [0, 255] is a bug and panics in
/// debug builds.
#[inline]
pub fn channel_from_f64(raw: f64) -> u8 {
    debug_assert!(
        (0.0..=255.0).contains(&raw),
        "channel value {raw} outside [0, 255]"
    );
    raw.clamp(0.0, 255.0).floor() as u8
}

/// Rec. 601 luma of every pixel, for full-image comparison.
pub fn to_luma(img: &CanonicalImage) -> GrayImage {
    let n = img.size();
    GrayImage::from_fn(n, n, |x, y| {
        let (r, g, b) = rgb(img.at(x, y));
        let l = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
        Luma([channel_from_f64(l.round().clamp(0.0, 255.0))])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_roundtrip_keeps_channel_order() {
        let px = pack_argb(0x11, 0x22, 0x33, 0x44);
        assert_eq!(px, 0x1122_3344);
        assert_eq!(unpack_argb(px), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(rgb(px), (0x22, 0x33, 0x44));
        assert_eq!(opaque(pack_rgb(1, 2, 3)), 0xFF01_0203);
    }

    #[test]
    fn background_needs_every_channel_at_threshold() {
        assert!(is_background(WHITE));
        assert!(is_background(pack_rgb(240, 240, 240)));
        assert!(!is_background(pack_rgb(239, 255, 255)));
        assert!(!is_background(pack_rgb(255, 255, 239)));
        assert!(!is_background(BLACK));
        // Alpha is ignored.
        assert!(is_background(0x00F0_F0F0));
    }

    #[test]
    fn channel_from_f64_floors() {
        assert_eq!(channel_from_f64(0.0), 0);
        assert_eq!(channel_from_f64(254.9), 254);
        assert_eq!(channel_from_f64(255.0), 255);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside [0, 255]")]
    fn channel_from_f64_rejects_out_of_range_in_debug() {
        channel_from_f64(256.0);
    }

    #[test]
    fn luma_of_white_and_black() {
        let img = CanonicalImage::from_argb(2, vec![0xFFFF_FFFF, 0xFF00_0000, 0xFF00_0000, 0xFFFF_FFFF])
            .unwrap();
        let l = to_luma(&img);
        assert_eq!(l.get_pixel(0, 0)[0], 255);
        assert_eq!(l.get_pixel(1, 0)[0], 0);
    }
}
