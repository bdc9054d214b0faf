// Core value types shared by the recognition pipeline.

use image::RgbaImage;

use crate::pixel;

/// A full-screen pixel snapshot, as pushed to (or captured from) the window.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A frame filled with one color.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    /// Pixel at (x, y), or None outside the frame.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    pub fn fill(&mut self, color: u32) {
        for p in &mut self.pixels { *p = color; }
    }
}

/// Screen coordinate of one stroke sample. y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box enclosing one stroke, in screen coordinates.
///
/// The all-zero corner is the "unset" sentinel: a box is empty as soon as
/// either corner equals `Point2D::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    min: Point2D,
    max: Point2D,
}

impl BoundingBox {
    pub const fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Point2D {
        self.min
    }

    pub fn max(&self) -> Point2D {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min == Point2D::default() || self.max == Point2D::default()
    }

    /// Reset to the unset sentinel.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set(&mut self, min: Point2D, max: Point2D) {
        self.min = min;
        self.max = max;
    }
}

/// Fixed-size square image fed into signature extraction.
/// Pixels are packed 0xAARRGGBB, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalImage {
    size: u32,
    pixels: Vec<u32>,
}

impl CanonicalImage {
    /// Wrap an already packed ARGB buffer. Returns None if the length is not size².
    pub fn from_argb(size: u32, pixels: Vec<u32>) -> Option<Self> {
        if pixels.len() != (size as usize) * (size as usize) {
            return None;
        }
        Some(Self { size, pixels })
    }

    /// Convert a square RGBA image. Returns None for non-square input.
    pub fn from_rgba(img: &RgbaImage) -> Option<Self> {
        let (w, h) = img.dimensions();
        if w != h {
            return None;
        }
        let pixels = img
            .pixels()
            .map(|p| pixel::pack_argb(p[3], p[0], p[1], p[2]))
            .collect();
        Some(Self { size: w, pixels })
    }

    /// Convert a square 0x00RRGGBB frame; alpha becomes opaque.
    pub fn from_frame(frame: &FrameBuffer) -> Option<Self> {
        if frame.width != frame.height || frame.pixels.len() != frame.width * frame.height {
            return None;
        }
        let pixels = frame.pixels.iter().map(|&px| pixel::opaque(px)).collect();
        Some(Self { size: frame.width as u32, pixels })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at (col, row) as packed ARGB.
    pub fn at(&self, col: u32, row: u32) -> u32 {
        self.pixels[(row * self.size + col) as usize]
    }

    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.size, self.size, |x, y| {
            let [a, r, g, b] = pixel::unpack_argb(self.at(x, y));
            image::Rgba([r, g, b, a])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_sentinel() {
        let mut b = BoundingBox::default();
        assert!(b.is_empty());

        b.set(Point2D::new(3.0, 4.0), Point2D::new(10.0, 12.0));
        assert!(!b.is_empty());

        // Either corner at the sentinel counts as unset.
        let half = BoundingBox::new(Point2D::default(), Point2D::new(10.0, 12.0));
        assert!(half.is_empty());

        b.clear();
        assert!(b.is_empty());
        assert_eq!(b, BoundingBox::default());
    }

    #[test]
    fn canonical_image_rejects_wrong_shapes() {
        assert!(CanonicalImage::from_argb(4, vec![0; 15]).is_none());
        assert!(CanonicalImage::from_rgba(&RgbaImage::new(3, 4)).is_none());
        let frame = FrameBuffer::filled(5, 4, 0x00FF_FFFF);
        assert!(CanonicalImage::from_frame(&frame).is_none());
    }

    #[test]
    fn canonical_image_from_frame_forces_alpha() {
        let mut frame = FrameBuffer::filled(2, 2, 0x00FF_FFFF);
        frame.pixels[3] = 0x0012_3456;
        let img = CanonicalImage::from_frame(&frame).unwrap();
        assert_eq!(img.size(), 2);
        assert_eq!(img.at(0, 0), 0xFFFF_FFFF);
        assert_eq!(img.at(1, 1), 0xFF12_3456);

        let rgba = img.to_rgba();
        assert_eq!(rgba.get_pixel(1, 1).0, [0x12, 0x34, 0x56, 0xFF]);
        assert_eq!(CanonicalImage::from_rgba(&rgba).unwrap(), img);
    }
}
