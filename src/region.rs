// Cuts the drawn figure out of a full-screen frame and scales it to the
// canonical size, leaving the same proportional blank border the template
// images were authored with.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::config::ToleranceConfig;
use crate::pixel;
use crate::types::{BoundingBox, CanonicalImage, FrameBuffer};

/// Pixel rectangle inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Padded crop for `bbox` on a `screen_w × screen_h` frame.
///
/// Returns None when nothing usable was drawn: zero width or height, or a box
/// that reaches outside the screen. The margin is truncated at screen edges,
/// never shifted.
pub fn crop_rect(
    bbox: &BoundingBox,
    screen_w: u32,
    screen_h: u32,
    config: &ToleranceConfig,
) -> Option<CropRect> {
    let (min, max) = (bbox.min(), bbox.max());

    // Size without margins, in whole pixels.
    let raw_w = max.x as i32 - min.x as i32;
    let raw_h = max.y as i32 - min.y as i32;

    if raw_w <= 0 || raw_h <= 0 {
        debug!(raw_w, raw_h, "no region: degenerate box");
        return None;
    }
    if min.x < 0.0 || min.y < 0.0 || max.x > screen_w as f32 || max.y > screen_h as f32 {
        debug!(?min, ?max, screen_w, screen_h, "no region: box outside screen");
        return None;
    }

    // Margin scaled so that after resizing the figure spans exactly the
    // content area and the border matches `padding_margin`.
    let content = config.content_size();
    let pad = config.padding_margin as f32;
    let margin_h = raw_w as f32 / content * pad;
    let margin_v = raw_h as f32 / content * pad;

    let left = (min.x - margin_h).max(0.0);
    let top = (min.y - margin_v).max(0.0);
    let right = (max.x + margin_h).min(screen_w as f32);
    let bottom = (max.y + margin_v).min(screen_h as f32);

    // Origin and extent are both truncated, so the crop never grows past
    // the padded box.
    let x = left as u32;
    let y = top as u32;
    let width = ((right - left) as u32).min(screen_w - x);
    let height = ((bottom - top) as u32).min(screen_h - y);

    Some(CropRect { x, y, width, height })
}

/// Copy `rect` out of `frame` as an opaque RGBA image.
pub fn crop_frame(frame: &FrameBuffer, rect: CropRect) -> RgbaImage {
    RgbaImage::from_fn(rect.width, rect.height, |x, y| {
        let sx = (rect.x + x) as usize;
        let sy = (rect.y + y) as usize;
        let (r, g, b) = pixel::rgb(frame.pixels[sy * frame.width + sx]);
        Rgba([r, g, b, 255])
    })
}

/// Bounding box + frame → canonical image, or None if nothing usable was drawn.
///
/// The frame's own dimensions are the screen extent.
pub fn extract_region(
    bbox: &BoundingBox,
    frame: &FrameBuffer,
    config: &ToleranceConfig,
) -> Option<CanonicalImage> {
    let rect = crop_rect(bbox, frame.width as u32, frame.height as u32, config)?;
    let cropped = crop_frame(frame, rect);

    // Nearest keeps the result reproducible and the ink un-blended.
    let n = config.image_size;
    let resized = imageops::resize(&cropped, n, n, FilterType::Nearest);
    debug!(?rect, size = n, "region extracted");

    CanonicalImage::from_rgba(&resized)
}
