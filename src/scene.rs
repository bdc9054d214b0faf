// The drawing canvas: an ink layer the pen writes into, plus the sparkle
// trail on top. This is what the recognizer captures from.

use sketch_match::draw;
use sketch_match::pixel::{BLACK, WHITE};
use sketch_match::{FrameBuffer, FrameCapture, Point2D};

use crate::fx::Trail;

/// Pen radius in screen pixels (9px wide stroke).
const PEN_RADIUS: i32 = 4;

pub struct Scene {
    ink: FrameBuffer,
    trail: Trail,
    trail_visible: bool,
}

impl Scene {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            ink: FrameBuffer::filled(width, height, WHITE),
            trail: Trail::new(600),
            trail_visible: true,
        }
    }

    /// Ink a pen segment and drop sparkles at its end.
    pub fn pen_to(&mut self, from: Option<Point2D>, to: Point2D) {
        let end = (to.x as i32, to.y as i32);
        let start = from.map(|p| (p.x as i32, p.y as i32)).unwrap_or(end);
        draw::draw_thick_line(&mut self.ink, start, end, PEN_RADIUS, BLACK);
        self.trail.spawn(to.x, to.y, 6);
    }

    pub fn clear_ink(&mut self) {
        self.ink.fill(WHITE);
        self.trail.clear();
    }

    pub fn tick(&mut self, dt: f32) {
        self.trail.update(dt);
    }

    /// Canvas as the player sees it, written into `screen`.
    pub fn render_into(&self, screen: &mut FrameBuffer) {
        screen.pixels.copy_from_slice(&self.ink.pixels);
        if self.trail_visible {
            self.trail.render(screen);
        }
    }
}

impl FrameCapture for Scene {
    fn hide_overlay(&mut self) {
        self.trail_visible = false;
    }

    fn show_overlay(&mut self) {
        self.trail_visible = true;
    }

    fn capture_frame(&mut self) -> FrameBuffer {
        let mut frame = self.ink.clone();
        if self.trail_visible {
            self.trail.render(&mut frame);
        }
        frame
    }
}
