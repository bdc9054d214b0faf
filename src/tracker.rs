// Collects pointer samples while the mouse button is held, then turns them
// into the stroke's bounding box when the button is released.

use tracing::debug;

use crate::types::{BoundingBox, Point2D};

#[derive(Debug, Default, Clone)]
pub struct BoundingBoxTracker {
    samples: Vec<Point2D>, // append-only for the duration of one stroke
}

impl BoundingBoxTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one pointer sample.
    pub fn track_sample(&mut self, point: Point2D) {
        self.samples.push(point);
    }

    pub fn samples(&self) -> &[Point2D] {
        &self.samples
    }

    pub fn last(&self) -> Option<Point2D> {
        self.samples.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Abandon the current stroke.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Write the samples' enclosing box into `board` and return it.
    /// With no samples the board is left untouched ("nothing drawn").
    pub fn finalize_stroke(&self, board: &mut BoundingBox) -> BoundingBox {
        let Some(first) = self.samples.first() else {
            return *board;
        };

        let (min, max) = self.samples.iter().fold((*first, *first), |(lo, hi), p| {
            (
                Point2D::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2D::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        debug!(samples = self.samples.len(), ?min, ?max, "stroke finalized");

        board.set(min, max);
        *board
    }
}
