//! Diagonal-scan shape fingerprint.
//!
//! Walks both diagonals of a canonical image from each end and records where
//! the first ink pixel sits. Template signatures were produced by this exact
//! scan, so the background threshold and the end-index arithmetic must not
//! change.

use std::fmt;

use serde::Serialize;

use crate::pixel::is_background;
use crate::types::CanonicalImage;

/// Four scan positions, each in `[0, image_size]`, measured from the start of
/// their diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    pub main_start: u32,
    pub main_end: u32,
    pub secondary_start: u32,
    pub secondary_end: u32,
}

#[derive(Debug, Clone, Copy)]
enum Diagonal {
    Main,      // top-left → bottom-right
    Secondary, // top-right → bottom-left
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Ascending,
    Descending,
}

impl Diagonal {
    #[inline]
    fn index(self, i: usize, n: usize) -> usize {
        match self {
            Diagonal::Main => i * n + i,
            Diagonal::Secondary => i * n + (n - 1 - i),
        }
    }
}

/// Background run length from one end of a diagonal, reported as a position
/// from the diagonal's start.
fn scan(image: &CanonicalImage, diagonal: Diagonal, direction: Direction) -> u32 {
    let n = image.size() as usize;
    let pixels = image.pixels();

    let mut count = 0u32;
    for i in 0..n {
        let step = match direction {
            Direction::Ascending => i,
            Direction::Descending => n - 1 - i,
        };
        if !is_background(pixels[diagonal.index(step, n)]) {
            break;
        }
        count += 1;
    }

    match direction {
        Direction::Ascending => count,
        Direction::Descending => n as u32 - count,
    }
}

pub fn compute_signature(image: &CanonicalImage) -> Signature {
    Signature {
        main_start: scan(image, Diagonal::Main, Direction::Ascending),
        main_end: scan(image, Diagonal::Main, Direction::Descending),
        secondary_start: scan(image, Diagonal::Secondary, Direction::Ascending),
        secondary_end: scan(image, Diagonal::Secondary, Direction::Descending),
    }
}

impl Signature {
    pub fn components(&self) -> [u32; 4] {
        [self.main_start, self.main_end, self.secondary_start, self.secondary_end]
    }

    /// Every component differs by at most `tolerance`.
    pub fn within(&self, other: &Signature, tolerance: f32) -> bool {
        self.components()
            .iter()
            .zip(other.components())
            .all(|(&a, b)| (a as f32 - b as f32).abs() <= tolerance)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.main_start, self.main_end, self.secondary_start, self.secondary_end
        )
    }
}

pub fn compare(a: &Signature, b: &Signature, tolerance: f32) -> bool {
    a.within(b, tolerance)
}

/// Comparator-style result: 0 on match, -1 otherwise.
pub fn compare_code(a: &Signature, b: &Signature, tolerance: f32) -> i32 {
    if compare(a, b, tolerance) { 0 } else { -1 }
}
