//! sketch-match: freehand shape recognition.
//!
//! A stroke's bounding box is cut out of the rendered frame, normalized to a
//! small square image, reduced to a four-value diagonal-scan signature, and
//! compared against template figures within a configurable tolerance.
//!
//! ```no_run
//! use sketch_match::{
//!     BoundingBox, BoundingBoxTracker, ComparatorKind, FrameBuffer, Point2D, Recognizer,
//!     TemplateRepository, ToleranceConfig,
//! };
//!
//! let config = ToleranceConfig::default();
//! let templates = TemplateRepository::builtin(&config);
//! let mut recognizer = Recognizer::new(config, ComparatorKind::Signature)?;
//!
//! let mut tracker = BoundingBoxTracker::new();
//! tracker.track_sample(Point2D::new(120.0, 80.0));
//! tracker.track_sample(Point2D::new(260.0, 210.0));
//! let mut board = BoundingBox::default();
//! tracker.finalize_stroke(&mut board);
//!
//! let mut frame = FrameBuffer::filled(800, 600, 0x00FF_FFFF);
//! let target = templates.find("square").unwrap();
//! let hit = recognizer.matches(&board, &mut frame, target);
//! # let _ = hit;
//! # Ok::<(), sketch_match::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod capture;
pub mod comparator;
pub mod config;
pub mod draw;
pub mod error;
pub mod figure;
pub mod pixel;
pub mod recognizer;
pub mod region;
pub mod signature;
pub mod templates;
pub mod tracker;
pub mod types;

pub use capture::{CapturedFrame, FrameCapture};
pub use comparator::{ComparatorKind, ShapeComparator, SignatureComparator, TemplateMatchComparator};
pub use config::{ToleranceCache, ToleranceConfig};
pub use error::Error;
pub use figure::{Figure, FigureKind};
pub use recognizer::Recognizer;
pub use region::{crop_rect, extract_region, CropRect};
pub use signature::{compare, compare_code, compute_signature, Signature};
pub use templates::TemplateRepository;
pub use tracker::BoundingBoxTracker;
pub use types::{BoundingBox, CanonicalImage, FrameBuffer, Point2D};
