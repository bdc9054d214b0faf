// Ties the pipeline together for the drawing loop:
// bounding box → captured frame → canonical figure → comparator verdict.

use tracing::{debug, info};

use crate::capture::{CapturedFrame, FrameCapture};
use crate::comparator::{ComparatorKind, ShapeComparator};
use crate::config::ToleranceConfig;
use crate::error::Error;
use crate::figure::Figure;
use crate::region::extract_region;
use crate::templates::TemplateRepository;
use crate::types::BoundingBox;

pub struct Recognizer {
    config: ToleranceConfig,
    comparator: Box<dyn ShapeComparator>,
}

impl Recognizer {
    /// Fails with `InvalidConfig` unless `config` passes validation.
    pub fn new(config: ToleranceConfig, kind: ComparatorKind) -> Result<Self, Error> {
        Self::with_comparator(config, kind.build())
    }

    pub fn with_comparator(
        config: ToleranceConfig,
        comparator: Box<dyn ShapeComparator>,
    ) -> Result<Self, Error> {
        Ok(Self { config: config.validate()?, comparator })
    }

    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    /// Swap in a fresh config; the comparator notices threshold drift itself.
    /// An invalid config is rejected and the current one stays in place.
    pub fn set_config(&mut self, config: ToleranceConfig) -> Result<(), Error> {
        self.config = config.validate()?;
        Ok(())
    }

    pub fn comparator_name(&self) -> &'static str {
        self.comparator.name()
    }

    /// Capture the screen and cut out the drawn figure.
    ///
    /// None means nothing usable was drawn. The overlay is hidden only while
    /// the frame is held and is restored on every path.
    pub fn parse_figure<C: FrameCapture + ?Sized>(
        &self,
        board: &BoundingBox,
        capture: &mut C,
    ) -> Option<Figure> {
        if board.is_empty() {
            debug!("no figure: board is empty");
            return None;
        }
        let frame = CapturedFrame::acquire(capture);
        let image = extract_region(board, &frame, &self.config)?;
        Some(Figure::drawn(image))
    }

    pub fn compare(&mut self, drawn: &Figure, template: &Figure) -> bool {
        self.comparator.matches(drawn, template, &self.config)
    }

    /// Does the stroke on `board` match `template`? Nothing drawn is a miss.
    pub fn matches<C: FrameCapture + ?Sized>(
        &mut self,
        board: &BoundingBox,
        capture: &mut C,
        template: &Figure,
    ) -> bool {
        let Some(drawn) = self.parse_figure(board, capture) else {
            return false;
        };
        let hit = self.compare(&drawn, template);
        info!(
            template = template.name(),
            comparator = self.comparator.name(),
            hit,
            "recognition"
        );
        hit
    }

    /// First template in `repo` that `drawn` matches.
    pub fn best_match<'t>(&mut self, drawn: &Figure, repo: &'t TemplateRepository) -> Option<&'t Figure> {
        repo.iter().find(|t| self.comparator.matches(drawn, t, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::tests::RecordingCapture;
    use crate::pixel::WHITE;
    use crate::types::{FrameBuffer, Point2D};

    /// Paste `fig` into a white frame at (ox, oy), each pixel scaled `k` times.
    fn frame_with(fig: &Figure, ox: usize, oy: usize, k: usize) -> FrameBuffer {
        let mut fb = FrameBuffer::filled(800, 600, WHITE);
        let n = fig.image().size();
        for row in 0..n {
            for col in 0..n {
                let px = fig.image().at(col, row) & 0x00FF_FFFF;
                for dy in 0..k {
                    for dx in 0..k {
                        let x = ox + col as usize * k + dx;
                        let y = oy + row as usize * k + dy;
                        fb.pixels[y * fb.width + x] = px;
                    }
                }
            }
        }
        fb
    }

    /// Bounding box of the template's content area once pasted.
    fn content_box(ox: f32, oy: f32, k: f32, cfg: &ToleranceConfig) -> BoundingBox {
        let p = cfg.padding_margin as f32 * k;
        let c = cfg.content_size() * k;
        BoundingBox::new(Point2D::new(ox + p, oy + p), Point2D::new(ox + p + c, oy + p + c))
    }

    #[test]
    fn drawn_template_is_recognized_at_unit_scale() {
        let cfg = ToleranceConfig::default();
        let repo = TemplateRepository::builtin(&cfg);
        let square = repo.find("square").unwrap();

        let mut frame = frame_with(square, 300, 200, 1);
        let board = content_box(300.0, 200.0, 1.0, &cfg);

        let mut rec = Recognizer::new(cfg, ComparatorKind::Signature).unwrap();
        let drawn = rec.parse_figure(&board, &mut frame).unwrap();
        assert_eq!(drawn.image(), square.image());
        assert_eq!(drawn.signature(), square.signature());
        assert!(rec.matches(&board, &mut frame, square));
    }

    #[test]
    fn scaled_drawing_matches_its_template_and_not_others() {
        let cfg = ToleranceConfig::default();
        let repo = TemplateRepository::builtin(&cfg);
        let square = repo.find("square").unwrap();
        let plus = repo.find("plus").unwrap();

        let mut frame = frame_with(square, 100, 50, 4);
        let board = content_box(100.0, 50.0, 4.0, &cfg);

        let mut rec = Recognizer::new(cfg, ComparatorKind::Signature).unwrap();
        assert!(rec.matches(&board, &mut frame, square));
        assert!(!rec.matches(&board, &mut frame, plus));

        let drawn = rec.parse_figure(&board, &mut frame).unwrap();
        assert_eq!(rec.best_match(&drawn, &repo).map(|f| f.name()), Some("square"));
    }

    #[test]
    fn nothing_drawn_is_a_miss_and_restores_overlay() {
        let cfg = ToleranceConfig::default();
        let repo = TemplateRepository::builtin(&cfg);
        let square = repo.find("square").unwrap();
        let mut rec = Recognizer::new(cfg, ComparatorKind::Signature).unwrap();

        // Empty board: no capture at all.
        let mut src = RecordingCapture::new(FrameBuffer::filled(800, 600, WHITE));
        assert!(!rec.matches(&BoundingBox::default(), &mut src, square));
        assert_eq!(src.hides, 0);

        // Box off-screen: captured, rejected, overlay back on.
        let off = BoundingBox::new(Point2D::new(-5.0, 10.0), Point2D::new(50.0, 80.0));
        assert!(rec.parse_figure(&off, &mut src).is_none());
        assert_eq!((src.hides, src.shows), (1, 1));
        assert!(src.overlay_visible);
        assert_eq!(src.captured_with_overlay, Some(false));
    }

    #[test]
    fn config_swap_changes_strictness() {
        let cfg = ToleranceConfig::default();
        let repo = TemplateRepository::builtin(&cfg);
        let square = repo.find("square").unwrap();
        let diamond = repo.find("diamond").unwrap();

        let mut frame = frame_with(square, 300, 200, 1);
        let board = content_box(300.0, 200.0, 1.0, &cfg);

        let mut rec = Recognizer::new(cfg, ComparatorKind::Signature).unwrap();
        assert!(!rec.matches(&board, &mut frame, diamond));

        rec.set_config(cfg.with_similarity_threshold(0.1)).unwrap();
        assert!(rec.matches(&board, &mut frame, diamond));
        assert_eq!(rec.config().similarity_threshold, 0.1);
    }

    #[test]
    fn template_match_strategy_recognizes_exact_drawing() {
        let cfg = ToleranceConfig::default();
        let repo = TemplateRepository::builtin(&cfg);
        let circle = repo.find("circle").unwrap();

        let mut frame = frame_with(circle, 40, 40, 1);
        let board = content_box(40.0, 40.0, 1.0, &cfg);

        let mut rec = Recognizer::new(cfg, ComparatorKind::TemplateMatch).unwrap();
        assert_eq!(rec.comparator_name(), "template-match");
        assert!(rec.matches(&board, &mut frame, circle));
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        let cfg = ToleranceConfig::default();
        for t in [0.0, -0.5, 1.5] {
            let bad = cfg.with_similarity_threshold(t);
            assert!(matches!(
                Recognizer::new(bad, ComparatorKind::Signature),
                Err(Error::InvalidConfig(_))
            ));
        }

        let repo = TemplateRepository::builtin(&cfg);
        let square = repo.find("square").unwrap();
        let mut rec = Recognizer::new(cfg, ComparatorKind::Signature).unwrap();
        for t in [0.0, 1.5] {
            assert!(matches!(
                rec.set_config(cfg.with_similarity_threshold(t)),
                Err(Error::InvalidConfig(_))
            ));
        }
        // Rejected swaps leave the previous config, so a figure still matches itself.
        assert_eq!(rec.config().similarity_threshold, 0.9);
        assert!(rec.compare(square, square));
    }
}
