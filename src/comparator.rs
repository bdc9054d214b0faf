// Two interchangeable ways to decide whether a drawn figure matches a template.
// Both answer the same question and both are tuned by `similarity_threshold`.

use image::imageops::{self, FilterType};
use imageproc::template_matching::{find_extremes, match_template, MatchTemplateMethod};
use tracing::debug;

use crate::config::{ToleranceCache, ToleranceConfig};
use crate::figure::Figure;
use crate::pixel;

pub trait ShapeComparator {
    fn name(&self) -> &'static str;

    fn matches(&mut self, drawn: &Figure, template: &Figure, config: &ToleranceConfig) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparatorKind {
    /// Diagonal-scan signature within tolerance.
    #[default]
    Signature,
    /// Full-image pixel comparison.
    TemplateMatch,
}

impl ComparatorKind {
    pub fn build(self) -> Box<dyn ShapeComparator> {
        match self {
            ComparatorKind::Signature => Box::new(SignatureComparator::new()),
            ComparatorKind::TemplateMatch => Box::new(TemplateMatchComparator),
        }
    }
}

#[derive(Debug, Default)]
pub struct SignatureComparator {
    cache: ToleranceCache,
}

impl SignatureComparator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShapeComparator for SignatureComparator {
    fn name(&self) -> &'static str {
        "signature"
    }

    fn matches(&mut self, drawn: &Figure, template: &Figure, config: &ToleranceConfig) -> bool {
        let tolerance = self.cache.tolerance(config);
        let (a, b) = (drawn.signature(), template.signature());
        let hit = a.within(&b, tolerance);
        debug!(drawn = %a, template = %b, name = template.name(), tolerance, hit, "signature compare");
        hit
    }
}

/// Pixel-wise comparison on luma after scaling the drawn image to the
/// template's size. Similarity is `1 - sse / (255² · w · h)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateMatchComparator;

impl TemplateMatchComparator {
    pub fn similarity(&self, drawn: &Figure, template: &Figure) -> f32 {
        let tmpl = pixel::to_luma(template.image());
        let mut img = pixel::to_luma(drawn.image());
        if img.dimensions() != tmpl.dimensions() {
            img = imageops::resize(&img, tmpl.width(), tmpl.height(), FilterType::Nearest);
        }

        let scores = match_template(&img, &tmpl, MatchTemplateMethod::SumOfSquaredErrors);
        let best = find_extremes(&scores).min_value;

        let area = tmpl.width() as f32 * tmpl.height() as f32;
        1.0 - best / (255.0 * 255.0 * area)
    }
}

impl ShapeComparator for TemplateMatchComparator {
    fn name(&self) -> &'static str {
        "template-match"
    }

    fn matches(&mut self, drawn: &Figure, template: &Figure, config: &ToleranceConfig) -> bool {
        let similarity = self.similarity(drawn, template);
        let hit = similarity >= config.similarity_threshold;
        debug!(similarity, name = template.name(), hit, "template compare");
        hit
    }
}
