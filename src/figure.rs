use std::cell::OnceCell;

use crate::signature::{compute_signature, Signature};
use crate::types::CanonicalImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    /// Preloaded reference, lives for the whole session.
    Template,
    /// One per recognition attempt, dropped after comparison.
    Drawn,
}

/// A canonical image plus its signature, computed on first use.
#[derive(Debug, Clone)]
pub struct Figure {
    name: String,
    kind: FigureKind,
    image: CanonicalImage,
    signature: OnceCell<Signature>,
}

impl Figure {
    pub fn template(name: impl Into<String>, image: CanonicalImage) -> Self {
        Self { name: name.into(), kind: FigureKind::Template, image, signature: OnceCell::new() }
    }

    pub fn drawn(image: CanonicalImage) -> Self {
        Self { name: "drawn".into(), kind: FigureKind::Drawn, image, signature: OnceCell::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    pub fn image(&self) -> &CanonicalImage {
        &self.image
    }

    pub fn signature(&self) -> Signature {
        *self.signature.get_or_init(|| compute_signature(&self.image))
    }

    pub fn has_signature(&self) -> bool {
        self.signature.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_computed_once_and_cached() {
        let img = CanonicalImage::from_argb(64, vec![0xFFFF_FFFF; 64 * 64]).unwrap();
        let fig = Figure::drawn(img);
        assert_eq!(fig.kind(), FigureKind::Drawn);
        assert!(!fig.has_signature());

        let s = fig.signature();
        assert!(fig.has_signature());
        assert_eq!(fig.signature(), s);
        assert_eq!(s.components(), [64, 0, 64, 0]);
    }

    #[test]
    fn template_keeps_its_name() {
        let img = CanonicalImage::from_argb(2, vec![0; 4]).unwrap();
        let fig = Figure::template("circle", img);
        assert_eq!(fig.name(), "circle");
        assert_eq!(fig.kind(), FigureKind::Template);
    }
}
