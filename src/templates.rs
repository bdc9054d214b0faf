// Reference figures the player is asked to draw.
// Either loaded from a folder of images or rendered procedurally.

use std::path::Path;

use image::imageops::{self, FilterType};
use rand::Rng;
use tracing::{info, warn};

use crate::config::ToleranceConfig;
use crate::draw;
use crate::error::Error;
use crate::figure::Figure;
use crate::pixel::{BLACK, WHITE};
use crate::types::{CanonicalImage, FrameBuffer};

const TEMPLATE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Stroke radius for procedurally drawn templates (3px wide lines).
const BUILTIN_STROKE_RADIUS: i32 = 1;

#[derive(Debug, Clone, Default)]
pub struct TemplateRepository {
    figures: Vec<Figure>,
}

impl TemplateRepository {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self { figures }
    }

    /// Load every image in `dir`, sorted by file name, scaled to the canonical size.
    pub fn from_dir(dir: &Path, config: &ToleranceConfig) -> Result<Self, Error> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_template_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let n = config.image_size;
        let mut figures = Vec::with_capacity(paths.len());
        for path in paths {
            let img = image::open(&path)
                .map_err(|e| Error::TemplateLoad { path: path.clone(), reason: e.to_string() })?
                .to_rgba8();

            let img = if img.dimensions() != (n, n) {
                warn!(path = %path.display(), dims = ?img.dimensions(), size = n, "resizing template");
                imageops::resize(&img, n, n, FilterType::Nearest)
            } else {
                img
            };

            let canonical = CanonicalImage::from_rgba(&img).ok_or_else(|| Error::TemplateLoad {
                path: path.clone(),
                reason: "not square after resize".into(),
            })?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            figures.push(Figure::template(name, canonical));
        }

        if figures.is_empty() {
            return Err(Error::NoTemplates(dir.to_path_buf()));
        }
        info!(count = figures.len(), dir = %dir.display(), "templates loaded");
        Ok(Self { figures })
    }

    /// Simple outlines drawn inside the padded content area.
    pub fn builtin(config: &ToleranceConfig) -> Self {
        let n = config.image_size as i32;
        let p = config.padding_margin as i32;
        let q = n - p - 1;
        let mid = (p + q) / 2;

        let mut figures = Vec::new();
        let mut add = |name: &str, paint: &dyn Fn(&mut FrameBuffer)| {
            let mut fb = FrameBuffer::filled(n as usize, n as usize, WHITE);
            paint(&mut fb);
            if let Some(img) = CanonicalImage::from_frame(&fb) {
                figures.push(Figure::template(name, img));
            }
        };

        let r = BUILTIN_STROKE_RADIUS;
        add("square", &|fb| draw::draw_polyline(fb, &[(p, p), (q, p), (q, q), (p, q)], true, r, BLACK));
        add("triangle", &|fb| draw::draw_polyline(fb, &[(mid, p), (q, q), (p, q)], true, r, BLACK));
        add("diamond", &|fb| {
            draw::draw_polyline(fb, &[(mid, p), (q, mid), (mid, q), (p, mid)], true, r, BLACK)
        });
        add("circle", &|fb| {
            let c = (p + q) as f32 / 2.0;
            let rad = (q - p) as f32 / 2.0;
            let pts: Vec<(i32, i32)> = (0..48)
                .map(|i| {
                    let t = i as f32 / 48.0 * std::f32::consts::TAU;
                    ((c + rad * t.cos()).round() as i32, (c + rad * t.sin()).round() as i32)
                })
                .collect();
            draw::draw_polyline(fb, &pts, true, r, BLACK);
        });
        add("plus", &|fb| {
            draw::draw_thick_line(fb, (mid, p), (mid, q), r, BLACK);
            draw::draw_thick_line(fb, (p, mid), (q, mid), r, BLACK);
        });

        Self { figures }
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Figure> {
        self.figures.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&Figure> {
        self.figures.iter().find(|f| f.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter()
    }

    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Figure> {
        if self.figures.is_empty() {
            return None;
        }
        self.figures.get(rng.gen_range(0..self.figures.len()))
    }
}

fn has_template_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEMPLATE_EXTENSIONS.iter().any(|ok| e.eq_ignore_ascii_case(ok)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builtin_templates_are_canonical_and_distinct() {
        let cfg = ToleranceConfig::default();
        let repo = TemplateRepository::builtin(&cfg);
        assert_eq!(repo.len(), 5);
        for fig in repo.iter() {
            assert_eq!(fig.image().size(), 64);
        }

        let square = repo.find("square").unwrap().signature();
        // Corners sit at the padding offset on both diagonals.
        assert_eq!(square.main_start, 10);
        assert_eq!(square.secondary_start, 10);

        let plus = repo.find("plus").unwrap().signature();
        assert!(plus.main_start > 25, "plus crosses the diagonal near the center: {plus}");
        assert!(!square.within(&plus, cfg.tolerance()));
    }

    #[test]
    fn loads_images_sorted_and_resized() {
        let dir = tempfile::tempdir().unwrap();
        let white = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        white.save(dir.path().join("b_white.png")).unwrap();
        let big = RgbaImage::from_pixel(128, 128, Rgba([0, 0, 0, 255]));
        big.save(dir.path().join("a_black.png")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let cfg = ToleranceConfig::default();
        let repo = TemplateRepository::from_dir(dir.path(), &cfg).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get(0).unwrap().name(), "a_black");
        assert_eq!(repo.get(1).unwrap().name(), "b_white");
        assert_eq!(repo.get(0).unwrap().image().size(), 64);
        assert_eq!(repo.get(1).unwrap().signature().components(), [64, 0, 64, 0]);
        assert_eq!(repo.get(0).unwrap().signature().components(), [0, 64, 0, 64]);
    }

    #[test]
    fn empty_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ToleranceConfig::default();
        assert!(matches!(
            TemplateRepository::from_dir(dir.path(), &cfg),
            Err(Error::NoTemplates(_))
        ));
    }

    #[test]
    fn unreadable_dir_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ToleranceConfig::default();
        assert!(matches!(
            TemplateRepository::from_dir(&dir.path().join("missing"), &cfg),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn undecodable_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        let cfg = ToleranceConfig::default();
        assert!(matches!(
            TemplateRepository::from_dir(dir.path(), &cfg),
            Err(Error::TemplateLoad { .. })
        ));
    }

    #[test]
    fn extension_filter_ignores_case() {
        assert!(has_template_extension(Path::new("shape.JPG")));
        assert!(has_template_extension(Path::new("shape.jpeg")));
        assert!(!has_template_extension(Path::new("shape.gif")));
        assert!(!has_template_extension(Path::new("png")));
    }

    #[test]
    fn random_pick_stays_in_repository() {
        let repo = TemplateRepository::builtin(&ToleranceConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let fig = repo.pick_random(&mut rng).unwrap();
            assert!(repo.find(fig.name()).is_some());
        }
        assert!(TemplateRepository::default().pick_random(&mut rng).is_none());
    }
}
