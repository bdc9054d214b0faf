use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Recognition parameters.
///
/// Treated as an immutable value: when a setting changes, the orchestrator
/// builds a fresh config and hands it to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Side of the canonical image in pixels.
    pub image_size: u32,
    /// Blank border, in canonical pixels, around the figure on each side.
    pub padding_margin: u32,
    /// Required similarity in (0, 1]. Higher = stricter.
    pub similarity_threshold: f32,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            image_size: 64,
            padding_margin: 10,
            similarity_threshold: 0.9,
        }
    }
}

impl ToleranceConfig {
    pub fn validate(self) -> Result<Self, Error> {
        if self.image_size == 0 {
            return Err(Error::InvalidConfig("image_size must be positive".into()));
        }
        if 2 * self.padding_margin >= self.image_size {
            return Err(Error::InvalidConfig(format!(
                "padding_margin {} leaves no content in a {}px image",
                self.padding_margin, self.image_size
            )));
        }
        let t = self.similarity_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "similarity_threshold {t} outside (0, 1]"
            )));
        }
        Ok(self)
    }

    /// Read a JSON config; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()
    }

    pub fn with_similarity_threshold(self, similarity_threshold: f32) -> Self {
        Self { similarity_threshold, ..self }
    }

    /// Pixels left for the figure once both margins are taken out.
    pub fn content_size(&self) -> f32 {
        self.image_size as f32 - 2.0 * self.padding_margin as f32
    }

    /// Largest per-component signature difference that still matches.
    pub fn tolerance(&self) -> f32 {
        let n = self.image_size as f32;
        n - n * self.similarity_threshold
    }
}

/// Derived tolerance keyed on the inputs it was computed from.
#[derive(Debug, Default, Clone)]
pub struct ToleranceCache {
    key: Option<(u32, f32)>,
    tolerance: f32,
}

impl ToleranceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached tolerance for `config`, recomputed only when the key drifted.
    pub fn tolerance(&mut self, config: &ToleranceConfig) -> f32 {
        let key = (config.image_size, config.similarity_threshold);
        if self.key != Some(key) {
            self.tolerance = config.tolerance();
            debug!(
                image_size = config.image_size,
                threshold = config.similarity_threshold,
                tolerance = self.tolerance,
                "recomputed tolerance"
            );
            self.key = Some(key);
        }
        self.tolerance
    }

    pub fn is_primed(&self) -> bool {
        self.key.is_some()
    }
}
