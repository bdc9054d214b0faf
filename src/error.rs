// Error type for everything that can actually fail.
// "Nothing was drawn" is not in here: that comes back as `None` from the
// recognizer so the per-frame loop never has to handle it as an error.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load template {path}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },

    #[error("no template images found in {0}")]
    NoTemplates(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
