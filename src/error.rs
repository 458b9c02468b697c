use std::path::PathBuf;

/// Errors surfaced by cat construction, asset loading and record parsing.
///
/// Missing *optional* assets never produce one of these; they are logged and
/// skipped where they are looked up.
#[derive(thiserror::Error, Debug)]
pub enum CatError {
    #[error("asset not found: {path}")]
    MissingAsset { path: String },

    #[error("no base idle frames for body type '{body_type}' in {dir}")]
    NoBaseFrames { body_type: String, dir: String },

    #[error("invalid customization: {reason}")]
    InvalidCustomization { reason: String },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed cat record: {0}")]
    Record(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CatError {
    /// True for errors that mean "the file isn't there" rather than "the
    /// file is broken". Callers use this to decide between skip and fail.
    pub fn is_missing(&self) -> bool {
        matches!(self, CatError::MissingAsset { .. })
    }
}
