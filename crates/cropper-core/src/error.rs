use thiserror::Error;

use crate::geometry::Rect;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid crop state: {0}")]
    StateFormat(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    #[error("Config serialization failed: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Crop state was captured for a {expected} surface, current surface is {actual}")]
    SurfaceMismatch { expected: Rect, actual: Rect },

    #[error("Render worker error: {0}")]
    RenderWorker(String),
}

pub type Result<T> = std::result::Result<T, CropError>;
