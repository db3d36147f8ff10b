pub mod config;
pub mod inspect;
pub mod plan;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cropper_core::config::CropperConfig;
use cropper_core::io::load_config;

/// Config from `path`, or the defaults.
pub fn load_config_or_default(path: Option<&PathBuf>) -> Result<CropperConfig> {
    match path {
        Some(p) => load_config(p).with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(CropperConfig::default()),
    }
}

pub fn describe(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
