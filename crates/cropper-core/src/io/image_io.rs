use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::{debug, warn};

use crate::error::Result;
use crate::orientation::ImageOrientation;
use crate::render::SourceImage;

/// Decode an image file, keeping its pixels in stored order and capturing the
/// EXIF orientation (Up when absent or unreadable).
pub fn load_source_image(path: &Path) -> Result<SourceImage> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;

    let orientation = match decoder.orientation() {
        Ok(o) => ImageOrientation::from_exif(o.to_exif()).unwrap_or_default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable orientation, assuming upright");
            ImageOrientation::Up
        }
    };

    let pixels = DynamicImage::from_decoder(decoder)?;
    debug!(
        path = %path.display(),
        width = pixels.width(),
        height = pixels.height(),
        orientation = ?orientation,
        "Loaded source image"
    );
    Ok(SourceImage::new(pixels, orientation))
}

/// Save an image, choosing format from file extension.
/// JPEG has no alpha channel, so it gets an RGB copy.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => DynamicImage::ImageRgb8(image.to_rgb8()).save(path)?,
        _ => image.save(path)?,
    }
    debug!(path = %path.display(), "Saved image");
    Ok(())
}
