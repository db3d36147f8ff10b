#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbaImage};

use cropper_core::config::CropperConfig;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::{Rect, Size};
use cropper_core::orientation::ImageOrientation;
use cropper_core::session::layout::default_session;
use cropper_core::session::EditSession;

pub const EPS: f64 = 1e-6;

/// 1000x1000 surface at the origin.
pub fn square_surface() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 1000.0)
}

/// 4000x3000 landscape photo session on a 1000x1000 surface.
pub fn landscape_session() -> EditSession {
    default_session(
        square_surface(),
        Size::new(4000.0, 3000.0),
        ImageOrientation::Up,
        &CropperConfig::default(),
    )
}

pub fn landscape_cropper() -> Cropper {
    Cropper::with_image_size(
        Size::new(4000.0, 3000.0),
        ImageOrientation::Up,
        square_surface(),
        CropperConfig::default(),
        None,
    )
}

/// Crop box inside the max crop region and at least the minimum size.
pub fn assert_crop_box_valid(session: &EditSession) {
    let b = session.crop_box;
    let min = session.min_crop_box_size;
    assert!(b.width() >= min - EPS, "width {} below minimum", b.width());
    assert!(b.height() >= min - EPS, "height {} below minimum", b.height());
    assert!(
        session.max_crop_region.contains_rect(&b, 1e-6),
        "crop box {b} escapes region {}",
        session.max_crop_region
    );
}

/// Image content covers the whole crop box.
pub fn assert_covered(session: &EditSession) {
    assert!(
        session.viewport.covers(&session.crop_box, 1e-6),
        "crop box {} not covered by image content",
        session.crop_box
    );
}

/// Image where every pixel encodes its own coordinates: R = x, G = y.
pub fn coordinate_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]));
    DynamicImage::ImageRgba8(img)
}
