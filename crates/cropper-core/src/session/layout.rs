use tracing::{debug, warn};

use crate::aspect::AspectRatio;
use crate::config::CropperConfig;
use crate::geometry::{Affine, Point, Rect, Size};
use crate::orientation::ImageOrientation;
use crate::viewport::Viewport;

use super::matching::match_viewport;
use super::EditSession;

/// Build a session laid out for `image_size` (upright) on `surface`.
pub fn default_session(
    surface: Rect,
    image_size: Size,
    orientation: ImageOrientation,
    config: &CropperConfig,
) -> EditSession {
    let mut session = EditSession {
        surface,
        image_size,
        max_crop_region: Rect::ZERO,
        default_crop_box_center: Point::ZERO,
        default_crop_box_size: Size::ZERO,
        crop_box: Rect::ZERO,
        viewport: Viewport::default(),
        straighten_angle: 0.0,
        rotation_angle: 0.0,
        flip_angle: 0.0,
        image_orientation: orientation,
        aspect_ratio_locked: false,
        aspect_ratio: AspectRatio::FreeForm,
        aspect_ratio_value: 1.0,
        manual_zoomed: false,
        min_crop_box_size: config.min_crop_box_size,
        max_zoom_scale: config.max_zoom_scale,
    };
    reset_to_default_layout(&mut session, orientation, config);
    session
}

/// Max crop region for a surface: its local bounds minus the content insets.
///
/// A surface too small for the insets gets a min-size region at its center.
pub fn max_crop_region(surface: &Rect, config: &CropperConfig) -> Rect {
    let local = Rect::new(0.0, 0.0, surface.width(), surface.height());
    let region = config.content_insets.inset_rect(&local);
    let min = config.min_crop_box_size;
    if region.width() >= min && region.height() >= min {
        return region;
    }
    warn!(surface = %surface, "Surface smaller than its content insets, using a minimal crop region");
    Rect::from_center(
        local.center(),
        Size::new(region.width().max(min), region.height().max(min)),
    )
}

/// Largest size with the image's proportions that fits in `region`, or a
/// min-size square when the image size is unusable.
pub fn fitted_image_size(image_size: Size, region: &Rect, min_size: f64) -> Size {
    if !image_size.is_valid() {
        warn!(
            width = image_size.width,
            height = image_size.height,
            "Invalid image size, falling back to a minimal square"
        );
        return Size::new(min_size, min_size);
    }
    let scale_w = image_size.width / region.width();
    let scale_h = image_size.height / region.height();
    let scale = scale_w.max(scale_h);
    Size::new(image_size.width / scale, image_size.height / scale)
}

/// Put the session back to the state of a freshly opened image: image fitted
/// into the max crop region at zoom 1, no rotation, unlocked free-form crop box.
pub fn reset_to_default_layout(
    session: &mut EditSession,
    orientation: ImageOrientation,
    config: &CropperConfig,
) {
    let region = max_crop_region(&session.surface, config);
    let min = config.min_crop_box_size;

    session.max_crop_region = region;
    session.default_crop_box_center = region.center();
    session.default_crop_box_size = fitted_image_size(session.image_size, &region, min);
    session.min_crop_box_size = min;
    session.max_zoom_scale = config.max_zoom_scale;

    let default_size = session.default_crop_box_size;
    session.viewport = Viewport {
        center: session.default_crop_box_center,
        bounds_size: default_size,
        content_offset: Point::ZERO,
        zoom_scale: 1.0,
        min_zoom_scale: 1.0,
        max_zoom_scale: config.max_zoom_scale,
        transform: Affine::IDENTITY,
        image_bounds_size: default_size,
    };
    session.crop_box = Rect::from_center(session.default_crop_box_center, default_size);

    session.straighten_angle = 0.0;
    session.rotation_angle = 0.0;
    session.flip_angle = 0.0;
    session.image_orientation = orientation;
    session.aspect_ratio_locked = false;
    session.aspect_ratio = AspectRatio::FreeForm;
    session.aspect_ratio_value = 1.0;
    session.manual_zoomed = false;

    let image = session.image_size;
    if image.is_valid() {
        if image.aspect() < min / region.height() {
            debug!("Very tall image, starting from a minimal-width strip");
            session.set_crop_box(Rect::new(
                region.mid_x() - min / 2.0,
                region.min_y(),
                min,
                region.height(),
            ));
            match_viewport(session, None, 1.0);
        } else if image.height / image.width < min / region.width() {
            debug!("Very wide image, starting from a minimal-height strip");
            session.set_crop_box(Rect::new(
                region.min_x(),
                region.mid_y() - min / 2.0,
                region.width(),
                min,
            ));
            match_viewport(session, None, 1.0);
        }
    }
}
