use tracing::debug;

use crate::geometry::{Affine, Point, Rect};

use super::EditSession;

/// Refit the viewport so that it exactly fills `target` (or the current crop box).
///
/// The target is scaled up to fill the max crop region and recentered on the
/// default crop box center. The viewport bounds become the bounding box of the
/// new crop box under the total rotation, and the zoom is scaled by the same
/// factor (times `extra_zoom`). The image point under the target's center stays
/// under the new crop box's center.
///
/// The zoom is capped at the current maximum, then raised to the fill-bounds
/// zoom if needed: the crop box is always fully covered by image content
/// afterwards, even if that widens the zoom range.
pub fn match_viewport(session: &mut EditSession, target: Option<Rect>, extra_zoom: f64) {
    let target = target.unwrap_or(session.crop_box);
    if !target.size.is_valid() {
        return;
    }

    let region = session.max_crop_region;
    let scale = (region.width() / target.width()).min(region.height() / target.height());
    let new_size = target.size.scaled(scale);

    let image_bounds = session.viewport.image_bounds_size;
    let focus = session.viewport.surface_to_image(target.center());
    let normalized_center = Point::new(focus.x / image_bounds.width, focus.y / image_bounds.height);

    session.crop_box = Rect::from_center(session.default_crop_box_center, new_size);

    let total = Affine::rotation(session.total_angle());
    let viewport = &mut session.viewport;
    viewport.bounds_size = Rect::from_origin_size(Point::ZERO, new_size)
        .applying(&total)
        .size;

    let extra = if extra_zoom.is_finite() && extra_zoom > 0.0 {
        extra_zoom
    } else {
        1.0
    };
    let mut zoom = scale * viewport.zoom_scale * extra;
    zoom = zoom.min(viewport.max_zoom_scale);
    zoom = zoom.max(viewport.zoom_scale_to_bounds());
    viewport.expand_zoom_range(zoom);
    viewport.zoom_scale = zoom;

    let offset = viewport.offset_for_normalized_center(normalized_center);
    viewport.content_offset = viewport.safe_content_offset(offset);

    session.manual_zoomed = true;

    debug!(
        crop_box = %session.crop_box,
        zoom = session.viewport.zoom_scale,
        "Matched viewport to crop box"
    );
}
