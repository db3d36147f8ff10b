use std::f64::consts::PI;

use tracing::{debug, info};

use crate::angle;
use crate::aspect::AspectRatio;
use crate::geometry::{Point, Rect, Size};

use super::EditSession;

/// Set the straighten component and refit the viewport around the crop box.
///
/// The visible content center is kept. The zoom snaps back to the fill-bounds
/// zoom unless the user zoomed in manually and the content still overflows the
/// new bounds on both axes.
pub fn set_straighten_angle(session: &mut EditSession, radians: f64) {
    session.straighten_angle = if radians.is_finite() { radians } else { 0.0 };
    session.apply_total_rotation();

    let rotated = Rect::from_origin_size(Point::ZERO, session.crop_box.size)
        .applying(&session.viewport.transform)
        .size;

    let viewport = &mut session.viewport;
    let normalized_center = viewport.normalized_visible_center();
    let content_center = viewport.visible_content_center();

    viewport.bounds_size = rotated;
    viewport.content_offset = Point::new(
        content_center.x - rotated.width / 2.0,
        content_center.y - rotated.height / 2.0,
    );

    let content = viewport.content_size();
    let should_scale = content.width / rotated.width <= 1.0 || content.height / rotated.height <= 1.0;
    if !session.manual_zoomed || should_scale {
        let fill = viewport.zoom_scale_to_bounds();
        viewport.min_zoom_scale = fill;
        viewport.expand_zoom_range(fill);
        viewport.zoom_scale = fill;
        viewport.content_offset = viewport.offset_for_normalized_center(normalized_center);
        session.manual_zoomed = false;
    }

    viewport.content_offset = viewport.safe_content_offset(viewport.content_offset);
}

/// Turn the photo by a quarter turn.
///
/// The crop box is swapped to the other orientation and scaled to fill the max
/// crop region; the zoom grows by the same factor (widening the zoom range if
/// needed). Every entry of `catalog` and the selected aspect ratio are rotated,
/// and a locked ratio value is inverted.
pub fn rotate90(session: &mut EditSession, clockwise: bool, catalog: &mut [AspectRatio]) {
    let normalized_center = session.viewport.normalized_visible_center();

    session.rotation_angle = angle::step_quarter_turn(session.rotation_angle, clockwise);
    session.apply_total_rotation();

    let region = session.max_crop_region;
    let r = session.crop_box;
    let scale = (region.width() / r.height()).min(region.height() / r.width());
    let size = Size::new(r.height() * scale, r.width() * scale);
    session.crop_box = Rect::from_center(session.default_crop_box_center, size);

    let viewport = &mut session.viewport;
    viewport.bounds_size = Rect::from_origin_size(Point::ZERO, size)
        .applying(&viewport.transform)
        .size;

    let zoom = (viewport.zoom_scale * scale).max(viewport.zoom_scale_to_bounds());
    viewport.expand_zoom_range(zoom);
    viewport.zoom_scale = zoom;

    let offset = viewport.offset_for_normalized_center(normalized_center);
    viewport.content_offset = viewport.safe_content_offset(offset);

    for ratio in catalog.iter_mut() {
        *ratio = ratio.rotated();
    }
    session.aspect_ratio = session.aspect_ratio.rotated();
    if session.aspect_ratio_locked {
        session.aspect_ratio_value = 1.0 / session.aspect_ratio_value;
    }

    info!(
        clockwise,
        rotation = session.rotation_angle,
        crop_box = %session.crop_box,
        "Rotated a quarter turn"
    );
}

/// Mirror the photo horizontally or vertically.
///
/// Pixels are untouched: the image orientation swaps for its mirrored
/// counterpart and the flip component is chosen so the total angle becomes
/// `-total` (horizontal) or `π - total` (vertical).
pub fn flip(session: &mut EditSession, horizontal: bool) {
    let total = session.total_angle();

    let viewport = &mut session.viewport;
    let content = viewport.content_size();
    viewport.content_offset.x = content.width - viewport.bounds_size.width - viewport.content_offset.x;

    if horizontal {
        session.flip_angle += -2.0 * total;
    } else {
        session.flip_angle += PI - 2.0 * total;
    }
    session.image_orientation = session.image_orientation.mirrored();
    session.apply_total_rotation();

    debug!(
        horizontal,
        orientation = ?session.image_orientation,
        flip_angle = session.flip_angle,
        "Flipped"
    );
}
