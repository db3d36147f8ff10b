use tracing::{info, warn};

use crate::aspect::AspectRatio;
use crate::geometry::{Rect, Size};

use super::matching::match_viewport;
use super::EditSession;

/// Lock the crop box to `value` (width / height) and grow it to the largest box
/// of that ratio inside the max crop region.
///
/// Returns `false`, changing nothing, for non-positive or non-finite values.
pub fn set_aspect_ratio_value(session: &mut EditSession, value: f64) -> bool {
    if !(value.is_finite() && value > 0.0) {
        warn!(value, "Ignoring invalid aspect ratio value");
        return false;
    }

    session.aspect_ratio_locked = true;
    session.aspect_ratio_value = value;

    let region = session.max_crop_region;
    let center = session.default_crop_box_center;
    let height = region.width() / value;
    let target = if height <= region.height() {
        Rect::from_center(center, Size::new(region.width(), height))
    } else {
        Rect::from_center(center, Size::new(region.height() * value, region.height()))
    };
    let target = session.safe_crop_box_frame(target);

    // Extra zoom: how much the target exceeds the box of the new ratio that
    // encloses the current crop box.
    let current = session.crop_box.size;
    let enclosing = if current.aspect() > value {
        Size::new(current.width, current.width / value)
    } else {
        Size::new(current.height * value, current.height)
    };
    let extra_zoom = (target.width() / enclosing.width).max(target.height() / enclosing.height);

    match_viewport(session, Some(target), extra_zoom);
    true
}

/// Select an aspect ratio from the catalog.
///
/// `Original` follows the current quarter-turn rotation: on a sideways photo the
/// image's width and height swap. `FreeForm` only unlocks and leaves the box as
/// is. Returns `false` when the ratio has no usable value.
pub fn set_aspect_ratio(session: &mut EditSession, ratio: AspectRatio) -> bool {
    if ratio == AspectRatio::FreeForm {
        session.aspect_ratio = ratio;
        session.aspect_ratio_locked = false;
        info!("Aspect ratio unlocked");
        return true;
    }

    let Some(value) = ratio.value(session.rotated_image_size()) else {
        warn!(ratio = %ratio, "Aspect ratio has no usable value");
        return false;
    };
    if !set_aspect_ratio_value(session, value) {
        return false;
    }
    session.aspect_ratio = ratio;
    info!(ratio = %ratio, value, crop_box = %session.crop_box, "Aspect ratio set");
    true
}
