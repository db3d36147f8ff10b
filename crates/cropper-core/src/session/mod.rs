//! Mutable editing state and the geometry operations that act on it.
//!
//! Each submodule is a set of free functions taking `&mut EditSession`; the
//! [`crate::cropper::Cropper`] facade sequences them in response to input.

pub mod edge;
pub mod layout;
pub mod matching;
pub mod ratio;
pub mod rotation;

use crate::angle;
use crate::aspect::AspectRatio;
use crate::consts::DEGENERATE_EXTENT;
use crate::geometry::{Affine, Point, Rect, Size};
use crate::orientation::ImageOrientation;
use crate::viewport::Viewport;

pub use edge::{CropBoxEdge, EdgeDrag};
pub use layout::reset_to_default_layout;
pub use matching::match_viewport;
pub use ratio::{set_aspect_ratio, set_aspect_ratio_value};
pub use rotation::{flip, rotate90, set_straighten_angle};

/// Everything the geometry engines read and write during one crop session.
#[derive(Clone, Debug, PartialEq)]
pub struct EditSession {
    /// Frame of the editing surface. States only restore onto an identical frame.
    pub surface: Rect,
    /// Upright image size (stored orientation already applied).
    pub image_size: Size,
    /// Area available to the crop box, in surface coordinates.
    pub max_crop_region: Rect,
    pub default_crop_box_center: Point,
    pub default_crop_box_size: Size,
    pub crop_box: Rect,
    pub viewport: Viewport,
    pub straighten_angle: f64,
    pub rotation_angle: f64,
    pub flip_angle: f64,
    pub image_orientation: ImageOrientation,
    pub aspect_ratio_locked: bool,
    pub aspect_ratio: AspectRatio,
    pub aspect_ratio_value: f64,
    /// Set once the viewport zoom was chosen by a gesture or a viewport match
    /// rather than derived from the crop box.
    pub manual_zoomed: bool,
    pub min_crop_box_size: f64,
    pub max_zoom_scale: f64,
}

impl EditSession {
    /// Straighten, rotation step and flip combined, normalized and axis-snapped.
    pub fn total_angle(&self) -> f64 {
        angle::snap_to_axis(self.straighten_angle + self.rotation_angle + self.flip_angle)
    }

    /// Point the viewport transform at the current total angle.
    pub fn apply_total_rotation(&mut self) {
        self.viewport.transform = Affine::rotation(self.total_angle());
    }

    /// Locked ratio, if the lock is on and the stored value is usable.
    pub fn locked_ratio(&self) -> Option<f64> {
        let r = self.aspect_ratio_value;
        (self.aspect_ratio_locked && r.is_finite() && r > 0.0).then_some(r)
    }

    /// Write the crop box through [`EditSession::safe_crop_box_frame`].
    pub fn set_crop_box(&mut self, frame: Rect) {
        self.crop_box = self.safe_crop_box_frame(frame);
    }

    /// Clamp a candidate crop box into the max crop region.
    ///
    /// Degenerate sizes fall back to the default box. Otherwise the origin is
    /// pulled onto the region (shrinking the box by the same amount), the size is
    /// capped by the region and then floored at the minimum size, and finally the
    /// origin is shifted back so the whole box stays inside.
    pub fn safe_crop_box_frame(&self, frame: Rect) -> Rect {
        let mut frame = frame;
        if !(frame.size.width >= DEGENERATE_EXTENT && frame.size.height >= DEGENERATE_EXTENT) {
            return Rect::from_center(self.default_crop_box_center, self.default_crop_box_size);
        }

        let region = self.max_crop_region;

        let x_delta = frame.origin.x - region.min_x();
        frame.origin.x = frame.origin.x.max(region.min_x());
        if x_delta < -DEGENERATE_EXTENT {
            frame.size.width += x_delta;
        }

        let y_delta = frame.origin.y - region.min_y();
        frame.origin.y = frame.origin.y.max(region.min_y());
        if y_delta < -DEGENERATE_EXTENT {
            frame.size.height += y_delta;
        }

        frame.size.width = frame.size.width.min(region.max_x() - frame.origin.x);
        frame.size.height = frame.size.height.min(region.max_y() - frame.origin.y);

        frame.size.width = frame.size.width.max(self.min_crop_box_size);
        frame.size.height = frame.size.height.max(self.min_crop_box_size);

        frame.origin.x = frame
            .origin
            .x
            .min(region.max_x() - frame.size.width)
            .max(region.min_x());
        frame.origin.y = frame
            .origin
            .y
            .min(region.max_y() - frame.size.height)
            .max(region.min_y());

        frame
    }

    /// Image center in surface coordinates, relative to the default crop box center.
    pub fn photo_translation(&self) -> Point {
        let center = self.viewport.image_center_in_surface();
        Point::new(
            center.x - self.default_crop_box_center.x,
            center.y - self.default_crop_box_center.y,
        )
    }

    /// Upright image size as seen after the current quarter-turn rotation.
    pub fn rotated_image_size(&self) -> Size {
        if angle::is_sideways(self.rotation_angle) {
            self.image_size.transposed()
        } else {
            self.image_size
        }
    }
}
