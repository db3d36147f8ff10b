use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aspect::AspectRatio;
use crate::consts::STATE_EPSILON;
use crate::error::{CropError, Result};
use crate::geometry::{Affine, Point, Rect, Size};
use crate::orientation::ImageOrientation;
use crate::session::EditSession;

/// Snapshot of everything needed to reproduce a crop.
///
/// Positions are only meaningful for the surface the state was captured on,
/// so restoring onto a surface of another frame is refused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropState {
    pub surface_frame: Rect,
    /// Total rotation: straighten + rotation step + flip, normalized and snapped.
    pub angle: f64,
    pub rotation_angle: f64,
    pub straighten_angle: f64,
    pub flip_angle: f64,
    pub image_orientation: ImageOrientation,
    pub viewport_transform: Affine,
    pub viewport_center: Point,
    /// Viewport bounds; the origin is the content offset.
    pub viewport_bounds: Rect,
    pub content_offset: Point,
    pub min_zoom_scale: f64,
    pub max_zoom_scale: f64,
    pub zoom_scale: f64,
    pub crop_box: Rect,
    #[serde(default)]
    pub aspect_ratio_locked: bool,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default = "default_aspect_ratio_value")]
    pub aspect_ratio_value: f64,
    /// Image center relative to the default crop box center, in surface points.
    pub image_translation: Point,
    /// Zoom applied to the image, as a transform.
    pub image_transform: Affine,
    /// Image size at zoom 1.
    pub image_bounds_size: Size,
}

fn default_aspect_ratio_value() -> f64 {
    1.0
}

impl CropState {
    pub fn capture(session: &EditSession) -> Self {
        let viewport = &session.viewport;
        Self {
            surface_frame: session.surface,
            angle: session.total_angle(),
            rotation_angle: session.rotation_angle,
            straighten_angle: session.straighten_angle,
            flip_angle: session.flip_angle,
            image_orientation: session.image_orientation,
            viewport_transform: viewport.transform,
            viewport_center: viewport.center,
            viewport_bounds: viewport.bounds(),
            content_offset: viewport.content_offset,
            min_zoom_scale: viewport.min_zoom_scale,
            max_zoom_scale: viewport.max_zoom_scale,
            zoom_scale: viewport.zoom_scale,
            crop_box: session.crop_box,
            aspect_ratio_locked: session.aspect_ratio_locked,
            aspect_ratio: session.aspect_ratio,
            aspect_ratio_value: session.aspect_ratio_value,
            image_translation: session.photo_translation(),
            image_transform: Affine::scale(viewport.zoom_scale, viewport.zoom_scale),
            image_bounds_size: viewport.image_bounds_size,
        }
    }

    /// Write this state back into `session`.
    ///
    /// Fails with [`CropError::SurfaceMismatch`], leaving the session untouched,
    /// when the surface frames differ.
    pub fn restore_into(&self, session: &mut EditSession) -> Result<()> {
        if self.surface_frame != session.surface {
            warn!(
                expected = %self.surface_frame,
                actual = %session.surface,
                "Refusing to restore a crop state captured for another surface"
            );
            return Err(CropError::SurfaceMismatch {
                expected: self.surface_frame,
                actual: session.surface,
            });
        }

        session.rotation_angle = self.rotation_angle;
        session.straighten_angle = self.straighten_angle;
        session.flip_angle = self.flip_angle;
        session.image_orientation = self.image_orientation;

        let viewport = &mut session.viewport;
        viewport.min_zoom_scale = self.min_zoom_scale;
        viewport.max_zoom_scale = self.max_zoom_scale;
        viewport.zoom_scale = self.zoom_scale;
        viewport.transform = self.viewport_transform;
        viewport.bounds_size = self.viewport_bounds.size;
        viewport.content_offset = self.content_offset;
        viewport.center = self.viewport_center;
        if self.image_bounds_size.is_valid() {
            viewport.image_bounds_size = self.image_bounds_size;
        }

        session.crop_box = self.crop_box;
        session.aspect_ratio_locked = self.aspect_ratio_locked;
        session.aspect_ratio = self.aspect_ratio;
        session.aspect_ratio_value = self.aspect_ratio_value;

        info!(crop_box = %self.crop_box, angle = self.angle, "Restored crop state");
        Ok(())
    }

    /// Same visual crop: identical surface frame, every other field within 1e-4.
    pub fn is_equivalent(&self, other: &CropState) -> bool {
        let eps = STATE_EPSILON;
        let close = |a: f64, b: f64| (a - b).abs() <= eps;

        self.surface_frame == other.surface_frame
            && close(self.angle, other.angle)
            && close(self.rotation_angle, other.rotation_angle)
            && close(self.straighten_angle, other.straighten_angle)
            && close(self.flip_angle, other.flip_angle)
            && self.image_orientation == other.image_orientation
            && self.viewport_transform.approx_eq(&other.viewport_transform, eps)
            && self.viewport_center.approx_eq(&other.viewport_center, eps)
            && self.viewport_bounds.approx_eq(&other.viewport_bounds, eps)
            && self.content_offset.approx_eq(&other.content_offset, eps)
            && close(self.min_zoom_scale, other.min_zoom_scale)
            && close(self.max_zoom_scale, other.max_zoom_scale)
            && close(self.zoom_scale, other.zoom_scale)
            && self.crop_box.approx_eq(&other.crop_box, eps)
            && self.aspect_ratio_locked == other.aspect_ratio_locked
            && self.aspect_ratio == other.aspect_ratio
            && close(self.aspect_ratio_value, other.aspect_ratio_value)
            && self.image_translation.approx_eq(&other.image_translation, eps)
            && self.image_transform.approx_eq(&other.image_transform, eps)
            && self.image_bounds_size.approx_eq(&other.image_bounds_size, eps)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
