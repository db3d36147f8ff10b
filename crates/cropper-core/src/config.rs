use serde::{Deserialize, Serialize};

use crate::aspect::{AspectRatio, DEFAULT_CATALOG};
use crate::consts::{
    DEFAULT_CONTENT_INSET, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_HOT_AREA, DEFAULT_LONG_SIDE_MAX,
    DEFAULT_MAX_ZOOM_SCALE, DEFAULT_MIN_CROP_BOX_SIZE, DEFAULT_SHORT_SIDE_MAX,
    DEFAULT_STASIS_DELAY_MS,
};
use crate::geometry::Insets;

/// Session-wide settings. Every field has a default, so a TOML file only needs
/// the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// RGBA color of the crop box chrome. Carried for front ends; the engine never reads it.
    pub highlight_color: [u8; 4],
    /// Smallest crop box width and height, in surface points.
    pub min_crop_box_size: f64,
    /// Width of the drag ring around the crop box border.
    pub hot_area: f64,
    pub max_zoom_scale: f64,
    /// Idle time after an edge drag before the viewport settles.
    pub stasis_delay_ms: u64,
    pub aspect_ratios: Vec<AspectRatio>,
    pub content_insets: Insets,
    pub render: RenderConfig,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            min_crop_box_size: DEFAULT_MIN_CROP_BOX_SIZE,
            hot_area: DEFAULT_HOT_AREA,
            max_zoom_scale: DEFAULT_MAX_ZOOM_SCALE,
            stasis_delay_ms: DEFAULT_STASIS_DELAY_MS,
            aspect_ratios: DEFAULT_CATALOG.to_vec(),
            content_insets: Insets::uniform(DEFAULT_CONTENT_INSET),
            render: RenderConfig::default(),
        }
    }
}

/// Output size limits for the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum pixels along the output's short side.
    pub short_side_max: f64,
    /// Maximum pixels along the output's long side.
    pub long_side_max: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            short_side_max: DEFAULT_SHORT_SIDE_MAX,
            long_side_max: DEFAULT_LONG_SIDE_MAX,
        }
    }
}

impl RenderConfig {
    /// Widest output allowed for a crop box of the given proportions.
    pub fn max_output_width(&self, crop_width: f64, crop_height: f64) -> f64 {
        if crop_width > crop_height {
            (self.short_side_max * crop_width / crop_height).min(self.long_side_max)
        } else if self.short_side_max * crop_height / crop_width > self.long_side_max {
            self.long_side_max * crop_width / crop_height
        } else {
            self.short_side_max
        }
    }
}
