/// Tolerance used when comparing two crop states field by field.
pub const STATE_EPSILON: f64 = 1e-4;

/// Crop boxes narrower or shorter than this are treated as uninitialized.
pub const DEGENERATE_EXTENT: f64 = f64::EPSILON;

/// Smallest width or height a crop box may take, in surface points.
pub const DEFAULT_MIN_CROP_BOX_SIZE: f64 = 20.0;

/// Width of the touch zone around the crop box border, in surface points.
/// Half of it lies outside the box, half inside.
pub const DEFAULT_HOT_AREA: f64 = 50.0;

/// Default inset between the surface edge and the max crop region.
pub const DEFAULT_CONTENT_INSET: f64 = 20.0;

/// Upper zoom limit of a freshly laid out viewport.
pub const DEFAULT_MAX_ZOOM_SCALE: f64 = 20.0;

/// Output short side limit in pixels.
pub const DEFAULT_SHORT_SIDE_MAX: f64 = 1280.0;

/// Output long side limit in pixels (4x the short side).
pub const DEFAULT_LONG_SIDE_MAX: f64 = 5120.0;

/// Idle time before a drag settles the viewport, in milliseconds.
pub const DEFAULT_STASIS_DELAY_MS: u64 = 500;

/// Duration reported for viewport match / rotate / reset animations, in milliseconds.
pub const ANIMATION_DURATION_MS: u64 = 250;

/// Highlight color of the crop box chrome (RGBA).
pub const DEFAULT_HIGHLIGHT_COLOR: [u8; 4] = [249, 214, 74, 255];

/// Angles within this distance of an axis snap onto it (one degree).
pub const AXIS_SNAP_DEVIATION: f64 = std::f64::consts::PI / 180.0;

/// A half-turn snaps to `PI - HALF_TURN_SNAP_OFFSET` instead of exactly `PI`, so a
/// renderer never sees an exact 180° rotation whose direction is ambiguous.
pub const HALF_TURN_SNAP_OFFSET: f64 = 0.001;

/// Tolerance when deciding whether a rotation step is a quarter or three-quarter turn.
pub const QUARTER_TURN_TOLERANCE: f64 = 0.001;

/// Minimum output pixel count (w*h) to rasterize rows in parallel with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Bytes per pixel of the RGBA8 output buffer.
pub const OUTPUT_CHANNEL_COUNT: usize = 4;
