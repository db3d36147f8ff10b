//! Controller-facing facade over one crop session.
//!
//! A front end forwards input here (drag points, scroll and zoom deltas, button
//! presses, clock ticks) and reads back the crop box and viewport to draw.

use std::time::{Duration, Instant};

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::angle;
use crate::aspect::AspectRatio;
use crate::config::CropperConfig;
use crate::consts::ANIMATION_DURATION_MS;
use crate::error::Result;
use crate::geometry::{Point, Rect, Size};
use crate::orientation::ImageOrientation;
use crate::render::{render_crop, SourceImage};
use crate::session::{self, layout, EdgeDrag, EditSession};
use crate::stasis::{Stasis, StasisHandle};
use crate::state::CropState;
use crate::viewport::Viewport;

/// What a front end should be animating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    MatchViewport,
    AspectRatio,
    Rotate,
    Reset,
    Restore,
}

/// An animation the front end is playing. Drags and viewport gestures are
/// ignored until [`Cropper::complete_animation`] is called.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    pub kind: AnimationKind,
    pub duration: Duration,
}

/// Deferred work run by the settle timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleAction {
    MatchViewport,
}

pub struct Cropper {
    session: EditSession,
    source_orientation: ImageOrientation,
    config: CropperConfig,
    catalog: Vec<AspectRatio>,
    drag: Option<EdgeDrag>,
    viewport_gesture: bool,
    stasis: Stasis<SettleAction>,
    default_state: CropState,
    initial_state: Option<CropState>,
    animation: Option<Animation>,
}

impl Cropper {
    /// Open a session for `image` on `surface`, optionally restoring a saved state.
    pub fn load(
        image: &SourceImage,
        surface: Rect,
        config: CropperConfig,
        initial_state: Option<CropState>,
    ) -> Self {
        Self::with_image_size(
            image.display_size(),
            image.orientation,
            surface,
            config,
            initial_state,
        )
    }

    /// Like [`Cropper::load`], from the upright image size alone.
    pub fn with_image_size(
        image_size: Size,
        orientation: ImageOrientation,
        surface: Rect,
        config: CropperConfig,
        initial_state: Option<CropState>,
    ) -> Self {
        let session = layout::default_session(surface, image_size, orientation, &config);
        let default_state = CropState::capture(&session);
        let stasis = Stasis::new(Duration::from_millis(config.stasis_delay_ms));
        let catalog = config.aspect_ratios.clone();

        let mut cropper = Self {
            session,
            source_orientation: orientation,
            config,
            catalog,
            drag: None,
            viewport_gesture: false,
            stasis,
            default_state,
            initial_state: None,
            animation: None,
        };

        info!(
            surface = %surface,
            width = image_size.width,
            height = image_size.height,
            crop_box = %cropper.session.crop_box,
            "Crop session loaded"
        );

        if let Some(state) = initial_state {
            if let Err(e) = cropper.restore_state(&state, false) {
                warn!(error = %e, "Initial crop state not applied");
            }
            cropper.initial_state = Some(state);
        }
        cropper
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn crop_box(&self) -> Rect {
        self.session.crop_box
    }

    pub fn viewport(&self) -> &Viewport {
        &self.session.viewport
    }

    pub fn total_angle(&self) -> f64 {
        self.session.total_angle()
    }

    /// Aspect ratio catalog, rotated along with the photo.
    pub fn aspect_ratios(&self) -> &[AspectRatio] {
        &self.catalog
    }

    pub fn animation(&self) -> Option<Animation> {
        self.animation
    }

    /// The front end finished the current animation; interaction resumes.
    pub fn complete_animation(&mut self) {
        self.animation = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn settle_deadline(&self) -> Option<Instant> {
        self.stasis.deadline()
    }

    fn start_animation(&mut self, kind: AnimationKind) {
        self.animation = Some(Animation {
            kind,
            duration: Duration::from_millis(ANIMATION_DURATION_MS),
        });
    }

    fn interaction_blocked(&self) -> bool {
        self.animation.is_some()
    }

    /// Run a pending settle action now instead of waiting for the timer.
    /// Buttons go through here so they never see an unmatched crop box.
    fn flush_settle(&mut self) {
        if let Some(SettleAction::MatchViewport) = self.stasis.cancel() {
            debug!("Pending settle flushed");
            session::match_viewport(&mut self.session, None, 1.0);
        }
    }

    // --- Edge drags ---

    /// Start resizing the crop box. Returns `false` when the touch is outside the
    /// drag ring or an animation is playing.
    pub fn begin_edge_drag(&mut self, point: Point) -> bool {
        if self.interaction_blocked() {
            return false;
        }
        self.drag = EdgeDrag::begin(&self.session, point, self.config.hot_area);
        if let Some(drag) = &self.drag {
            self.stasis.cancel();
            debug!(edge = ?drag.edge, "Edge drag started");
        }
        self.drag.is_some()
    }

    pub fn continue_edge_drag(&mut self, point: Point) {
        if self.interaction_blocked() {
            return;
        }
        if let Some(drag) = self.drag {
            drag.update(&mut self.session, point);
        }
    }

    /// Finish the drag; the viewport settles after the stasis delay.
    pub fn end_edge_drag(&mut self) -> Option<StasisHandle> {
        self.end_edge_drag_at(Instant::now())
    }

    pub fn end_edge_drag_at(&mut self, now: Instant) -> Option<StasisHandle> {
        self.drag.take()?;
        Some(self.stasis.schedule(SettleAction::MatchViewport, now))
    }

    /// Run the settle action if it is due. Returns whether anything ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.stasis.fire_due(now) {
            Some(SettleAction::MatchViewport) => {
                session::match_viewport(&mut self.session, None, 1.0);
                self.start_animation(AnimationKind::MatchViewport);
                true
            }
            None => false,
        }
    }

    /// Drop a pending settle action.
    pub fn cancel_settle(&mut self) {
        self.stasis.cancel();
    }

    // --- Viewport gestures ---

    /// Start panning or pinching the photo. Returns `false` while animating.
    pub fn begin_viewport_gesture(&mut self) -> bool {
        if self.interaction_blocked() {
            return false;
        }
        self.stasis.cancel();
        self.viewport_gesture = true;
        true
    }

    /// Pan by `delta` content points, clamped to the content edges.
    pub fn scroll_by(&mut self, delta: Point) {
        if !self.viewport_gesture {
            return;
        }
        let viewport = &mut self.session.viewport;
        let offset = viewport.content_offset.offset(delta.x, delta.y);
        viewport.content_offset = viewport.safe_content_offset(offset);
    }

    /// Zoom about the visible center, within the current zoom range.
    pub fn zoom_to(&mut self, scale: f64) {
        if !self.viewport_gesture {
            return;
        }
        let viewport = &mut self.session.viewport;
        let center = viewport.normalized_visible_center();
        viewport.set_zoom_scale(scale);
        let offset = viewport.offset_for_normalized_center(center);
        viewport.content_offset = viewport.safe_content_offset(offset);
    }

    /// Finish the gesture and refit the viewport to the crop box.
    pub fn end_viewport_gesture(&mut self) {
        if !self.viewport_gesture {
            return;
        }
        self.viewport_gesture = false;
        session::match_viewport(&mut self.session, None, 1.0);
        self.start_animation(AnimationKind::MatchViewport);
    }

    // --- Buttons ---

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> bool {
        self.flush_settle();
        self.drag = None;
        let applied = session::set_aspect_ratio(&mut self.session, ratio);
        if applied && ratio.is_locked() {
            self.start_animation(AnimationKind::AspectRatio);
        }
        applied
    }

    pub fn set_aspect_ratio_value(&mut self, value: f64) -> bool {
        self.flush_settle();
        self.drag = None;
        let applied = session::set_aspect_ratio_value(&mut self.session, value);
        if applied {
            self.start_animation(AnimationKind::AspectRatio);
        }
        applied
    }

    pub fn rotate90(&mut self, clockwise: bool) {
        self.flush_settle();
        self.drag = None;
        session::rotate90(&mut self.session, clockwise, &mut self.catalog);
        self.start_animation(AnimationKind::Rotate);
    }

    pub fn flip(&mut self, horizontal: bool) {
        self.flush_settle();
        session::flip(&mut self.session, horizontal);
    }

    pub fn set_straighten_angle(&mut self, radians: f64) {
        self.flush_settle();
        session::set_straighten_angle(&mut self.session, radians);
    }

    /// Back to the default layout: original orientation, no rotation, free form.
    pub fn reset(&mut self) {
        self.stasis.cancel();
        self.drag = None;
        self.viewport_gesture = false;
        layout::reset_to_default_layout(&mut self.session, self.source_orientation, &self.config);
        self.catalog = self.config.aspect_ratios.clone();
        self.default_state = CropState::capture(&self.session);
        self.start_animation(AnimationKind::Reset);
        info!("Crop session reset");
    }

    // --- State ---

    pub fn save_state(&self) -> CropState {
        CropState::capture(&self.session)
    }

    /// Restore a saved state. Refused with an error when it was captured on a
    /// surface with another frame.
    pub fn restore_state(&mut self, state: &CropState, animated: bool) -> Result<()> {
        state.restore_into(&mut self.session)?;
        self.stasis.cancel();
        self.drag = None;
        self.catalog = self.config.aspect_ratios.clone();
        if angle::is_sideways(state.rotation_angle) {
            for ratio in self.catalog.iter_mut() {
                *ratio = ratio.rotated();
            }
        }
        if animated {
            self.start_animation(AnimationKind::Restore);
        }
        Ok(())
    }

    pub fn is_equivalent_state(a: &CropState, b: &CropState) -> bool {
        a.is_equivalent(b)
    }

    /// Whether nothing has changed since the default layout.
    pub fn is_in_default_state(&self) -> bool {
        self.save_state().is_equivalent(&self.default_state)
    }

    /// Whether the session still matches the state it was loaded with.
    /// Always `false` without an initial state.
    pub fn is_in_initial_state(&self) -> bool {
        self.initial_state
            .as_ref()
            .is_some_and(|s| self.save_state().is_equivalent(s))
    }

    /// Render the current crop from `image`.
    pub fn render(&self, image: &SourceImage) -> DynamicImage {
        render_crop(image, &self.save_state(), &self.config.render)
    }
}
