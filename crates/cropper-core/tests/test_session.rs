mod common;

use std::f64::consts::{FRAC_PI_2, PI};
use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;

use common::{
    assert_covered, assert_crop_box_valid, landscape_cropper, landscape_session, square_surface,
    EPS,
};
use cropper_core::aspect::{AspectRatio, DEFAULT_CATALOG};
use cropper_core::config::CropperConfig;
use cropper_core::cropper::{AnimationKind, Cropper};
use cropper_core::error::CropError;
use cropper_core::geometry::{Point, Rect, Size};
use cropper_core::orientation::ImageOrientation;
use cropper_core::session::layout::default_session;
use cropper_core::session::{
    flip, rotate90, set_aspect_ratio, set_aspect_ratio_value, set_straighten_angle,
};

// ---------------------------------------------------------------------------
// Default layout
// ---------------------------------------------------------------------------

#[test]
fn test_default_layout_fits_image_in_region() {
    let s = landscape_session();
    assert!(s.max_crop_region.approx_eq(&Rect::new(20.0, 20.0, 960.0, 960.0), EPS));
    assert!(s.default_crop_box_center.approx_eq(&Point::new(500.0, 500.0), EPS));
    assert!(s.default_crop_box_size.approx_eq(&Size::new(960.0, 720.0), EPS));
    assert!(s.crop_box.approx_eq(&Rect::new(20.0, 140.0, 960.0, 720.0), EPS));
    assert_eq!(s.viewport.zoom_scale, 1.0);
    assert_eq!(s.viewport.max_zoom_scale, 20.0);
    assert!(!s.aspect_ratio_locked);
    assert_eq!(s.aspect_ratio, AspectRatio::FreeForm);
    assert_covered(&s);
}

#[test]
fn test_very_tall_image_starts_from_min_width_strip() {
    let s = default_session(
        square_surface(),
        Size::new(10.0, 4000.0),
        ImageOrientation::Up,
        &CropperConfig::default(),
    );
    assert_abs_diff_eq!(s.crop_box.width(), 20.0, epsilon = EPS);
    assert_abs_diff_eq!(s.crop_box.height(), 960.0, epsilon = EPS);
    assert_crop_box_valid(&s);
    assert_covered(&s);
}

#[test]
fn test_very_wide_image_starts_from_min_height_strip() {
    let s = default_session(
        square_surface(),
        Size::new(4000.0, 10.0),
        ImageOrientation::Up,
        &CropperConfig::default(),
    );
    assert_abs_diff_eq!(s.crop_box.width(), 960.0, epsilon = EPS);
    assert_abs_diff_eq!(s.crop_box.height(), 20.0, epsilon = EPS);
    assert_crop_box_valid(&s);
    assert_covered(&s);
}

#[test]
fn test_invalid_image_size_falls_back_to_min_square() {
    let s = default_session(
        square_surface(),
        Size::new(0.0, -5.0),
        ImageOrientation::Up,
        &CropperConfig::default(),
    );
    assert!(s.crop_box.size.approx_eq(&Size::new(20.0, 20.0), EPS));
    assert!(s.crop_box.center().approx_eq(&Point::new(500.0, 500.0), EPS));
}

#[test]
fn test_safe_crop_box_frame_substitutes_default_for_empty_box() {
    let s = landscape_session();
    let safe = s.safe_crop_box_frame(Rect::new(300.0, 300.0, 0.0, 10.0));
    assert!(safe.approx_eq(&Rect::new(20.0, 140.0, 960.0, 720.0), EPS));
    let nan = s.safe_crop_box_frame(Rect::new(0.0, 0.0, f64::NAN, 10.0));
    assert!(nan.approx_eq(&safe, EPS));
}

#[test]
fn test_safe_crop_box_frame_clamps_into_region() {
    let s = landscape_session();
    // origin left of the region: the box shrinks by the overshoot
    let b = s.safe_crop_box_frame(Rect::new(0.0, 100.0, 300.0, 300.0));
    assert!(b.approx_eq(&Rect::new(20.0, 100.0, 280.0, 300.0), EPS));
    // tiny box grows to the minimum size
    let b = s.safe_crop_box_frame(Rect::new(500.0, 500.0, 5.0, 5.0));
    assert!(b.size.approx_eq(&Size::new(20.0, 20.0), EPS));
    // minimum size at the far edge is pushed back inside
    let b = s.safe_crop_box_frame(Rect::new(975.0, 975.0, 5.0, 5.0));
    assert!(b.approx_eq(&Rect::new(960.0, 960.0, 20.0, 20.0), EPS));
}

// ---------------------------------------------------------------------------
// Aspect ratios
// ---------------------------------------------------------------------------

#[test]
fn test_two_by_three_scenario() {
    let mut s = landscape_session();
    assert!(set_aspect_ratio_value(&mut s, 2.0 / 3.0));
    let b = s.crop_box;
    assert_abs_diff_eq!(b.width() / b.height(), 0.6667, epsilon = 1e-4);
    assert!(b.center().approx_eq(&s.max_crop_region.center(), EPS));
    assert!(b.approx_eq(&Rect::new(180.0, 20.0, 640.0, 960.0), EPS));
    assert!(s.aspect_ratio_locked);
    assert_crop_box_valid(&s);
    assert_covered(&s);
}

#[test]
fn test_invalid_aspect_value_is_ignored() {
    let mut s = landscape_session();
    let before = s.clone();
    assert!(!set_aspect_ratio_value(&mut s, 0.0));
    assert!(!set_aspect_ratio_value(&mut s, -1.0));
    assert!(!set_aspect_ratio_value(&mut s, f64::NAN));
    assert_eq!(s, before);
}

#[test]
fn test_every_catalog_ratio_yields_valid_covered_box() {
    for ratio in DEFAULT_CATALOG {
        let mut s = landscape_session();
        assert!(set_aspect_ratio(&mut s, ratio), "{ratio}");
        assert_crop_box_valid(&s);
        assert_covered(&s);
        if let Some(value) = ratio.value(s.image_size) {
            let b = s.crop_box;
            assert_abs_diff_eq!(b.width() / b.height(), value, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_free_form_only_unlocks() {
    let mut s = landscape_session();
    set_aspect_ratio(&mut s, AspectRatio::Square);
    let locked_box = s.crop_box;
    assert!(set_aspect_ratio(&mut s, AspectRatio::FreeForm));
    assert!(!s.aspect_ratio_locked);
    assert_eq!(s.crop_box, locked_box);
}

#[test]
fn test_original_ratio_follows_rotation() {
    let mut s = landscape_session();
    let mut catalog = DEFAULT_CATALOG.to_vec();
    rotate90(&mut s, true, &mut catalog);
    assert!(set_aspect_ratio(&mut s, AspectRatio::Original));
    let b = s.crop_box;
    assert_abs_diff_eq!(b.width() / b.height(), 0.75, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Rotation, flip, straighten
// ---------------------------------------------------------------------------

#[test]
fn test_rotate90_swaps_crop_box() {
    let mut s = landscape_session();
    let mut catalog = DEFAULT_CATALOG.to_vec();
    rotate90(&mut s, true, &mut catalog);
    assert_eq!(s.rotation_angle, FRAC_PI_2);
    assert!(s.crop_box.approx_eq(&Rect::new(140.0, 20.0, 720.0, 960.0), EPS));
    assert_eq!(catalog[3], AspectRatio::Ratio { width: 16, height: 9 });
    assert_crop_box_valid(&s);
    assert_covered(&s);
}

#[test]
fn test_rotate90_four_times_is_identity() {
    let mut s = landscape_session();
    set_aspect_ratio_value(&mut s, 9.0 / 16.0);
    let value = s.aspect_ratio_value;
    let mut catalog = DEFAULT_CATALOG.to_vec();
    for i in 0..4 {
        rotate90(&mut s, true, &mut catalog);
        assert_covered(&s);
        if i % 2 == 0 {
            assert_abs_diff_eq!(s.aspect_ratio_value, 16.0 / 9.0, epsilon = 1e-12);
        }
    }
    assert_eq!(s.rotation_angle, 0.0);
    assert_eq!(catalog, DEFAULT_CATALOG.to_vec());
    assert_abs_diff_eq!(s.aspect_ratio_value, value, epsilon = 1e-12);
}

#[test]
fn test_rotate90_counter_clockwise() {
    let mut s = landscape_session();
    let mut catalog = DEFAULT_CATALOG.to_vec();
    rotate90(&mut s, false, &mut catalog);
    assert_eq!(s.rotation_angle, 3.0 * FRAC_PI_2);
    rotate90(&mut s, true, &mut catalog);
    assert_eq!(s.rotation_angle, 0.0);
}

#[test]
fn test_flip_twice_restores_orientation_and_angle() {
    let mut s = landscape_session();
    set_straighten_angle(&mut s, 0.2);
    let angle = s.total_angle();
    let orientation = s.image_orientation;

    flip(&mut s, true);
    assert_eq!(s.image_orientation, ImageOrientation::UpMirrored);
    assert_abs_diff_eq!(s.total_angle(), 2.0 * PI - 0.2, epsilon = 1e-9);

    flip(&mut s, true);
    assert_eq!(s.image_orientation, orientation);
    assert_abs_diff_eq!(s.total_angle(), angle, epsilon = 1e-9);
    assert_covered(&s);
}

#[test]
fn test_vertical_flip_adds_half_turn() {
    let mut s = landscape_session();
    flip(&mut s, false);
    assert_eq!(s.image_orientation, ImageOrientation::UpMirrored);
    assert_abs_diff_eq!(s.total_angle(), PI - 0.001, epsilon = 1e-12);
}

#[test]
fn test_flip_mirrors_content_offset() {
    let mut s = landscape_session();
    set_aspect_ratio_value(&mut s, 2.0 / 3.0);
    let v = &mut s.viewport;
    v.content_offset = Point::new(100.0, 0.0);
    let content = v.content_size();
    let bounds = v.bounds_size;
    flip(&mut s, true);
    assert_abs_diff_eq!(
        s.viewport.content_offset.x,
        content.width - bounds.width - 100.0,
        epsilon = EPS
    );
}

#[test]
fn test_straighten_refits_zoom_and_keeps_coverage() {
    let mut s = landscape_session();
    for angle in [0.3, -0.4, 0.05, 0.7853, 0.0] {
        set_straighten_angle(&mut s, angle);
        assert_abs_diff_eq!(s.straighten_angle, angle);
        assert_covered(&s);
        assert!(!s.manual_zoomed);
        assert_abs_diff_eq!(
            s.viewport.zoom_scale,
            s.viewport.zoom_scale_to_bounds(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_straighten_snaps_total_angle() {
    let mut s = landscape_session();
    set_straighten_angle(&mut s, 0.5 * PI / 180.0);
    assert_eq!(s.total_angle(), 0.0);
}

// ---------------------------------------------------------------------------
// Facade: state
// ---------------------------------------------------------------------------

#[test]
fn test_fresh_session_is_in_default_state() {
    let c = landscape_cropper();
    assert!(c.is_in_default_state());
    assert!(!c.is_in_initial_state());
    assert_eq!(c.aspect_ratios(), &DEFAULT_CATALOG[..]);
}

#[test]
fn test_reset_returns_to_default_state() {
    let mut c = landscape_cropper();
    c.set_straighten_angle(0.3);
    c.rotate90(true);
    c.flip(true);
    c.set_aspect_ratio(AspectRatio::Ratio { width: 3, height: 4 });
    assert!(!c.is_in_default_state());

    c.reset();
    assert!(c.is_in_default_state());
    assert_eq!(c.session().image_orientation, ImageOrientation::Up);
    assert_eq!(c.aspect_ratios(), &DEFAULT_CATALOG[..]);
    assert_eq!(c.animation().map(|a| a.kind), Some(AnimationKind::Reset));
}

#[test]
fn test_four_rotations_return_to_default_state() {
    let mut c = landscape_cropper();
    for _ in 0..4 {
        c.rotate90(true);
        c.complete_animation();
    }
    assert!(c.is_in_default_state());
}

#[test]
fn test_save_then_restore_is_equivalent() {
    let mut c = landscape_cropper();
    c.set_straighten_angle(0.25);
    c.set_aspect_ratio(AspectRatio::Ratio { width: 5, height: 7 });
    c.rotate90(false);
    let saved = c.save_state();

    c.reset();
    assert!(!Cropper::is_equivalent_state(&saved, &c.save_state()));

    c.restore_state(&saved, false).unwrap();
    assert!(Cropper::is_equivalent_state(&saved, &c.save_state()));
    assert_eq!(c.aspect_ratios()[3], AspectRatio::Ratio { width: 16, height: 9 });
}

#[test]
fn test_restore_onto_other_surface_is_refused() {
    let mut c = landscape_cropper();
    let mut state = c.save_state();
    state.surface_frame = Rect::new(0.0, 0.0, 800.0, 600.0);
    state.crop_box = Rect::new(100.0, 100.0, 50.0, 50.0);
    let before = c.save_state();

    let err = c.restore_state(&state, true).unwrap_err();
    assert!(matches!(err, CropError::SurfaceMismatch { .. }));
    assert!(c.save_state().is_equivalent(&before));
    assert!(c.animation().is_none());
}

#[test]
fn test_initial_state_is_restored_and_tracked() {
    let mut first = landscape_cropper();
    first.set_aspect_ratio(AspectRatio::Square);
    let state = first.save_state();

    let mut c = Cropper::with_image_size(
        Size::new(4000.0, 3000.0),
        ImageOrientation::Up,
        square_surface(),
        CropperConfig::default(),
        Some(state.clone()),
    );
    assert!(c.is_in_initial_state());
    assert!(!c.is_in_default_state());
    assert_eq!(c.crop_box(), state.crop_box);

    c.flip(true);
    assert!(!c.is_in_initial_state());
}

#[test]
fn test_state_equivalence_tolerance() {
    let c = landscape_cropper();
    let a = c.save_state();
    let mut b = a.clone();
    b.zoom_scale += 5e-5;
    assert!(a.is_equivalent(&b));
    b.zoom_scale += 1e-3;
    assert!(!a.is_equivalent(&b));

    let mut moved = a.clone();
    moved.surface_frame.origin.x += 1e-9;
    assert!(!a.is_equivalent(&moved));
}

// ---------------------------------------------------------------------------
// Facade: interaction
// ---------------------------------------------------------------------------

#[test]
fn test_edge_drag_settles_after_stasis_delay() {
    let mut c = landscape_cropper();
    let t0 = Instant::now();

    assert!(c.begin_edge_drag(Point::new(980.0, 500.0)));
    c.continue_edge_drag(Point::new(880.0, 500.0));
    assert_abs_diff_eq!(c.crop_box().width(), 860.0, epsilon = EPS);

    assert!(c.end_edge_drag_at(t0).is_some());
    assert!(!c.tick(t0 + Duration::from_millis(100)));
    assert_abs_diff_eq!(c.crop_box().width(), 860.0, epsilon = EPS);

    assert!(c.tick(t0 + Duration::from_millis(500)));
    let b = c.crop_box();
    assert!(b.center().approx_eq(&Point::new(500.0, 500.0), EPS));
    assert_abs_diff_eq!(b.width(), 960.0, epsilon = EPS);
    assert_abs_diff_eq!(b.height(), 720.0 * 960.0 / 860.0, epsilon = 1e-6);
    assert_covered(c.session());
    assert_eq!(c.animation().map(|a| a.kind), Some(AnimationKind::MatchViewport));
    assert!(!c.tick(t0 + Duration::from_millis(2000)));
}

#[test]
fn test_new_drag_cancels_pending_settle() {
    let mut c = landscape_cropper();
    let t0 = Instant::now();
    assert!(c.begin_edge_drag(Point::new(980.0, 500.0)));
    c.continue_edge_drag(Point::new(900.0, 500.0));
    c.end_edge_drag_at(t0);
    assert!(c.settle_deadline().is_some());

    let b = c.crop_box();
    assert!(c.begin_edge_drag(Point::new(b.max_x(), 500.0)));
    assert!(c.settle_deadline().is_none());
    assert!(!c.tick(t0 + Duration::from_secs(5)));
}

#[test]
fn test_animation_blocks_interaction() {
    let mut c = landscape_cropper();
    c.set_aspect_ratio_value(1.5);
    assert_eq!(c.animation().map(|a| a.kind), Some(AnimationKind::AspectRatio));

    let b = c.crop_box();
    let on_edge = Point::new(b.max_x(), b.mid_y());
    assert!(!c.begin_edge_drag(on_edge));
    assert!(!c.begin_viewport_gesture());

    c.complete_animation();
    assert!(c.begin_edge_drag(on_edge));
}

#[test]
fn test_drag_outside_ring_does_not_start() {
    let mut c = landscape_cropper();
    assert!(!c.begin_edge_drag(Point::new(500.0, 500.0)));
    assert!(!c.is_dragging());
    assert!(c.end_edge_drag().is_none());
}

#[test]
fn test_viewport_gesture_keeps_coverage() {
    let mut c = landscape_cropper();
    assert!(c.begin_viewport_gesture());
    c.zoom_to(3.0);
    c.scroll_by(Point::new(5000.0, -5000.0));
    c.end_viewport_gesture();
    assert_covered(c.session());
    assert_abs_diff_eq!(c.viewport().zoom_scale, 3.0, epsilon = 1e-9);
    assert!(c.session().manual_zoomed);
}

#[test]
fn test_manual_zoom_survives_small_straighten() {
    let mut c = landscape_cropper();
    c.begin_viewport_gesture();
    c.zoom_to(3.0);
    c.end_viewport_gesture();
    c.complete_animation();

    c.set_straighten_angle(0.05);
    assert_abs_diff_eq!(c.viewport().zoom_scale, 3.0, epsilon = 1e-9);
    assert_covered(c.session());
}

#[test]
fn test_gesture_methods_ignored_without_gesture() {
    let mut c = landscape_cropper();
    let before = c.save_state();
    c.scroll_by(Point::new(100.0, 100.0));
    c.zoom_to(5.0);
    c.end_viewport_gesture();
    assert!(c.save_state().is_equivalent(&before));
}

#[test]
fn test_straighten_after_drag_runs_pending_settle() {
    let mut c = landscape_cropper();
    let t0 = Instant::now();
    assert!(c.begin_edge_drag(Point::new(980.0, 500.0)));
    c.continue_edge_drag(Point::new(580.0, 500.0));
    c.end_edge_drag_at(t0);
    assert_abs_diff_eq!(c.crop_box().width(), 560.0, epsilon = EPS);

    c.set_straighten_angle(0.2);
    assert!(c.settle_deadline().is_none());
    assert!(!c.tick(t0 + Duration::from_secs(5)));

    let b = c.crop_box();
    assert!(b.center().approx_eq(&Point::new(500.0, 500.0), EPS));
    assert_abs_diff_eq!(b.height(), 960.0, epsilon = EPS);
    assert_abs_diff_eq!(b.width(), 560.0 * 960.0 / 720.0, epsilon = 1e-6);
    assert_crop_box_valid(c.session());
    assert_covered(c.session());
}

#[test]
fn test_flip_after_drag_runs_pending_settle() {
    for horizontal in [true, false] {
        let mut c = landscape_cropper();
        let t0 = Instant::now();
        assert!(c.begin_edge_drag(Point::new(980.0, 500.0)));
        c.continue_edge_drag(Point::new(580.0, 500.0));
        c.end_edge_drag_at(t0);

        c.flip(horizontal);
        assert!(c.settle_deadline().is_none());
        let b = c.crop_box();
        assert!(b.center().approx_eq(&Point::new(500.0, 500.0), EPS));
        assert_abs_diff_eq!(b.height(), 960.0, epsilon = EPS);
        if horizontal {
            assert_covered(c.session());
        }

        c.set_straighten_angle(-0.3);
        assert_covered(c.session());
    }
}

#[test]
fn test_aspect_change_after_drag_uses_settled_box() {
    let mut c = landscape_cropper();
    let t0 = Instant::now();
    assert!(c.begin_edge_drag(Point::new(980.0, 500.0)));
    c.continue_edge_drag(Point::new(580.0, 500.0));
    c.end_edge_drag_at(t0);

    assert!(c.set_aspect_ratio(AspectRatio::Square));
    assert!(c.settle_deadline().is_none());
    let b = c.crop_box();
    assert_abs_diff_eq!(b.width(), b.height(), epsilon = EPS);
    assert!(b.center().approx_eq(&Point::new(500.0, 500.0), EPS));
    assert_covered(c.session());
}

#[test]
fn test_missed_drag_keeps_pending_settle() {
    let mut c = landscape_cropper();
    let t0 = Instant::now();
    assert!(c.begin_edge_drag(Point::new(980.0, 500.0)));
    c.continue_edge_drag(Point::new(880.0, 500.0));
    c.end_edge_drag_at(t0);

    assert!(!c.begin_edge_drag(Point::new(500.0, 500.0)));
    assert!(c.settle_deadline().is_some());
    assert!(c.tick(t0 + Duration::from_millis(500)));
}

#[test]
fn test_aspect_change_ends_active_drag() {
    let mut c = landscape_cropper();
    assert!(c.begin_edge_drag(Point::new(980.0, 500.0)));
    assert!(c.set_aspect_ratio(AspectRatio::Square));
    assert!(!c.is_dragging());
    let square = c.crop_box();
    assert!(square.approx_eq(&Rect::new(20.0, 20.0, 960.0, 960.0), EPS));

    c.continue_edge_drag(Point::new(940.0, 500.0));
    assert!(c.crop_box().approx_eq(&square, EPS));

    c.complete_animation();
    c.continue_edge_drag(Point::new(940.0, 500.0));
    assert!(c.crop_box().approx_eq(&square, EPS));
    assert!(c.end_edge_drag().is_none());
}

#[test]
fn test_drag_updates_ignored_while_animating() {
    let mut c = landscape_cropper();
    assert!(c.begin_edge_drag(Point::new(980.0, 500.0)));
    assert!(c.set_aspect_ratio_value(1.5));
    assert!(!c.is_dragging());
    let before = c.crop_box();
    c.continue_edge_drag(Point::new(700.0, 500.0));
    assert!(c.crop_box().approx_eq(&before, EPS));
}
