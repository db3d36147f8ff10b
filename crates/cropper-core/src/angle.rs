use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::consts::{AXIS_SNAP_DEVIATION, HALF_TURN_SNAP_OFFSET, QUARTER_TURN_TOLERANCE};

/// Reduce an angle into `[0, 2π]`.
///
/// Values already inside the closed range are returned untouched, so both `0` and
/// `2π` are fixed points. Larger angles reduce to `(0, 2π]`, negative ones to
/// `[0, 2π)`. Non-finite input yields `0`.
pub fn normalize(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    if (0.0..=TAU).contains(&angle) {
        return angle;
    }
    let reduced = angle.rem_euclid(TAU);
    if angle > TAU && reduced == 0.0 {
        TAU
    } else {
        reduced
    }
}

/// Normalize, then snap onto the nearest axis if within one degree.
pub fn snap_to_axis(angle: f64) -> f64 {
    snap_to_axis_within(angle, AXIS_SNAP_DEVIATION)
}

/// Normalize, then snap onto 0, π/2, π, 3π/2 or 2π when strictly closer than
/// `deviation`. The half turn snaps to `π - 0.001`.
pub fn snap_to_axis_within(angle: f64, deviation: f64) -> f64 {
    let angle = normalize(angle);
    let axes = [
        (0.0, 0.0),
        (FRAC_PI_2, FRAC_PI_2),
        (PI, PI - HALF_TURN_SNAP_OFFSET),
        (3.0 * FRAC_PI_2, 3.0 * FRAC_PI_2),
        (TAU, TAU),
    ];
    axes.iter()
        .find(|(axis, _)| (angle - axis).abs() < deviation)
        .map(|&(_, snapped)| snapped)
        .unwrap_or(angle)
}

/// Index of the nearest quarter turn, in `0..4`.
pub fn quarter_turns(angle: f64) -> u8 {
    (normalize(angle) / FRAC_PI_2).round().rem_euclid(4.0) as u8
}

/// Whether `angle` sits on a quarter or three-quarter turn.
pub fn is_sideways(angle: f64) -> bool {
    let angle = normalize(angle);
    (angle - FRAC_PI_2).abs() < QUARTER_TURN_TOLERANCE
        || (angle - 3.0 * FRAC_PI_2).abs() < QUARTER_TURN_TOLERANCE
}

/// Add or remove one quarter turn, landing exactly on a multiple of π/2.
pub fn step_quarter_turn(angle: f64, clockwise: bool) -> f64 {
    let turns = quarter_turns(angle) as i32 + if clockwise { 1 } else { -1 };
    turns.rem_euclid(4) as f64 * FRAC_PI_2
}
