//! Roulette Sim - physics-driven roulette wheel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (wheel spin, ball physics, pocket resolution)
//! - `settings`: Data-driven tuning and table configuration
//! - `history`: Recent results log

pub mod error;
pub mod history;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use history::SpinHistory;
pub use settings::TableSettings;

use glam::Vec2;
use std::f32::consts::TAU;

/// Table configuration constants
pub mod consts {
    /// Host frame target (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Physics sub-step. The bowl gravity term is scaled by dt twice, so coarser
    /// steps leave the ball jittering on the inner rail above the rest threshold.
    pub const SUBSTEP_MS: f32 = 5.0;
    /// Frames longer than this are treated as a single frame target
    pub const MAX_FRAME_MS: f32 = 100.0;
    /// Delay between the wheel spin-up and the ball launch
    pub const LAUNCH_DELAY_MS: f32 = 800.0;

    /// Playing surface (square) edge length
    pub const SURFACE_SIZE: f32 = 600.0;
    /// Outer rim radius as a fraction of the surface size
    pub const OUTER_RADIUS_RATIO: f32 = 0.45;
    /// Inner rim radius as a fraction of the outer radius
    pub const INNER_RADIUS_RATIO: f32 = 0.8;
    /// Pocket ring radius as a fraction of the outer radius
    pub const POCKET_RADIUS_RATIO: f32 = 0.85;

    /// Wheel defaults
    pub const WHEEL_MAX_SPEED: f32 = 0.1; // radians per tick
    pub const WHEEL_SPIN_DURATION_MS: f32 = 6000.0;
    pub const WHEEL_SPIN_SCALE_MIN: f32 = 0.7;
    pub const WHEEL_SPIN_SCALE_MAX: f32 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_MASS: f32 = 1.0;
    pub const BALL_INITIAL_SPEED: f32 = 1.2; // units per ms
    pub const BALL_START_RADIUS_RATIO: f32 = 1.1; // of the inner radius
    pub const BALL_OUTWARD_RATIO: f32 = 0.5; // outward share of the launch speed
    pub const BALL_WHEEL_IMPULSE: f32 = 5.0;
    pub const BALL_SPEED_SCALE_MIN: f32 = 0.8;
    pub const BALL_SPEED_SCALE_MAX: f32 = 1.2;

    /// Physical coefficients
    pub const GRAVITY_SCALE: f32 = 0.0005;
    pub const FRICTION: f32 = 0.995;
    pub const AIR_RESISTANCE: f32 = 0.999;
    pub const RESTITUTION: f32 = 0.6;
    pub const WHEEL_FORCE: f32 = 0.08;
    pub const BOWL_RADIUS_RATIO: f32 = 0.9;
    /// Below this speed the ball counts as at rest
    pub const REST_SPEED: f32 = 0.01;
    /// Below this speed velocity is zeroed
    pub const ROLLING_EPSILON: f32 = 0.001;
    /// Collisions weaker than this along the normal make no sound
    pub const IMPACT_THRESHOLD: f32 = 0.01;
    pub const IMPACT_MAX_VOLUME: f32 = 0.5;
    pub const LANDING_VOLUME: f32 = 0.2;

    /// Ball spin visual (rotation speed per unit of linear speed)
    pub const BALL_SPIN_FACTOR: f32 = 0.1;
    pub const BALL_SPIN_DECAY: f32 = 0.95;

    /// Settle animation
    pub const SETTLE_DURATION_MS: f32 = 800.0;
    pub const SETTLE_EASE_MS: f32 = 500.0;
    pub const SETTLE_SNAP_DISTANCE: f32 = 0.5;
    pub const SETTLE_EASE_STEP: f32 = 0.1;
    pub const SETTLE_WOBBLE_AMPLITUDE: f32 = 0.5;
    pub const SETTLE_WOBBLE_PERIOD_MS: f32 = 50.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;
    use super::*;

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!(wrap_angle(-1e-9) < TAU);
        assert_eq!(wrap_angle(TAU), 0.0);
    }

    #[test]
    fn test_polar_round_trip() {
        let p = polar_to_cartesian(100.0, PI / 3.0);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 100.0).abs() < 1e-3);
        assert!((theta - PI / 3.0).abs() < 1e-5);
    }
}
