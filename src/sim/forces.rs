//! Force terms and velocity integration for the ball
//!
//! Each term returns an acceleration snapshot; the ball sums them and hands
//! the total to [`integrate_velocity`]. Nothing here mutates ball state.

use glam::Vec2;

use crate::settings::BallTuning;

/// Tangential push the spinning wheel gives the ball
///
/// `offset` is the ball position relative to the wheel center. Not scaled by
/// dt. Zero when the ball sits exactly on the center.
#[inline]
pub fn wheel_coupling(offset: Vec2, wheel_speed: f32, wheel_force: f32) -> Vec2 {
    let radial = offset.normalize_or_zero();
    Vec2::new(-radial.y, radial.x) * wheel_speed * wheel_force
}

/// Inward pull of the bowl, quadratic in normalized distance
///
/// Already scaled by `dt` here and again during integration; the tuning
/// constants were chosen against that double scaling.
#[inline]
pub fn bowl_gravity(offset: Vec2, bowl_radius: f32, gravity_scale: f32, dt: f32) -> Vec2 {
    let dist = offset.length();
    if dist == 0.0 || bowl_radius <= 0.0 {
        return Vec2::ZERO;
    }
    let ratio = dist / bowl_radius;
    -(offset / dist) * gravity_scale * ratio * ratio * dt
}

/// Velocity after one sub-step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityStep {
    pub velocity: Vec2,
    /// False once the ball has slowed below the rolling epsilon
    pub rolling: bool,
}

/// Integrate acceleration, then apply air resistance and friction decay
pub fn integrate_velocity(
    velocity: Vec2,
    accel: Vec2,
    dt: f32,
    tuning: &BallTuning,
) -> VelocityStep {
    let mut v = velocity + accel * dt;
    v *= tuning.air_resistance;
    v *= tuning.friction;

    if v.length() < tuning.rolling_epsilon {
        VelocityStep {
            velocity: Vec2::ZERO,
            rolling: false,
        }
    } else {
        VelocityStep {
            velocity: v,
            rolling: true,
        }
    }
}
