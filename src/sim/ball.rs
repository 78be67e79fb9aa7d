//! The ball: launch, free flight in the bowl, and hand-off to the pocket
//! settle animation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::*;
use crate::settings::{BallTuning, SettleTuning};
use crate::wrap_angle;
use super::collision::{RimContact, inner_rim_collision, outer_rim_collision};
use super::events::{EventSink, TableEvent};
use super::forces::{bowl_gravity, integrate_velocity, wheel_coupling};
use super::pocket::PocketLanding;
use super::wheel::Wheel;

/// Ball lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Resting at the center, waiting for launch
    Idle,
    /// Free flight between the rims
    Flying,
    /// Pocket committed, easing onto the pocket center
    Settling,
    /// Result reported; inert until reset
    Finished,
}

/// Random inputs of a launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchDraws {
    /// Table angle the ball is thrown in at (radians)
    pub start_angle: f32,
    /// Multiplier on the initial speed
    pub speed_scale: f32,
}

impl LaunchDraws {
    pub fn sample(rng: &mut impl Rng, tuning: &BallTuning) -> Self {
        let span = tuning.speed_scale_max - tuning.speed_scale_min;
        Self {
            start_angle: rng.random::<f32>() * TAU,
            speed_scale: tuning.speed_scale_min + rng.random::<f32>() * span,
        }
    }
}

/// The roulette ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Acceleration of the current tick; zero between ticks
    pub accel: Vec2,
    tuning: BallTuning,
    settle: SettleTuning,
    /// Visual spin of the ball texture
    rotation_angle: f32,
    rotation_speed: f32,
    rolling: bool,
    phase: BallPhase,
    landing: Option<PocketLanding>,
}

impl Ball {
    pub fn new(tuning: BallTuning, settle: SettleTuning, center: Vec2) -> Self {
        let mut ball = Self {
            pos: center,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            tuning,
            settle,
            rotation_angle: 0.0,
            rotation_speed: 0.0,
            rolling: false,
            phase: BallPhase::Idle,
            landing: None,
        };
        ball.initialize(center);
        ball
    }

    /// Park the ball at the center, at rest
    pub fn initialize(&mut self, center: Vec2) {
        self.pos = center;
        self.vel = Vec2::ZERO;
        self.accel = Vec2::ZERO;
        self.phase = BallPhase::Idle;
    }

    /// Clear the flight and pocket state; valid from any phase
    pub fn reset(&mut self, center: Vec2) {
        self.initialize(center);
        self.landing = None;
        self.rolling = false;
        self.rotation_speed = 0.0;
        self.rotation_angle = 0.0;
    }

    /// Throw the ball onto the track using random draws
    pub fn launch(&mut self, wheel: &Wheel, rng: &mut impl Rng, sink: &mut impl EventSink) -> bool {
        if self.phase != BallPhase::Idle {
            return false;
        }
        let draws = LaunchDraws::sample(rng, &self.tuning);
        self.launch_with(wheel, draws, sink)
    }

    /// Throw the ball onto the track
    ///
    /// Starts just outside the inner rim, moving tangentially with an outward
    /// kick toward the bowl wall, plus an impulse from a spinning wheel.
    /// Ignored unless idle.
    pub fn launch_with(
        &mut self,
        wheel: &Wheel,
        draws: LaunchDraws,
        sink: &mut impl EventSink,
    ) -> bool {
        if self.phase != BallPhase::Idle {
            return false;
        }

        let (sin, cos) = draws.start_angle.sin_cos();
        let radial = Vec2::new(cos, sin);
        let tangent = Vec2::new(-sin, cos);

        self.pos = wheel.center() + radial * wheel.inner_radius() * BALL_START_RADIUS_RATIO;

        let speed = self.tuning.initial_speed * draws.speed_scale;
        self.vel = tangent * speed + radial * speed * BALL_OUTWARD_RATIO;

        let wheel_speed = wheel.angular_speed();
        if wheel_speed > 0.0 {
            self.vel += tangent * wheel_speed * BALL_WHEEL_IMPULSE;
        }

        self.accel = Vec2::ZERO;
        self.rolling = true;
        self.landing = None;
        self.phase = BallPhase::Flying;

        log::info!(
            "Ball launched at {:.3} rad, speed {:.3}",
            draws.start_angle,
            self.vel.length()
        );
        sink.emit(TableEvent::BallLaunched);
        true
    }

    /// Advance one sub-step of `dt` ms
    pub fn tick(&mut self, dt: f32, wheel: &Wheel, sink: &mut impl EventSink) {
        match self.phase {
            BallPhase::Idle | BallPhase::Finished => {}
            BallPhase::Flying => {
                self.rotation_speed = self.vel.length() * BALL_SPIN_FACTOR;
                self.spin_texture(dt);
                self.fly(dt, wheel, sink);
            }
            BallPhase::Settling => {
                self.rotation_speed *= BALL_SPIN_DECAY;
                self.spin_texture(dt);
                self.settle_into_pocket(dt, sink);
            }
        }
    }

    fn spin_texture(&mut self, dt: f32) {
        self.rotation_angle = wrap_angle(self.rotation_angle + self.rotation_speed * dt);
    }

    fn fly(&mut self, dt: f32, wheel: &Wheel, sink: &mut impl EventSink) {
        let center = wheel.center();
        let offset = self.pos - center;
        let bowl_radius = wheel.outer_radius() * self.tuning.bowl_radius_ratio;

        self.accel = wheel_coupling(offset, wheel.angular_speed(), self.tuning.wheel_force)
            + bowl_gravity(offset, bowl_radius, self.tuning.gravity_scale, dt);

        let step = integrate_velocity(self.vel, self.accel, dt, &self.tuning);
        self.vel = step.velocity;
        self.rolling = step.rolling;

        self.pos += self.vel * dt;

        let radius = self.tuning.radius;
        let restitution = self.tuning.restitution;
        let outer_radius = wheel.outer_radius();
        let inner_radius = wheel.inner_radius();
        if let Some(contact) =
            outer_rim_collision(center, self.pos, self.vel, radius, outer_radius, restitution)
        {
            self.apply_contact(contact, sink);
        }
        if let Some(contact) =
            inner_rim_collision(center, self.pos, self.vel, radius, inner_radius, restitution)
        {
            self.apply_contact(contact, sink);
        }

        self.accel = Vec2::ZERO;

        let at_rest = self.vel.length() < self.tuning.rest_speed;
        if at_rest && !wheel.is_spinning() && self.landing.is_none() {
            let landing = PocketLanding::commit(self.pos, wheel);
            log::info!(
                "Ball landing in pocket {} (number {})",
                landing.pocket_index,
                landing.number
            );
            sink.emit(TableEvent::BallLanded {
                pocket_index: landing.pocket_index,
                volume: LANDING_VOLUME,
            });
            self.landing = Some(landing);
            self.phase = BallPhase::Settling;
        }
    }

    fn apply_contact(&mut self, contact: RimContact, sink: &mut impl EventSink) {
        self.pos = contact.position;
        self.vel = contact.velocity;
        let strength = contact.normal_speed.abs();
        if strength > IMPACT_THRESHOLD {
            sink.emit(TableEvent::Impact {
                rim: contact.rim,
                volume: strength.min(IMPACT_MAX_VOLUME),
            });
        }
    }

    fn settle_into_pocket(&mut self, dt: f32, sink: &mut impl EventSink) {
        let Some(landing) = self.landing.as_mut() else {
            self.phase = BallPhase::Finished;
            return;
        };

        self.pos = landing.settle(self.pos, dt, &self.settle);

        if landing.is_complete(&self.settle) {
            self.pos = landing.finish();
            self.vel = Vec2::ZERO;
            self.rotation_speed = 0.0;
            self.rolling = false;
            self.phase = BallPhase::Finished;

            let result = landing.result();
            log::info!("Ball landed on {} ({})", result.number, result.color.as_str());
            sink.emit(TableEvent::Result(result));
        }
    }

    #[inline]
    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    /// Flying or settling
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, BallPhase::Flying | BallPhase::Settling)
    }

    #[inline]
    pub fn in_pocket(&self) -> bool {
        self.landing.is_some()
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    /// Committed pocket, once the ball has landed
    #[inline]
    pub fn pocket_index(&self) -> Option<usize> {
        self.landing.map(|l| l.pocket_index)
    }

    #[inline]
    pub fn landed_position(&self) -> Option<Vec2> {
        self.landing.map(|l| l.landed_position)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.tuning.radius
    }

    #[inline]
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }
}
