//! Pocket resolution: which pocket the ball stopped over, and the settle
//! animation that carries it to the pocket center before the result fires.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::polar_to_cartesian;
use crate::settings::SettleTuning;
use super::events::SpinResult;
use super::wheel::{PocketColor, Wheel};

/// Pocket under `position`, in the frame of a wheel rotated by `wheel_angle`
///
/// Always in `0..pocket_count`; an index pushed past the last pocket by
/// rounding at the wrap boundary belongs to pocket 0.
pub fn pocket_index_at(
    position: Vec2,
    center: Vec2,
    wheel_angle: f32,
    pocket_count: usize,
) -> usize {
    let count = pocket_count.max(1);
    let offset = position - center;
    let mut raw = offset.y.atan2(offset.x);
    if raw < 0.0 {
        raw += TAU;
    }
    let adjusted = (raw - wheel_angle + TAU) % TAU;
    let section = TAU / count as f32;
    let index = (adjusted / section).floor().max(0.0) as usize;
    if index >= count { 0 } else { index }
}

/// Center of a pocket's slot in table coordinates
pub fn pocket_center(wheel: &Wheel, pocket_index: usize) -> Vec2 {
    let section = wheel.section_angle();
    let theta = pocket_index as f32 * section + section / 2.0 + wheel.angle();
    let radius = (wheel.outer_radius() + wheel.inner_radius()) / 2.0;
    wheel.center() + polar_to_cartesian(radius, theta)
}

/// A committed pocket and the progress of the settle animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PocketLanding {
    pub pocket_index: usize,
    pub number: u8,
    pub color: PocketColor,
    /// Exact pocket center the ball settles onto. Fixed at commit.
    pub landed_position: Vec2,
    /// Time since commit (ms)
    pub settle_elapsed: f32,
    pub final_position_reached: bool,
}

impl PocketLanding {
    /// Resolve the pocket for a ball at rest at `position`
    pub fn commit(position: Vec2, wheel: &Wheel) -> Self {
        let pocket_index =
            pocket_index_at(position, wheel.center(), wheel.angle(), wheel.pocket_count());
        let number = wheel.layout().number(pocket_index).unwrap_or(0);
        Self {
            pocket_index,
            number,
            color: PocketColor::of(number),
            landed_position: pocket_center(wheel, pocket_index),
            settle_elapsed: 0.0,
            final_position_reached: false,
        }
    }

    /// Advance the settle animation; returns the ball's new position
    ///
    /// Cubic ease-out toward the pocket center with a decaying wobble on both
    /// axes. Snaps once within the snap distance.
    pub fn settle(&mut self, position: Vec2, dt: f32, tuning: &SettleTuning) -> Vec2 {
        self.settle_elapsed += dt;
        if self.final_position_reached {
            return self.landed_position;
        }

        let delta = self.landed_position - position;
        if delta.length() > tuning.snap_distance {
            let progress = (self.settle_elapsed / tuning.ease_ms).min(1.0);
            let ease = 1.0 - (1.0 - progress).powi(3);
            let wobble = (self.settle_elapsed / tuning.wobble_period_ms).sin()
                * (1.0 - progress)
                * tuning.wobble_amplitude;
            position + delta * ease * tuning.ease_step + Vec2::splat(wobble)
        } else {
            self.final_position_reached = true;
            self.landed_position
        }
    }

    /// Settle time is up
    #[inline]
    pub fn is_complete(&self, tuning: &SettleTuning) -> bool {
        self.settle_elapsed >= tuning.duration_ms
    }

    /// Force the ball onto the pocket center; returns that position
    pub fn finish(&mut self) -> Vec2 {
        self.final_position_reached = true;
        self.landed_position
    }

    pub fn result(&self) -> SpinResult {
        SpinResult {
            number: self.number,
            pocket_index: self.pocket_index,
            color: self.color,
        }
    }
}
