//! Read-only geometry snapshots for renderers
//!
//! Captured once per frame. Pocket angles are in the wheel's own frame;
//! add the wheel angle to place them on the table.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallPhase};
use super::table::TablePhase;
use super::wheel::{PocketColor, Wheel};

/// One pocket slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PocketView {
    pub index: usize,
    pub number: u8,
    pub color: PocketColor,
    /// Divider at the start of the slot
    pub start_angle: f32,
    /// Middle of the slot, where the number label goes
    pub center_angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    pub angle: f32,
    pub angular_speed: f32,
    pub spinning: bool,
    pub center: Vec2,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub pocket_radius: f32,
    pub section_angle: f32,
    pub pockets: Vec<PocketView>,
}

impl WheelSnapshot {
    pub fn capture(wheel: &Wheel) -> Self {
        let section = wheel.section_angle();
        let geometry = wheel.geometry();
        let pockets = wheel
            .numbers()
            .iter()
            .enumerate()
            .map(|(index, &number)| PocketView {
                index,
                number,
                color: PocketColor::of(number),
                start_angle: index as f32 * section,
                center_angle: index as f32 * section + section / 2.0,
            })
            .collect();

        Self {
            angle: wheel.angle(),
            angular_speed: wheel.angular_speed(),
            spinning: wheel.is_spinning(),
            center: geometry.center,
            outer_radius: geometry.outer_radius,
            inner_radius: geometry.inner_radius,
            pocket_radius: geometry.pocket_radius,
            section_angle: section,
            pockets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub position: Vec2,
    pub radius: f32,
    /// Texture rotation (radians)
    pub rotation_angle: f32,
    pub phase: BallPhase,
    pub pocket_index: Option<usize>,
}

impl BallSnapshot {
    pub fn capture(ball: &Ball) -> Self {
        Self {
            position: ball.pos,
            radius: ball.radius(),
            rotation_angle: ball.rotation_angle(),
            phase: ball.phase(),
            pocket_index: ball.pocket_index(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: TablePhase,
    pub clock_ms: f32,
    pub wheel: WheelSnapshot,
    pub ball: BallSnapshot,
}
