//! The roulette wheel: pocket layout, rim geometry, and spin profile
//!
//! The wheel advances its angle by its current speed once per tick (a fixed
//! angular step, not scaled by dt) and decelerates along a two-phase curve
//! keyed to the elapsed spin time.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::settings::WheelTuning;
use crate::wrap_angle;

/// Red numbers on a standard wheel
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// European single-zero order, clockwise from zero
const EUROPEAN_NUMBERS: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Pocket color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PocketColor {
    Green,
    Red,
    Black,
}

impl PocketColor {
    /// Color of a displayed number
    pub fn of(number: u8) -> Self {
        if number == 0 {
            PocketColor::Green
        } else if RED_NUMBERS.contains(&number) {
            PocketColor::Red
        } else {
            PocketColor::Black
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PocketColor::Green => "green",
            PocketColor::Red => "red",
            PocketColor::Black => "black",
        }
    }
}

/// Ordered pocket numbers, pocket index -> displayed number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelLayout {
    pub numbers: Vec<u8>,
}

impl Default for WheelLayout {
    fn default() -> Self {
        Self::european()
    }
}

impl WheelLayout {
    /// Standard 37-pocket European wheel
    pub fn european() -> Self {
        Self {
            numbers: EUROPEAN_NUMBERS.to_vec(),
        }
    }

    #[inline]
    pub fn pocket_count(&self) -> usize {
        self.numbers.len()
    }

    /// Angular width of one pocket
    #[inline]
    pub fn section_angle(&self) -> f32 {
        std::f32::consts::TAU / self.numbers.len().max(1) as f32
    }

    /// Displayed number of a pocket
    pub fn number(&self, index: usize) -> Option<u8> {
        self.numbers.get(index).copied()
    }

    pub fn color(&self, index: usize) -> Option<PocketColor> {
        self.number(index).map(PocketColor::of)
    }

    /// Reject empty layouts and repeated numbers
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.numbers.is_empty() {
            return Err(SettingsError::EmptyLayout);
        }
        let mut seen = [false; 256];
        for &n in &self.numbers {
            if seen[n as usize] {
                return Err(SettingsError::DuplicatePocket { number: n });
            }
            seen[n as usize] = true;
        }
        Ok(())
    }
}

/// Rim geometry, fixed until the surface is resized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelGeometry {
    pub center: Vec2,
    pub outer_radius: f32,
    pub inner_radius: f32,
    /// Radius of the colored pocket ring (rendering only)
    pub pocket_radius: f32,
}

impl WheelGeometry {
    /// Derive all radii from the playing surface edge length
    pub fn from_surface(surface_size: f32) -> Self {
        let outer_radius = surface_size * OUTER_RADIUS_RATIO;
        Self {
            center: Vec2::splat(surface_size / 2.0),
            outer_radius,
            inner_radius: outer_radius * INNER_RADIUS_RATIO,
            pocket_radius: outer_radius * POCKET_RADIUS_RATIO,
        }
    }
}

/// Wheel spin state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelPhase {
    Idle,
    Spinning,
}

/// The spinning wheel
#[derive(Debug, Clone)]
pub struct Wheel {
    layout: WheelLayout,
    tuning: WheelTuning,
    geometry: WheelGeometry,
    /// Rotation (radians, [0, 2π))
    angle: f32,
    /// Radians per tick
    angular_speed: f32,
    phase: WheelPhase,
    spin_start_ms: f32,
}

impl Wheel {
    pub fn new(layout: WheelLayout, tuning: WheelTuning, surface_size: f32) -> Self {
        Self {
            layout,
            tuning,
            geometry: WheelGeometry::from_surface(surface_size),
            angle: 0.0,
            angular_speed: 0.0,
            phase: WheelPhase::Idle,
            spin_start_ms: 0.0,
        }
    }

    /// Start spinning at a random fraction of the peak speed
    ///
    /// Ignored unless idle. Returns whether the spin started.
    pub fn spin(&mut self, now_ms: f32, rng: &mut impl Rng) -> bool {
        if self.phase != WheelPhase::Idle {
            return false;
        }
        let span = self.tuning.spin_scale_max - self.tuning.spin_scale_min;
        let scale = self.tuning.spin_scale_min + rng.random::<f32>() * span;
        self.spin_with_scale(now_ms, scale)
    }

    /// Start spinning at `scale × max_speed`
    pub fn spin_with_scale(&mut self, now_ms: f32, scale: f32) -> bool {
        if self.phase != WheelPhase::Idle {
            return false;
        }
        self.angular_speed = self.tuning.max_speed * scale;
        self.spin_start_ms = now_ms;
        self.phase = WheelPhase::Spinning;
        log::debug!("Wheel spin: speed {:.4} rad/tick", self.angular_speed);
        true
    }

    /// Advance one tick at simulated time `now_ms`
    ///
    /// Returns true on the tick the wheel comes to a stop.
    pub fn tick(&mut self, now_ms: f32) -> bool {
        if self.phase != WheelPhase::Spinning {
            return false;
        }

        self.angle = wrap_angle(self.angle + self.angular_speed);

        let max = self.tuning.max_speed;
        let duration = self.tuning.spin_duration_ms;
        let last_window = duration / 3.0;
        let elapsed = now_ms - self.spin_start_ms;

        if elapsed < duration * 2.0 / 3.0 {
            // Mild, near-linear slowdown
            self.angular_speed = max * (1.0 - elapsed / (2.0 * duration));
            false
        } else {
            let remaining = duration - elapsed;
            if remaining > 0.0 {
                let t = remaining / last_window;
                self.angular_speed = max * 0.7 * t * t;
                false
            } else {
                self.angular_speed = 0.0;
                self.phase = WheelPhase::Idle;
                log::debug!("Wheel stopped at angle {:.4}", self.angle);
                true
            }
        }
    }

    /// Stop and zero the wheel from any state
    pub fn reset(&mut self) {
        self.angle = 0.0;
        self.angular_speed = 0.0;
        self.phase = WheelPhase::Idle;
        self.spin_start_ms = 0.0;
    }

    /// Re-derive rim geometry for a new surface size
    pub fn resize(&mut self, surface_size: f32) {
        self.geometry = WheelGeometry::from_surface(surface_size);
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.phase == WheelPhase::Spinning
    }

    #[inline]
    pub fn phase(&self) -> WheelPhase {
        self.phase
    }

    #[inline]
    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.geometry.center
    }

    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.geometry.outer_radius
    }

    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.geometry.inner_radius
    }

    #[inline]
    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    #[inline]
    pub fn numbers(&self) -> &[u8] {
        &self.layout.numbers
    }

    #[inline]
    pub fn pocket_count(&self) -> usize {
        self.layout.pocket_count()
    }

    #[inline]
    pub fn section_angle(&self) -> f32 {
        self.layout.section_angle()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::TAU;
    use super::*;

    fn wheel() -> Wheel {
        Wheel::new(WheelLayout::european(), WheelTuning::default(), SURFACE_SIZE)
    }

    #[test]
    fn test_european_layout() {
        let layout = WheelLayout::european();
        assert_eq!(layout.pocket_count(), 37);
        assert_eq!(layout.number(0), Some(0));
        assert_eq!(layout.number(36), Some(26));
        assert_eq!(layout.color(0), Some(PocketColor::Green));
        assert_eq!(layout.color(1), Some(PocketColor::Red)); // 32
        assert_eq!(layout.color(2), Some(PocketColor::Black)); // 15
        assert!((layout.section_angle() - TAU / 37.0).abs() < 1e-7);
        layout.validate().unwrap();
    }

    #[test]
    fn test_geometry_from_surface() {
        let g = WheelGeometry::from_surface(600.0);
        assert!((g.outer_radius - 270.0).abs() < 1e-3);
        assert!((g.inner_radius - 216.0).abs() < 1e-3);
        assert_eq!(g.center, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_spin_only_from_idle() {
        let mut w = wheel();
        assert!(w.spin_with_scale(0.0, 1.0));
        assert!(w.is_spinning());
        assert!(!w.spin_with_scale(10.0, 0.7));
        assert!((w.angular_speed() - WHEEL_MAX_SPEED).abs() < 1e-7);
    }

    #[test]
    fn test_spin_draw_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let mut w = wheel();
            assert!(w.spin(0.0, &mut rng));
            let s = w.angular_speed();
            assert!(s >= WHEEL_MAX_SPEED * 0.7 - 1e-7 && s <= WHEEL_MAX_SPEED + 1e-7);
        }
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut w = wheel();
        assert!(!w.tick(100.0));
        assert_eq!(w.angle(), 0.0);
    }

    #[test]
    fn test_deceleration_profile() {
        let mut w = wheel();
        w.spin_with_scale(0.0, 1.0);

        // Phase A: speed = max * (1 - elapsed / 12000)
        w.tick(3000.0);
        assert!((w.angular_speed() - 0.1 * 0.75).abs() < 1e-6);

        // Phase B: speed = max * 0.7 * (remaining / 2000)^2
        w.tick(5000.0);
        assert!((w.angular_speed() - 0.1 * 0.7 * 0.25).abs() < 1e-6);
        assert!(w.is_spinning());

        // Stop
        assert!(w.tick(6000.0));
        assert_eq!(w.angular_speed(), 0.0);
        assert!(!w.is_spinning());
        assert!(!w.tick(6100.0));
    }

    #[test]
    fn test_angle_stays_wrapped() {
        let mut w = wheel();
        w.spin_with_scale(0.0, 1.0);
        let mut now = 0.0;
        while w.is_spinning() {
            now += 1000.0 / 60.0;
            w.tick(now);
            assert!(w.angle() >= 0.0 && w.angle() < TAU);
        }
    }

    #[test]
    fn test_reset_from_spinning() {
        let mut w = wheel();
        w.spin_with_scale(0.0, 1.0);
        w.tick(16.0);
        w.reset();
        assert_eq!(w.angle(), 0.0);
        assert_eq!(w.angular_speed(), 0.0);
        assert_eq!(w.phase(), WheelPhase::Idle);
    }

    #[test]
    fn test_resize_rederives_radii() {
        let mut w = wheel();
        w.resize(800.0);
        assert!((w.outer_radius() - 360.0).abs() < 1e-3);
        assert!((w.inner_radius() - 288.0).abs() < 1e-3);
    }
}
