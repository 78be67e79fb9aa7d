//! Table settings and physics tuning
//!
//! Loaded from JSON. Every section falls back to its defaults, so a settings
//! file only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::WheelLayout;

/// Wheel spin profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelTuning {
    /// Peak angular speed (radians per tick)
    pub max_speed: f32,
    /// Total spin time from spin-up to stop (ms)
    pub spin_duration_ms: f32,
    /// Random spin-up speed range, as a fraction of `max_speed`
    pub spin_scale_min: f32,
    pub spin_scale_max: f32,
}

impl Default for WheelTuning {
    fn default() -> Self {
        Self {
            max_speed: WHEEL_MAX_SPEED,
            spin_duration_ms: WHEEL_SPIN_DURATION_MS,
            spin_scale_min: WHEEL_SPIN_SCALE_MIN,
            spin_scale_max: WHEEL_SPIN_SCALE_MAX,
        }
    }
}

/// Ball body and physical coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    pub radius: f32,
    pub mass: f32,
    /// Bowl gravity strength at the bowl radius
    pub gravity_scale: f32,
    /// Per-tick velocity multiplier from rolling friction (< 1)
    pub friction: f32,
    /// Per-tick velocity multiplier from air drag (< 1)
    pub air_resistance: f32,
    /// Normal velocity kept on a rim bounce, 0 = inelastic, 1 = elastic
    pub restitution: f32,
    /// Tangential acceleration per unit of wheel angular speed
    pub wheel_force: f32,
    /// Launch speed before the random scale (units per ms)
    pub initial_speed: f32,
    pub speed_scale_min: f32,
    pub speed_scale_max: f32,
    /// Bowl gravity normalization distance, as a fraction of the outer radius
    ///
    /// 1.0 gives the textbook `(distance / outer_radius)²` falloff.
    pub bowl_radius_ratio: f32,
    /// Speed under which a ball on a stopped wheel drops into a pocket
    pub rest_speed: f32,
    /// Speed under which velocity is zeroed
    pub rolling_epsilon: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            gravity_scale: GRAVITY_SCALE,
            friction: FRICTION,
            air_resistance: AIR_RESISTANCE,
            restitution: RESTITUTION,
            wheel_force: WHEEL_FORCE,
            initial_speed: BALL_INITIAL_SPEED,
            speed_scale_min: BALL_SPEED_SCALE_MIN,
            speed_scale_max: BALL_SPEED_SCALE_MAX,
            bowl_radius_ratio: BOWL_RADIUS_RATIO,
            rest_speed: REST_SPEED,
            rolling_epsilon: ROLLING_EPSILON,
        }
    }
}

/// Pocket settle animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleTuning {
    /// Time from pocket commit to the result (ms)
    pub duration_ms: f32,
    /// Cubic ease-out window (ms)
    pub ease_ms: f32,
    /// Distance at which the ball snaps onto the pocket center
    pub snap_distance: f32,
    /// Fraction of the remaining distance covered per tick at full ease
    pub ease_step: f32,
    pub wobble_amplitude: f32,
    pub wobble_period_ms: f32,
}

impl Default for SettleTuning {
    fn default() -> Self {
        Self {
            duration_ms: SETTLE_DURATION_MS,
            ease_ms: SETTLE_EASE_MS,
            snap_distance: SETTLE_SNAP_DISTANCE,
            ease_step: SETTLE_EASE_STEP,
            wobble_amplitude: SETTLE_WOBBLE_AMPLITUDE,
            wobble_period_ms: SETTLE_WOBBLE_PERIOD_MS,
        }
    }
}

/// Host loop timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Frame target used when a frame is too long to trust
    pub frame_ms: f32,
    /// Largest physics sub-step
    pub substep_ms: f32,
    /// Frames longer than this are replaced by `frame_ms`
    pub max_frame_ms: f32,
    /// Simulated delay between wheel spin-up and ball launch
    pub launch_delay_ms: f32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_MS,
            substep_ms: SUBSTEP_MS,
            max_frame_ms: MAX_FRAME_MS,
            launch_delay_ms: LAUNCH_DELAY_MS,
        }
    }
}

/// Complete table configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Edge length of the square playing surface
    pub surface_size: f32,
    pub layout: WheelLayout,
    pub wheel: WheelTuning,
    pub ball: BallTuning,
    pub settle: SettleTuning,
    pub timing: TimingSettings,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            surface_size: SURFACE_SIZE,
            layout: WheelLayout::european(),
            wheel: WheelTuning::default(),
            ball: BallTuning::default(),
            settle: SettleTuning::default(),
            timing: TimingSettings::default(),
        }
    }
}

/// Reject non-finite values and values outside `[min, max]`
fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange { field, value })
    }
}

/// Reject non-finite and non-positive values
fn check_positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange { field, value })
    }
}

impl TableSettings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Check every coefficient and the pocket layout
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_positive("surface_size", self.surface_size)?;
        self.layout.validate()?;

        let w = &self.wheel;
        check_range("wheel.max_speed", w.max_speed, 0.0, f32::MAX)?;
        check_positive("wheel.spin_duration_ms", w.spin_duration_ms)?;
        check_range("wheel.spin_scale_min", w.spin_scale_min, 0.0, w.spin_scale_max)?;
        check_range("wheel.spin_scale_max", w.spin_scale_max, w.spin_scale_min, f32::MAX)?;

        let b = &self.ball;
        check_positive("ball.radius", b.radius)?;
        check_positive("ball.mass", b.mass)?;
        check_range("ball.gravity_scale", b.gravity_scale, 0.0, f32::MAX)?;
        check_range("ball.friction", b.friction, 0.0, 1.0)?;
        check_range("ball.air_resistance", b.air_resistance, 0.0, 1.0)?;
        check_range("ball.restitution", b.restitution, 0.0, 1.0)?;
        check_range("ball.wheel_force", b.wheel_force, 0.0, f32::MAX)?;
        check_range("ball.initial_speed", b.initial_speed, 0.0, f32::MAX)?;
        check_range("ball.speed_scale_min", b.speed_scale_min, 0.0, b.speed_scale_max)?;
        check_range("ball.speed_scale_max", b.speed_scale_max, b.speed_scale_min, f32::MAX)?;
        check_positive("ball.bowl_radius_ratio", b.bowl_radius_ratio)?;
        check_positive("ball.rest_speed", b.rest_speed)?;
        check_range("ball.rolling_epsilon", b.rolling_epsilon, 0.0, b.rest_speed)?;

        let s = &self.settle;
        check_positive("settle.duration_ms", s.duration_ms)?;
        check_positive("settle.ease_ms", s.ease_ms)?;
        check_positive("settle.snap_distance", s.snap_distance)?;
        check_range("settle.ease_step", s.ease_step, 0.0, 1.0)?;
        check_range("settle.wobble_amplitude", s.wobble_amplitude, 0.0, f32::MAX)?;
        check_positive("settle.wobble_period_ms", s.wobble_period_ms)?;

        let t = &self.timing;
        check_positive("timing.frame_ms", t.frame_ms)?;
        check_positive("timing.substep_ms", t.substep_ms)?;
        check_range("timing.max_frame_ms", t.max_frame_ms, t.frame_ms, f32::MAX)?;
        check_range("timing.launch_delay_ms", t.launch_delay_ms, 0.0, f32::MAX)?;

        Ok(())
    }
}
