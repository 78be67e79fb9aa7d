//! A roulette table session: wheel, ball, seeded RNG, and event sink
//!
//! The host drives the table with [`Table::advance`] once per frame; the
//! table splits each frame into fixed sub-steps and ticks the wheel, then
//! the ball, on every one of them.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::settings::TableSettings;
use super::ball::Ball;
use super::events::{EventSink, SpinResult, TableEvent};
use super::snapshot::{BallSnapshot, TableSnapshot, WheelSnapshot};
use super::wheel::Wheel;

/// Round state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TablePhase {
    /// Ready to spin
    Idle,
    /// Wheel spinning and/or ball in play
    Spinning,
    /// Result reported
    Finished,
}

/// Forwards events and notes whether the result went past
struct ResultWatch<'a, S: EventSink> {
    inner: &'a mut S,
    result: Option<SpinResult>,
}

impl<S: EventSink> EventSink for ResultWatch<'_, S> {
    fn emit(&mut self, event: TableEvent) {
        if let TableEvent::Result(result) = event {
            self.result = Some(result);
        }
        self.inner.emit(event);
    }
}

/// One game session. Created once, reset between spins.
pub struct Table<S: EventSink> {
    settings: TableSettings,
    wheel: Wheel,
    ball: Ball,
    rng: Pcg32,
    sink: S,
    seed: u64,
    phase: TablePhase,
    /// Simulated time since the current round started (ms)
    clock_ms: f32,
    /// Pending ball launch
    launch_at_ms: Option<f32>,
    last_result: Option<SpinResult>,
    spins: u32,
}

impl<S: EventSink> Table<S> {
    /// Create a table. The seed fixes every random draw of the session.
    ///
    /// Fails if the settings do not validate.
    pub fn new(settings: TableSettings, seed: u64, sink: S) -> Result<Self, SettingsError> {
        settings.validate()?;
        let wheel = Wheel::new(
            settings.layout.clone(),
            settings.wheel.clone(),
            settings.surface_size,
        );
        let ball = Ball::new(settings.ball.clone(), settings.settle.clone(), wheel.center());
        log::info!(
            "Table ready: {} pockets, outer radius {:.1}, seed {}",
            wheel.pocket_count(),
            wheel.outer_radius(),
            seed
        );
        Ok(Self {
            settings,
            wheel,
            ball,
            rng: Pcg32::seed_from_u64(seed),
            sink,
            seed,
            phase: TablePhase::Idle,
            clock_ms: 0.0,
            launch_at_ms: None,
            last_result: None,
            spins: 0,
        })
    }

    /// Spin the wheel and schedule the ball launch
    ///
    /// Starts a fresh round after a finished one. Ignored mid-round.
    pub fn start_spin(&mut self) -> bool {
        if self.phase == TablePhase::Finished {
            self.reset_round();
        }
        if self.phase != TablePhase::Idle {
            return false;
        }
        // Round time starts at zero
        self.clock_ms = 0.0;
        if !self.wheel.spin(self.clock_ms, &mut self.rng) {
            return false;
        }

        self.spins += 1;
        self.launch_at_ms = Some(self.clock_ms + self.settings.timing.launch_delay_ms);
        self.phase = TablePhase::Spinning;
        log::info!("Spin {} started", self.spins);
        self.sink.emit(TableEvent::SpinStarted);
        true
    }

    /// Stop everything and return to idle
    pub fn reset(&mut self) {
        self.reset_round();
        self.last_result = None;
        log::info!("Table reset");
        self.sink.emit(TableEvent::Reset);
    }

    fn reset_round(&mut self) {
        self.wheel.reset();
        self.ball.reset(self.wheel.center());
        self.launch_at_ms = None;
        self.phase = TablePhase::Idle;
        self.clock_ms = 0.0;
    }

    /// Re-derive the rim geometry for a new surface size
    ///
    /// Abandons any round in progress.
    pub fn resize(&mut self, surface_size: f32) {
        if !(surface_size.is_finite() && surface_size > 0.0) {
            log::warn!("Ignoring resize to {}", surface_size);
            return;
        }
        self.settings.surface_size = surface_size;
        self.wheel.resize(surface_size);
        self.reset();
    }

    /// Advance by a frame's wall-clock interval; returns sub-steps taken
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        let timing = &self.settings.timing;
        if !(elapsed_ms.is_finite() && elapsed_ms > 0.0) {
            return 0;
        }
        let elapsed = if elapsed_ms > timing.max_frame_ms {
            timing.frame_ms
        } else {
            elapsed_ms
        };

        let steps = (elapsed / timing.substep_ms).ceil().max(1.0) as u32;
        let dt = elapsed / steps as f32;
        for _ in 0..steps {
            self.step(dt);
        }
        steps
    }

    /// One fixed sub-step: wheel first, then ball
    pub fn step(&mut self, dt: f32) {
        self.clock_ms += dt;

        let launch_due = self.launch_at_ms.is_some_and(|at| self.clock_ms >= at);
        if launch_due {
            self.launch_at_ms = None;
            if self.phase == TablePhase::Spinning {
                self.ball.launch(&self.wheel, &mut self.rng, &mut self.sink);
            }
        }

        if self.wheel.tick(self.clock_ms) {
            self.sink.emit(TableEvent::WheelStopped);
        }

        let mut watch = ResultWatch {
            inner: &mut self.sink,
            result: None,
        };
        self.ball.tick(dt, &self.wheel, &mut watch);

        if let Some(result) = watch.result {
            self.last_result = Some(result);
            self.phase = TablePhase::Finished;
        }
    }

    /// Run frames until the round finishes or `max_ms` of simulated time passes
    pub fn run_to_result(&mut self, max_ms: f32) -> Option<SpinResult> {
        let frame = self.settings.timing.frame_ms;
        let frames = (max_ms / frame).ceil().max(0.0) as u64;
        for _ in 0..frames {
            if self.phase != TablePhase::Spinning {
                break;
            }
            self.advance(frame);
        }
        if self.phase == TablePhase::Finished {
            self.last_result
        } else {
            None
        }
    }

    /// Geometry for the renderer
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            phase: self.phase,
            clock_ms: self.clock_ms,
            wheel: WheelSnapshot::capture(&self.wheel),
            ball: BallSnapshot::capture(&self.ball),
        }
    }

    #[inline]
    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    #[inline]
    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Simulated time since the current round started
    #[inline]
    pub fn clock_ms(&self) -> f32 {
        self.clock_ms
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Spins started this session
    #[inline]
    pub fn spins(&self) -> u32 {
        self.spins
    }

    #[inline]
    pub fn last_result(&self) -> Option<SpinResult> {
        self.last_result
    }

    #[inline]
    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
