//! Notifications from the simulation to the game/UI layer
//!
//! The core never touches presentation. Everything the outside world hears
//! about (sounds, status text, the winning number) goes through an
//! [`EventSink`] handed to the table at construction.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use super::collision::Rim;
use super::wheel::PocketColor;

/// The outcome of one completed flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Displayed number of the winning pocket
    pub number: u8,
    pub pocket_index: usize,
    pub color: PocketColor,
}

/// Simulation events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableEvent {
    /// Wheel spin-up
    SpinStarted,
    /// Wheel came to rest
    WheelStopped,
    BallLaunched,
    /// Ball hit a rim hard enough to be heard
    Impact { rim: Rim, volume: f32 },
    /// Pocket chosen, settle animation begins (not the result)
    BallLanded { pocket_index: usize, volume: f32 },
    /// Settling finished. Fired exactly once per flight.
    Result(SpinResult),
    Reset,
}

/// Receiver for simulation events
pub trait EventSink {
    fn emit(&mut self, event: TableEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn emit(&mut self, _event: TableEvent) {}
}

impl EventSink for Vec<TableEvent> {
    fn emit(&mut self, event: TableEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<TableEvent> {
    fn emit(&mut self, event: TableEvent) {
        // A dropped receiver just means nobody is listening any more
        let _ = self.send(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: TableEvent) {
        (**self).emit(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use super::*;

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut events: Vec<TableEvent> = Vec::new();
        events.emit(TableEvent::SpinStarted);
        events.emit(TableEvent::BallLaunched);
        assert_eq!(events, vec![TableEvent::SpinStarted, TableEvent::BallLaunched]);
    }

    #[test]
    fn test_channel_sink() {
        let (mut tx, rx) = channel();
        tx.emit(TableEvent::Reset);
        assert_eq!(rx.recv().unwrap(), TableEvent::Reset);
        drop(rx);
        // Sending with no receiver is silently ignored
        tx.emit(TableEvent::Reset);
    }
}
