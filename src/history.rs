//! Recent results log
//!
//! Keeps the last few winning numbers, newest first. Doubles as an event
//! sink so it can sit directly behind a table.

use serde::{Deserialize, Serialize};

use crate::sim::{EventSink, PocketColor, SpinResult, TableEvent};

/// Maximum number of results to keep
pub const MAX_RECENT_RESULTS: usize = 10;

/// Color tallies over the kept results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCounts {
    pub green: u32,
    pub red: u32,
    pub black: u32,
}

/// Recent results, newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SpinHistory {
    pub entries: Vec<SpinResult>,
    /// Results recorded over the whole session, including dropped ones
    pub total: u64,
}

impl SpinHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
        }
    }

    /// Record a result at the front, dropping the oldest past the limit
    pub fn record(&mut self, result: SpinResult) {
        self.entries.insert(0, result);
        self.entries.truncate(MAX_RECENT_RESULTS);
        self.total += 1;
    }

    /// Most recent result
    pub fn last(&self) -> Option<&SpinResult> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn color_counts(&self) -> ColorCounts {
        let mut counts = ColorCounts::default();
        for entry in &self.entries {
            match entry.color {
                PocketColor::Green => counts.green += 1,
                PocketColor::Red => counts.red += 1,
                PocketColor::Black => counts.black += 1,
            }
        }
        counts
    }

    /// Kept numbers, newest first
    pub fn numbers(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.number).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl EventSink for SpinHistory {
    fn emit(&mut self, event: TableEvent) {
        if let TableEvent::Result(result) = event {
            self.record(result);
        }
    }
}
