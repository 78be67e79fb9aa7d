//! Deterministic simulation module
//!
//! All table physics lives here. This module must stay pure and deterministic:
//! - Step-driven only (the host supplies dt)
//! - Seeded or injected RNG only
//! - No rendering, audio, or platform dependencies; output goes through an `EventSink`

pub mod ball;
pub mod collision;
pub mod events;
pub mod forces;
pub mod pocket;
pub mod snapshot;
pub mod table;
pub mod wheel;

pub use ball::{Ball, BallPhase, LaunchDraws};
pub use collision::{Rim, RimContact, bounce, distance, normalize, reflect};
pub use events::{EventSink, NoOpSink, SpinResult, TableEvent};
pub use pocket::{PocketLanding, pocket_center, pocket_index_at};
pub use snapshot::{BallSnapshot, PocketView, TableSnapshot, WheelSnapshot};
pub use table::{Table, TablePhase};
pub use wheel::{PocketColor, Wheel, WheelGeometry, WheelLayout, WheelPhase};
