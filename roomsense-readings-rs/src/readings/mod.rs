//! Sensor reading state shared between the poll and display tasks.
//!
//! This module provides the [`StationState`] data structure that holds
//! the latest sensor sample, failure tracking, and the active display
//! view. It is the central shared state accessed by the sensor poll
//! task and the OLED display task.
//!
//! # Change Tracking
//!
//! The state carries a single `changed_display` flag. It is set by
//! anything that should cause a redraw (a new sample, a view switch, a
//! transition to stale data) and consumed by the display task via
//! [`StationState::take_display_change()`], which atomically reads and
//! clears it.
//!
//! # Staleness
//!
//! Each failed sensor read increments a consecutive-failure counter;
//! each successful read resets it. Once the counter reaches
//! [`STALE_AFTER_FAILURES`] the last sample is considered stale and the
//! readout screen shows placeholders instead of old values.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation is used. The optional `defmt` feature enables
//! structured logging for embedded targets.

mod error;
mod sample;
mod state;

pub use error::StateError;
pub use sample::{Sample, SampleSlot};
pub use state::{StationState, View};

/// Number of canned demo scenes the display crate can render.
///
/// **Invariant:** must match the scene table in the display crate —
/// [`View::Demo`] indices are validated against this constant.
pub const DEMO_SCENE_COUNT: usize = 7;

/// How long the boot demo reel dwells on each scene, in milliseconds.
pub const DEMO_DWELL_MS: u64 = 3000;

/// Sensor poll period in milliseconds.
pub const SAMPLE_PERIOD_MS: u64 = 100;

/// Consecutive failed reads after which the last sample is treated as
/// stale.
pub const STALE_AFTER_FAILURES: u8 = 3;
