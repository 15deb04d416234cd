//! Async OLED rendering for the roomsense station (SSD1306, 128×64).
//!
//! This crate provides [`OledDriver`], a wrapper around the [`ssd1306`]
//! crate in async buffered-graphics mode, the readout-screen and demo
//! renderers, and [`display_update_task`], a periodic update loop that
//! reads the shared [`StationState`] and renders the active view.
//!
//! # Quick Start
//!
//! ```ignore
//! use roomsense_oled_display_rs::{display_update_task, OledDriver, ScreenConfig};
//! use ssd1306::prelude::DisplayRotation;
//!
//! // In your Embassy main:
//! let oled = OledDriver::new(i2c_oled, 0x3C, DisplayRotation::Rotate180);
//! spawner.spawn(oled_task(oled, station_state, ScreenConfig::default())).unwrap();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn oled_task(
//!     driver: OledDriver<MyI2cType>,
//!     state: &'static Mutex<CriticalSectionRawMutex, StationState>,
//!     config: ScreenConfig,
//! ) {
//!     display_update_task(driver, state, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** *(default)* — structured logging via [`defmt`].
//! - **`task`** — enables [`display_update_task`] (pulls in Embassy).
//!
//! [`StationState`]: roomsense::readings::StationState

#![no_std]

pub mod demos;
#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod screens;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use demos::DemoScene;
#[cfg(feature = "task")]
pub use display_task::display_update_task;
pub use driver::OledDriver;
pub use error::OledError;
pub use screens::{ReadoutFrame, ScreenConfig};
