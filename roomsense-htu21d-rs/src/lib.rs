//! Async driver for the HTU21D humidity and temperature sensor.
//!
//! This crate provides an Embassy-compatible async I2C driver for the
//! TE Connectivity HTU21D (and the pin-compatible SHT21/Si7021 family)
//! combined relative-humidity and temperature sensor.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private) — Low-level I2C command primitives that
//!   handle the no-hold-master measurement sequence, conversion delays,
//!   and CRC validation.
//! - **[`Htu21d`]** (public) — High-level API returning converted
//!   temperature (°C) and relative humidity (%RH) values.
//!
//! # Quick start
//!
//! ```ignore
//! use htu21d_driver::Htu21d;
//!
//! // Construct with any `embedded-hal-async` I2C implementation
//! let mut sensor = Htu21d::new(i2c, 0x40);
//! sensor.soft_reset().await?;
//!
//! let measurement = sensor.measure().await?;
//! // measurement.temperature in °C, measurement.humidity in %RH
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on error and
//!   measurement types for embedded logging.

#![no_std]

pub use commands::{DEFAULT_ADDRESS, RESET_DELAY_MS};
pub use error::SensorError;
pub use sensor::{Htu21d, Measurement, Resolution};

mod commands;
mod driver;
mod error;
mod sensor;
