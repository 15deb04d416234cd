//! Shared station state for the roomsense firmware.
//!
//! This crate is platform-independent and allocation-free so the state
//! logic can be unit-tested on the host.

#![no_std]

pub mod readings;
