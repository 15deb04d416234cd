//! HTU21D command and protocol constants.
//!
//! The HTU21D has no register map — each operation is a single-byte
//! command. Measurements are started with a trigger command and read back
//! as three bytes: MSB, LSB, CRC. The two least-significant bits of every
//! measurement are status bits and must be masked off before conversion.

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Trigger a temperature measurement, no-hold-master mode.
pub const TRIGGER_TEMP_NOHOLD: u8 = 0xF3;

/// Trigger a humidity measurement, no-hold-master mode.
pub const TRIGGER_HUMIDITY_NOHOLD: u8 = 0xF5;

/// Write the user register.
pub const WRITE_USER_REGISTER: u8 = 0xE6;

/// Read the user register.
pub const READ_USER_REGISTER: u8 = 0xE7;

/// Soft reset. Restores the user register to its default (except the
/// heater bit) after at most [`RESET_DELAY_MS`].
pub const SOFT_RESET: u8 = 0xFE;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Fixed 7-bit I2C address of the HTU21D. The part has no address pins.
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Maximum soft-reset recovery time in milliseconds (datasheet: 15 ms).
pub const RESET_DELAY_MS: u64 = 15;

/// Maximum temperature conversion time in milliseconds at 14-bit
/// resolution (datasheet: 50 ms). Shorter resolutions finish earlier;
/// waiting the maximum keeps the driver independent of the configured
/// resolution.
pub const TEMP_MEASURE_DELAY_MS: u64 = 50;

/// Maximum humidity conversion time in milliseconds at 12-bit resolution
/// (datasheet: 16 ms).
pub const HUMIDITY_MEASURE_DELAY_MS: u64 = 16;

/// Mask clearing the two status bits in the LSB of a raw measurement.
pub const STATUS_BITS_MASK: u16 = 0xFFFC;

/// User register bits selecting the measurement resolution (bit 7 and
/// bit 0). All other user register bits are reserved and must be
/// preserved on write.
pub const USER_REGISTER_RESOLUTION_MASK: u8 = 0b1000_0001;
