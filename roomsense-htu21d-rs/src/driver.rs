//! Low-level HTU21D command primitives.
//!
//! Implements the no-hold-master measurement sequence: write a trigger
//! command, wait out the conversion time, then read the three-byte
//! response (MSB, LSB, CRC) and validate the checksum.
//!
//! This module is crate-private — consumers interact with [`Htu21d`] in
//! `sensor.rs` instead.
//!
//! [`Htu21d`]: crate::sensor::Htu21d

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::commands::STATUS_BITS_MASK;
use crate::error::SensorError;

/// Low-level command driver.
///
/// Owns an I2C peripheral and provides the measurement and user-register
/// primitives the high-level API is built on.
pub(crate) struct CommandDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> CommandDriver<I2C>
where
    I2C: I2c,
{
    /// Create a new command driver.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (always 0x40 for the HTU21D)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    // -----------------------------------------------------------------------
    // Core protocol primitives
    // -----------------------------------------------------------------------

    /// Run a no-hold-master measurement and return the masked raw value.
    ///
    /// Sequence:
    /// 1. Write the trigger command (1 byte).
    /// 2. Wait `delay_ms` for the conversion to complete.
    /// 3. Read MSB, LSB, and CRC (3 bytes).
    ///
    /// No-hold-master is used instead of hold-master because clock
    /// stretching through the whole conversion would stall every other
    /// device on a shared bus.
    ///
    /// The returned value has the two status bits already cleared.
    ///
    /// # Errors
    /// * [`SensorError::I2c`] on a bus-level failure
    /// * [`SensorError::Crc`] if the checksum does not cover the data
    pub async fn measure_raw(
        &mut self,
        command: u8,
        delay_ms: u64,
    ) -> Result<u16, SensorError<I2C::Error>> {
        self.i2c.write(self.address, &[command]).await?;

        // Conversion runs on the sensor; reading earlier would be NACKed.
        Timer::after(Duration::from_millis(delay_ms)).await;

        let mut buf = [0u8; 3];
        self.i2c.read(self.address, &mut buf).await?;

        if crc8(&buf[0..2]) != buf[2] {
            return Err(SensorError::Crc);
        }

        let raw = u16::from_be_bytes([buf[0], buf[1]]);
        Ok(raw & STATUS_BITS_MASK)
    }

    /// Write a bare command byte (used for soft reset).
    pub async fn write_command(
        &mut self,
        command: u8,
    ) -> Result<(), SensorError<I2C::Error>> {
        self.i2c.write(self.address, &[command]).await?;
        Ok(())
    }

    /// Read a one-byte register selected by `command`.
    pub async fn read_register(
        &mut self,
        command: u8,
    ) -> Result<u8, SensorError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[command], &mut buf).await?;
        Ok(buf[0])
    }

    /// Write a one-byte register: `[command, value]` in one transaction.
    pub async fn write_register(
        &mut self,
        command: u8,
        value: u8,
    ) -> Result<(), SensorError<I2C::Error>> {
        self.i2c.write(self.address, &[command, value]).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CRC
// ---------------------------------------------------------------------------

/// CRC-8 over measurement data, polynomial x⁸ + x⁵ + x⁴ + 1 (0x131),
/// initial value 0x00. This is the checksum shared by the whole
/// SHT2x/HTU2x family.
pub(crate) fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ 0x31;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // Checksum vectors from the HTU21D/SHT21 datasheet measurement
    // examples.

    #[test]
    fn crc8_temperature_example() {
        // Raw temperature 0x683A.
        assert_eq!(crc8(&[0x68, 0x3A]), 0x7C);
    }

    #[test]
    fn crc8_humidity_example() {
        // Raw humidity 0x4E85.
        assert_eq!(crc8(&[0x4E, 0x85]), 0x6B);
    }

    #[test]
    fn crc8_all_zero() {
        assert_eq!(crc8(&[0x00, 0x00]), 0x00);
    }

    #[test]
    fn crc8_rejects_corrupt_data() {
        // Flip one bit of the temperature example; checksum must differ.
        assert_ne!(crc8(&[0x68, 0x3B]), 0x7C);
    }
}
