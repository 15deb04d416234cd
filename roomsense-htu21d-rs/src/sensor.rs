//! High-level interface for the HTU21D sensor.
//!
//! [`Htu21d`] wraps the low-level command driver with measurement
//! conversion, resolution configuration, and a combined-read convenience
//! method.

use embedded_hal_async::i2c::I2c;

use crate::commands::{
    HUMIDITY_MEASURE_DELAY_MS, READ_USER_REGISTER, SOFT_RESET, TEMP_MEASURE_DELAY_MS,
    TRIGGER_HUMIDITY_NOHOLD, TRIGGER_TEMP_NOHOLD, USER_REGISTER_RESOLUTION_MASK,
    WRITE_USER_REGISTER,
};
use crate::driver::CommandDriver;
use crate::error::SensorError;

/// A converted sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}

/// Measurement resolution, encoded as user register bits 7 and 0.
///
/// The default after power-on or soft reset is
/// [`Rh12Temp14`](Resolution::Rh12Temp14).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 12-bit humidity, 14-bit temperature (power-on default).
    Rh12Temp14,
    /// 8-bit humidity, 12-bit temperature.
    Rh8Temp12,
    /// 10-bit humidity, 13-bit temperature.
    Rh10Temp13,
    /// 11-bit humidity, 11-bit temperature.
    Rh11Temp11,
}

impl Resolution {
    /// The user register bit pattern for this resolution (bits 7 and 0).
    pub fn bits(self) -> u8 {
        match self {
            Resolution::Rh12Temp14 => 0b0000_0000,
            Resolution::Rh8Temp12 => 0b0000_0001,
            Resolution::Rh10Temp13 => 0b1000_0000,
            Resolution::Rh11Temp11 => 0b1000_0001,
        }
    }
}

/// High-level interface for the HTU21D humidity and temperature sensor.
///
/// Provides async methods that trigger a conversion, wait it out, and
/// return checksum-validated, unit-converted readings.
///
/// # Example
///
/// ```ignore
/// use htu21d_driver::{Htu21d, DEFAULT_ADDRESS};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut sensor = Htu21d::new(i2c, DEFAULT_ADDRESS);
///
/// // Read each channel individually
/// let temp = sensor.read_temperature().await.unwrap();
/// let rh = sensor.read_humidity().await.unwrap();
///
/// // Or both in one call
/// let m = sensor.measure().await.unwrap();
/// ```
pub struct Htu21d<I2C> {
    driver: CommandDriver<I2C>,
}

impl<I2C> Htu21d<I2C>
where
    I2C: I2c,
{
    /// Create a new sensor interface.
    ///
    /// No I2C traffic is generated. Calling [`soft_reset()`](Self::soft_reset)
    /// once before the first measurement is recommended so the sensor
    /// starts from a known configuration.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (always 0x40)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: CommandDriver::new(i2c, address),
        }
    }

    // -----------------------------------------------------------------------
    // Measurements
    // -----------------------------------------------------------------------

    /// Measure the temperature in degrees Celsius.
    ///
    /// Blocks (asynchronously) for the worst-case 14-bit conversion time
    /// of 50 ms.
    ///
    /// # Errors
    /// * [`SensorError::I2c`] on communication failure
    /// * [`SensorError::Crc`] if the reading fails checksum validation
    pub async fn read_temperature(&mut self) -> Result<f32, SensorError<I2C::Error>> {
        let raw = self
            .driver
            .measure_raw(TRIGGER_TEMP_NOHOLD, TEMP_MEASURE_DELAY_MS)
            .await?;
        Ok(convert_temperature(raw))
    }

    /// Measure the relative humidity in percent.
    ///
    /// Blocks (asynchronously) for the worst-case 12-bit conversion time
    /// of 16 ms.
    ///
    /// The conversion formula can report slightly outside 0–100 %RH at
    /// the extremes; values are returned unclamped so callers can decide
    /// how to treat them.
    ///
    /// # Errors
    /// * [`SensorError::I2c`] on communication failure
    /// * [`SensorError::Crc`] if the reading fails checksum validation
    pub async fn read_humidity(&mut self) -> Result<f32, SensorError<I2C::Error>> {
        let raw = self
            .driver
            .measure_raw(TRIGGER_HUMIDITY_NOHOLD, HUMIDITY_MEASURE_DELAY_MS)
            .await?;
        Ok(convert_humidity(raw))
    }

    /// Measure humidity and temperature in sequence.
    ///
    /// Two conversions run back to back, so this takes roughly 70 ms at
    /// the default resolution. Returns the first error encountered; no
    /// partial measurement is returned.
    pub async fn measure(&mut self) -> Result<Measurement, SensorError<I2C::Error>> {
        let humidity = self.read_humidity().await?;
        let temperature = self.read_temperature().await?;
        Ok(Measurement {
            temperature,
            humidity,
        })
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Soft-reset the sensor.
    ///
    /// Reboots the sensor and restores the default configuration (except
    /// the heater bit). The sensor is unavailable for up to
    /// [`RESET_DELAY_MS`](crate::RESET_DELAY_MS) afterwards — callers
    /// must wait that long before the next command.
    pub async fn soft_reset(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.driver.write_command(SOFT_RESET).await
    }

    /// Read the raw user register.
    ///
    /// Useful for checking the end-of-battery bit (bit 6) and the
    /// currently configured resolution.
    pub async fn read_user_register(&mut self) -> Result<u8, SensorError<I2C::Error>> {
        self.driver.read_register(READ_USER_REGISTER).await
    }

    /// Set the measurement resolution.
    ///
    /// Performs a read-modify-write of the user register so the reserved
    /// bits keep their factory values, as the datasheet requires.
    pub async fn set_resolution(
        &mut self,
        resolution: Resolution,
    ) -> Result<(), SensorError<I2C::Error>> {
        let current = self.driver.read_register(READ_USER_REGISTER).await?;
        let updated = (current & !USER_REGISTER_RESOLUTION_MASK) | resolution.bits();
        self.driver.write_register(WRITE_USER_REGISTER, updated).await
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Convert a masked raw temperature reading to degrees Celsius.
///
/// Datasheet formula: `T = -46.85 + 175.72 * raw / 2^16`.
pub(crate) fn convert_temperature(raw: u16) -> f32 {
    -46.85 + 175.72 * (raw as f32) / 65536.0
}

/// Convert a masked raw humidity reading to percent relative humidity.
///
/// Datasheet formula: `RH = -6 + 125 * raw / 2^16`.
pub(crate) fn convert_humidity(raw: u16) -> f32 {
    -6.0 + 125.0 * (raw as f32) / 65536.0
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // Conversion vectors from the HTU21D datasheet examples.

    #[test]
    fn temperature_datasheet_example() {
        // 0x683A ⇒ 24.7 °C.
        let t = convert_temperature(0x683A & 0xFFFC);
        assert!((t - 24.69).abs() < 0.01);
    }

    #[test]
    fn humidity_datasheet_example() {
        // 0x4E85 ⇒ 32.3 %RH (after status-bit masking: 0x4E84).
        let rh = convert_humidity(0x4E85 & 0xFFFC);
        assert!((rh - 32.33).abs() < 0.01);
    }

    #[test]
    fn temperature_range_endpoints() {
        assert!((convert_temperature(0x0000) - (-46.85)).abs() < 0.01);
        // Maximum masked raw value.
        assert!((convert_temperature(0xFFFC) - 128.85).abs() < 0.01);
    }

    #[test]
    fn humidity_range_endpoints() {
        assert!((convert_humidity(0x0000) - (-6.0)).abs() < 0.01);
        // The formula overshoots 100 % at full scale; unclamped on purpose.
        assert!(convert_humidity(0xFFFC) > 118.0);
    }

    #[test]
    fn resolution_bit_patterns() {
        assert_eq!(Resolution::Rh12Temp14.bits(), 0b0000_0000);
        assert_eq!(Resolution::Rh8Temp12.bits(), 0b0000_0001);
        assert_eq!(Resolution::Rh10Temp13.bits(), 0b1000_0000);
        assert_eq!(Resolution::Rh11Temp11.bits(), 0b1000_0001);
    }

    #[test]
    fn resolution_bits_fit_mask() {
        use crate::commands::USER_REGISTER_RESOLUTION_MASK;
        for r in [
            Resolution::Rh12Temp14,
            Resolution::Rh8Temp12,
            Resolution::Rh10Temp13,
            Resolution::Rh11Temp11,
        ] {
            assert_eq!(r.bits() & !USER_REGISTER_RESOLUTION_MASK, 0);
        }
    }
}
