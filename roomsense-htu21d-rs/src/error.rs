//! Error types for the HTU21D driver.

use core::fmt;

/// Errors that can occur when communicating with the sensor.
#[derive(Debug)]
pub enum SensorError<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// The CRC byte returned by the sensor did not match the measurement
    /// data. The reading must be discarded.
    Crc,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for SensorError<E> {
    fn from(error: E) -> Self {
        SensorError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SensorError::I2c(e) => write!(f, "I2C error: {:?}", e),
            SensorError::Crc => write!(f, "CRC mismatch on measurement data"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for SensorError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SensorError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            SensorError::Crc => defmt::write!(f, "CRC mismatch"),
        }
    }
}
