/// A single converted sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}

/// A sample slot that either holds the most recent [`Sample`] or is
/// empty.
///
/// The slot is [`Missing`](SampleSlot::Missing) from power-on until the
/// first successful read; after that it always holds the last good
/// sample, even while reads are failing (staleness is tracked
/// separately by the failure counter).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleSlot {
    /// Slot holds a sensor reading.
    Valid(Sample),
    /// No reading has been taken yet.
    #[default]
    Missing,
}

impl SampleSlot {
    /// Returns `true` if this slot holds a reading.
    pub fn is_valid(&self) -> bool {
        matches!(self, SampleSlot::Valid(_))
    }

    /// Returns a reference to the inner [`Sample`], or `None` if the
    /// slot is [`Missing`](SampleSlot::Missing).
    pub fn as_ref(&self) -> Option<&Sample> {
        match self {
            SampleSlot::Valid(sample) => Some(sample),
            SampleSlot::Missing => None,
        }
    }
}
