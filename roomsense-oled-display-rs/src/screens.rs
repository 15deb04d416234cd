//! Readout screen layout and rendering.
//!
//! This module defines the immutable [`ReadoutFrame`] snapshot, the
//! [`ScreenConfig`] layout geometry, and the [`render_readout`] function
//! that draws one frame using `embedded-graphics`.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, iso_8859_1::FONT_10X20, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::String;

use roomsense::readings::Sample;

// ── ScreenConfig ─────────────────────────────────────────────────────────

/// Configuration for the readout screen layout and the update task.
///
/// All layout geometry lives here — there are **no** module-level layout
/// constants. Y coordinates are measured from the top of the display to
/// the top of the text line.
///
/// [`ScreenConfig::default()`] reproduces the station's original layout:
/// two heading/value pairs stacked vertically, uptime clock bottom-right,
/// refreshed at 10 Hz.
pub struct ScreenConfig {
    /// Display refresh rate in Hz. Default: 10.
    pub update_frequency_hz: u32,

    // ── Layout geometry ──────────────────────────────────────────────
    /// Total display width in pixels. Default: 128.
    pub display_width: u32,
    /// Total display height in pixels. Default: 64.
    pub display_height: u32,
    /// Y coordinate of the humidity heading. Default: 0.
    pub humidity_label_y: i32,
    /// Y coordinate of the humidity value. Default: 11.
    pub humidity_value_y: i32,
    /// Y coordinate of the temperature heading. Default: 30.
    pub temperature_label_y: i32,
    /// Y coordinate of the temperature value. Default: 41.
    pub temperature_value_y: i32,
    /// Y coordinate of the uptime clock. Default: 54.
    pub clock_y: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 10,
            display_width: 128,
            display_height: 64,
            humidity_label_y: 0,
            humidity_value_y: 11,
            temperature_label_y: 30,
            temperature_value_y: 41,
            clock_y: 54,
        }
    }
}

impl ScreenConfig {
    /// Convert the configured frequency to a timer period in milliseconds.
    ///
    /// Formula: `1000 / update_frequency_hz`.
    pub fn update_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz as u64
    }
}

// ── ReadoutFrame ─────────────────────────────────────────────────────────

/// Immutable snapshot of everything the readout screen needs to render
/// one frame.
///
/// Values are stored in tenths so the frame is `Eq`-comparable — the
/// display task skips the flush when two consecutive frames are equal,
/// and float equality would defeat that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadoutFrame {
    /// Temperature in tenths of a degree Celsius, or `None` when no
    /// valid sample is available (placeholders are drawn instead).
    pub temperature_dc: Option<i32>,
    /// Relative humidity in tenths of a percent.
    pub humidity_dp: Option<i32>,
    /// Uptime in whole seconds, shown as `H:MM:SS`.
    pub uptime_secs: u64,
}

impl ReadoutFrame {
    /// Build a frame from the latest sample (if any) and the uptime.
    pub fn new(sample: Option<Sample>, uptime_ms: u64) -> Self {
        Self {
            temperature_dc: sample.map(|s| tenths(s.temperature)),
            humidity_dp: sample.map(|s| tenths(s.humidity)),
            uptime_secs: uptime_ms / 1000,
        }
    }
}

// ── Formatting helpers ───────────────────────────────────────────────────

/// Round a value to the nearest tenth, returned as an integer count of
/// tenths. Avoids `f32` formatting in the render path.
pub fn tenths(value: f32) -> i32 {
    let scaled = value * 10.0;
    if scaled >= 0.0 {
        (scaled + 0.5) as i32
    } else {
        (scaled - 0.5) as i32
    }
}

/// Write a tenths value as a one-decimal number, e.g. `247` → `"24.7"`.
fn write_fixed1<const N: usize>(buf: &mut String<N>, value_tenths: i32) {
    let sign = if value_tenths < 0 { "-" } else { "" };
    let magnitude = value_tenths.unsigned_abs();
    let _ = write!(buf, "{}{}.{}", sign, magnitude / 10, magnitude % 10);
}

/// Split whole seconds into hours, minutes, and seconds for the clock.
pub fn split_uptime(secs: u64) -> (u64, u64, u64) {
    (secs / 3600, (secs / 60) % 60, secs % 60)
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Render a [`ReadoutFrame`] to a display buffer using
/// `embedded-graphics`.
///
/// All layout geometry is read from `config`.
///
/// # Layout
///
/// ```text
/// ┌────────────────────────────────┐
/// │           HUMIDITY             │  ← humidity_label_y
/// │            43.2 %              │  ← humidity_value_y
/// │          TEMPERATURE           │  ← temperature_label_y
/// │           24.7 °C              │  ← temperature_value_y
/// │                       0:12:34  │  ← clock_y (right-aligned)
/// └────────────────────────────────┘
/// ```
///
/// Missing sample values are drawn as `--.-`.
pub fn render_readout<D>(
    display: &mut D,
    frame: &ReadoutFrame,
    config: &ScreenConfig,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let label_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let value_style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let centred = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    let right = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Top)
        .build();

    let centre_x = config.display_width as i32 / 2;

    // ── Humidity ─────────────────────────────────────────────────────
    Text::with_text_style(
        "HUMIDITY",
        Point::new(centre_x, config.humidity_label_y),
        label_style,
        centred,
    )
    .draw(display)?;

    let mut value: String<16> = String::new();
    match frame.humidity_dp {
        Some(dp) => write_fixed1(&mut value, dp),
        None => {
            let _ = value.push_str("--.-");
        }
    }
    let _ = value.push_str(" %");
    Text::with_text_style(
        value.as_str(),
        Point::new(centre_x, config.humidity_value_y),
        value_style,
        centred,
    )
    .draw(display)?;

    // ── Temperature ──────────────────────────────────────────────────
    Text::with_text_style(
        "TEMPERATURE",
        Point::new(centre_x, config.temperature_label_y),
        label_style,
        centred,
    )
    .draw(display)?;

    let mut value: String<16> = String::new();
    match frame.temperature_dc {
        Some(dc) => write_fixed1(&mut value, dc),
        None => {
            let _ = value.push_str("--.-");
        }
    }
    let _ = value.push_str(" \u{00B0}C");
    Text::with_text_style(
        value.as_str(),
        Point::new(centre_x, config.temperature_value_y),
        value_style,
        centred,
    )
    .draw(display)?;

    // ── Uptime clock (bottom-right) ──────────────────────────────────
    let (h, m, s) = split_uptime(frame.uptime_secs);
    let mut clock: String<16> = String::new();
    let _ = write!(clock, "{}:{:02}:{:02}", h, m, s);
    Text::with_text_style(
        clock.as_str(),
        Point::new(config.display_width as i32, config.clock_y),
        label_style,
        right,
    )
    .draw(display)?;

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f32, rh: f32) -> Sample {
        Sample {
            temperature: t,
            humidity: rh,
        }
    }

    #[test]
    fn tenths_rounds_to_nearest() {
        assert_eq!(tenths(24.69), 247);
        assert_eq!(tenths(32.34), 323);
        assert_eq!(tenths(0.0), 0);
        assert_eq!(tenths(99.96), 1000);
        assert_eq!(tenths(-46.84), -468);
        // Exact halves (representable in f32) round away from zero.
        assert_eq!(tenths(2.25), 23);
        assert_eq!(tenths(-5.25), -53);
    }

    #[test]
    fn write_fixed1_formats() {
        let mut buf: String<16> = String::new();
        write_fixed1(&mut buf, 247);
        assert_eq!(buf.as_str(), "24.7");

        let mut buf: String<16> = String::new();
        write_fixed1(&mut buf, -5);
        assert_eq!(buf.as_str(), "-0.5");

        let mut buf: String<16> = String::new();
        write_fixed1(&mut buf, 1000);
        assert_eq!(buf.as_str(), "100.0");
    }

    #[test]
    fn split_uptime_basic() {
        assert_eq!(split_uptime(0), (0, 0, 0));
        assert_eq!(split_uptime(59), (0, 0, 59));
        assert_eq!(split_uptime(60), (0, 1, 0));
        assert_eq!(split_uptime(3599), (0, 59, 59));
        assert_eq!(split_uptime(3600), (1, 0, 0));
        assert_eq!(split_uptime(3723), (1, 2, 3));
    }

    #[test]
    fn split_uptime_does_not_wrap_hours() {
        // 100 hours of uptime keeps counting, unlike a wall clock.
        assert_eq!(split_uptime(100 * 3600 + 61), (100, 1, 1));
    }

    #[test]
    fn frame_from_sample() {
        let frame = ReadoutFrame::new(Some(sample(24.69, 32.34)), 12_500);
        assert_eq!(frame.temperature_dc, Some(247));
        assert_eq!(frame.humidity_dp, Some(323));
        assert_eq!(frame.uptime_secs, 12);
    }

    #[test]
    fn frame_without_sample() {
        let frame = ReadoutFrame::new(None, 999);
        assert_eq!(frame.temperature_dc, None);
        assert_eq!(frame.humidity_dp, None);
        assert_eq!(frame.uptime_secs, 0); // sub-second uptime truncates
    }

    #[test]
    fn frame_equality_drives_redraw_skipping() {
        // Same values within the same second: equal, no redraw.
        let a = ReadoutFrame::new(Some(sample(24.7, 32.3)), 5_100);
        let b = ReadoutFrame::new(Some(sample(24.7, 32.3)), 5_900);
        assert_eq!(a, b);

        // Second rolls over: the clock must redraw.
        let c = ReadoutFrame::new(Some(sample(24.7, 32.3)), 6_000);
        assert_ne!(a, c);

        // Value changes by a tenth: redraw.
        let d = ReadoutFrame::new(Some(sample(24.8, 32.3)), 5_100);
        assert_ne!(a, d);
    }

    #[test]
    fn default_config_values() {
        let c = ScreenConfig::default();
        assert_eq!(c.update_frequency_hz, 10);
        assert_eq!(c.display_width, 128);
        assert_eq!(c.display_height, 64);
        assert_eq!(c.humidity_label_y, 0);
        assert_eq!(c.humidity_value_y, 11);
        assert_eq!(c.temperature_label_y, 30);
        assert_eq!(c.temperature_value_y, 41);
        assert_eq!(c.clock_y, 54);
    }

    #[test]
    fn update_period_10hz() {
        assert_eq!(ScreenConfig::default().update_period_ms(), 100);
    }

    #[test]
    fn update_period_30hz() {
        let c = ScreenConfig {
            update_frequency_hz: 30,
            ..ScreenConfig::default()
        };
        assert_eq!(c.update_period_ms(), 33);
    }
}
