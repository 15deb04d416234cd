use super::error::StateError;
use super::sample::{Sample, SampleSlot};
use super::{DEMO_SCENE_COUNT, STALE_AFTER_FAILURES};

/// What the display task should currently be rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    /// The live humidity/temperature readout screen.
    Readout,
    /// A canned demo scene, by index into the display crate's scene
    /// table (0 to `DEMO_SCENE_COUNT - 1`).
    Demo(usize),
}

/// Shared sensor and display state.
///
/// Written by the sensor poll task (samples, failures) and the boot
/// sequence (view switches); read and change-consumed by the OLED
/// display task.
pub struct StationState {
    /// The most recent good sample, or `Missing` before the first read.
    pub latest: SampleSlot,
    /// Currently active display view.
    view: View,
    /// Total number of successful reads since power-on (wrapping).
    pub sample_count: u32,
    /// Consecutive failed reads since the last good one.
    pub consecutive_failures: u8,
    /// Set when the display needs to redraw; consumed by
    /// [`take_display_change()`](Self::take_display_change).
    changed_display: bool,
}

impl Default for StationState {
    fn default() -> Self {
        Self::new()
    }
}

impl StationState {
    /// Create an empty state showing the readout screen.
    pub fn new() -> Self {
        Self {
            latest: SampleSlot::Missing,
            view: View::Readout,
            sample_count: 0,
            consecutive_failures: 0,
            changed_display: false,
        }
    }

    // ── Sensor-driven updates ────────────────────────────────────────

    /// Record a successful sensor read.
    ///
    /// Stores the sample, resets the failure counter, and marks the
    /// display for redraw.
    pub fn record_sample(&mut self, sample: Sample) {
        self.latest = SampleSlot::Valid(sample);
        self.sample_count = self.sample_count.wrapping_add(1);
        self.consecutive_failures = 0;
        self.changed_display = true;
    }

    /// Record a failed sensor read.
    ///
    /// Increments the failure counter. The display is only marked for
    /// redraw when the counter crosses [`STALE_AFTER_FAILURES`], since
    /// that is the point at which the readout switches to placeholders.
    pub fn record_failure(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures == STALE_AFTER_FAILURES {
            self.changed_display = true;
        }
    }

    /// Returns `true` once enough consecutive reads have failed that
    /// the last sample should no longer be shown.
    pub fn is_stale(&self) -> bool {
        self.consecutive_failures >= STALE_AFTER_FAILURES
    }

    /// The sample the readout screen should display, if any.
    ///
    /// `None` before the first successful read and while the data is
    /// stale.
    pub fn display_sample(&self) -> Option<Sample> {
        if self.is_stale() {
            return None;
        }
        self.latest.as_ref().copied()
    }

    // ── View switching ───────────────────────────────────────────────

    /// Returns the currently active view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Switch to a different view and mark the display for redraw.
    ///
    /// Returns [`StateError::InvalidSceneIndex`] if a demo view names a
    /// scene index `>= DEMO_SCENE_COUNT`; the view is left unchanged.
    pub fn set_view(&mut self, view: View) -> Result<(), StateError> {
        if let View::Demo(idx) = view {
            if idx >= DEMO_SCENE_COUNT {
                return Err(StateError::InvalidSceneIndex);
            }
        }
        self.view = view;
        self.changed_display = true;
        Ok(())
    }

    /// Advance to the next demo scene, wrapping after the last one.
    ///
    /// Returns the new scene index, or `None` (a no-op) when the
    /// readout view is active.
    pub fn advance_demo(&mut self) -> Option<usize> {
        match self.view {
            View::Demo(idx) => {
                let next = (idx + 1) % DEMO_SCENE_COUNT;
                self.view = View::Demo(next);
                self.changed_display = true;
                Some(next)
            }
            View::Readout => None,
        }
    }

    // ── Change consumption ───────────────────────────────────────────

    /// Read and clear the display change flag.
    ///
    /// The display task calls this once per cycle; a `true` result
    /// means something changed since the last call.
    pub fn take_display_change(&mut self) -> bool {
        let changed = self.changed_display;
        self.changed_display = false;
        changed
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f32, rh: f32) -> Sample {
        Sample {
            temperature: t,
            humidity: rh,
        }
    }

    // ── Default state ────────────────────────────────────────────────

    #[test]
    fn default_state() {
        let mut state = StationState::new();
        assert_eq!(state.view(), View::Readout);
        assert_eq!(state.sample_count, 0);
        assert!(!state.latest.is_valid());
        assert!(state.display_sample().is_none());
        assert!(!state.take_display_change());
    }

    // ── Sample recording ─────────────────────────────────────────────

    #[test]
    fn record_sample_stores_and_flags() {
        let mut state = StationState::new();
        state.record_sample(sample(24.7, 32.3));

        assert_eq!(state.sample_count, 1);
        assert_eq!(state.latest.as_ref().unwrap().temperature, 24.7);
        assert!(state.take_display_change());
        // Flag is cleared — second call returns nothing.
        assert!(!state.take_display_change());
    }

    #[test]
    fn record_sample_resets_failures() {
        let mut state = StationState::new();
        state.record_failure();
        state.record_failure();
        state.record_sample(sample(20.0, 50.0));
        assert_eq!(state.consecutive_failures, 0);
        assert!(!state.is_stale());
    }

    #[test]
    fn sample_count_wraps() {
        let mut state = StationState::new();
        state.sample_count = u32::MAX;
        state.record_sample(sample(20.0, 50.0));
        assert_eq!(state.sample_count, 0);
    }

    // ── Staleness ────────────────────────────────────────────────────

    #[test]
    fn stale_after_threshold() {
        let mut state = StationState::new();
        state.record_sample(sample(24.7, 32.3));
        let _ = state.take_display_change();

        for _ in 0..STALE_AFTER_FAILURES {
            state.record_failure();
        }
        assert!(state.is_stale());
        // The last sample is retained but not offered for display.
        assert!(state.latest.is_valid());
        assert!(state.display_sample().is_none());
    }

    #[test]
    fn failure_flags_display_only_at_threshold() {
        let mut state = StationState::new();
        state.record_sample(sample(24.7, 32.3));
        let _ = state.take_display_change();

        // Below the threshold: no redraw needed, values are still shown.
        state.record_failure();
        assert!(!state.take_display_change());

        state.record_failure();
        assert!(!state.take_display_change());

        // Crossing the threshold: one redraw to switch to placeholders.
        state.record_failure();
        assert!(state.take_display_change());

        // Further failures do not re-flag.
        state.record_failure();
        assert!(!state.take_display_change());
    }

    #[test]
    fn failure_counter_saturates() {
        let mut state = StationState::new();
        for _ in 0..300 {
            state.record_failure();
        }
        assert_eq!(state.consecutive_failures, u8::MAX);
        assert!(state.is_stale());
    }

    #[test]
    fn recovery_after_staleness() {
        let mut state = StationState::new();
        for _ in 0..STALE_AFTER_FAILURES {
            state.record_failure();
        }
        assert!(state.is_stale());

        state.record_sample(sample(21.5, 45.0));
        assert!(!state.is_stale());
        assert_eq!(state.display_sample().unwrap().humidity, 45.0);
    }

    // ── View switching ───────────────────────────────────────────────

    #[test]
    fn set_view_demo_valid() {
        let mut state = StationState::new();
        assert!(state.set_view(View::Demo(0)).is_ok());
        assert_eq!(state.view(), View::Demo(0));
        assert!(state.take_display_change());
    }

    #[test]
    fn set_view_demo_out_of_bounds() {
        let mut state = StationState::new();
        assert_eq!(
            state.set_view(View::Demo(DEMO_SCENE_COUNT)),
            Err(StateError::InvalidSceneIndex)
        );
        // View unchanged, no redraw flagged.
        assert_eq!(state.view(), View::Readout);
        assert!(!state.take_display_change());
    }

    #[test]
    fn set_view_back_to_readout_flags_redraw() {
        let mut state = StationState::new();
        state.set_view(View::Demo(2)).unwrap();
        let _ = state.take_display_change();

        state.set_view(View::Readout).unwrap();
        assert_eq!(state.view(), View::Readout);
        assert!(state.take_display_change());
    }

    // ── Demo advancement ─────────────────────────────────────────────

    #[test]
    fn advance_demo_steps_and_wraps() {
        let mut state = StationState::new();
        state.set_view(View::Demo(0)).unwrap();

        for expected in 1..DEMO_SCENE_COUNT {
            assert_eq!(state.advance_demo(), Some(expected));
        }
        // Wraps back to scene 0 after the last one.
        assert_eq!(state.advance_demo(), Some(0));
        assert_eq!(state.view(), View::Demo(0));
    }

    #[test]
    fn advance_demo_noop_in_readout() {
        let mut state = StationState::new();
        assert_eq!(state.advance_demo(), None);
        assert_eq!(state.view(), View::Readout);
        assert!(!state.take_display_change());
    }

    #[test]
    fn advance_demo_flags_redraw() {
        let mut state = StationState::new();
        state.set_view(View::Demo(0)).unwrap();
        let _ = state.take_display_change();

        state.advance_demo();
        assert!(state.take_display_change());
    }

    // ── Sample slot helpers ──────────────────────────────────────────

    #[test]
    fn sample_slot_helpers() {
        let valid = SampleSlot::Valid(sample(1.0, 2.0));
        let missing = SampleSlot::Missing;
        assert!(valid.is_valid());
        assert!(!missing.is_valid());
        assert_eq!(valid.as_ref().unwrap().humidity, 2.0);
        assert!(missing.as_ref().is_none());
    }
}
