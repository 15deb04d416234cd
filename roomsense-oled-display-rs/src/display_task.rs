//! Periodic display update task.
//!
//! [`display_update_task`] owns the OLED driver, polls the shared
//! [`StationState`] at the configured refresh rate, and renders whichever
//! view is active: the live readout screen or a demo scene.
//!
//! [`StationState`]: roomsense::readings::StationState

use embedded_hal_async::i2c::I2c;

use roomsense::readings::{StationState, View};

use crate::demos::DemoScene;
use crate::driver::OledDriver;
use crate::screens::{render_readout, ReadoutFrame, ScreenConfig};

/// Periodic display update loop.
///
/// This is a regular `async fn` — **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn oled_task(
///     driver: OledDriver<MyConcreteI2cType>,
///     state: &'static Mutex<CriticalSectionRawMutex, StationState>,
///     config: ScreenConfig,
/// ) {
///     display_update_task(driver, state, config).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Initialise the display hardware.
/// 2. Loop at `config.update_frequency_hz`:
///    - **Step 1** — Lock the state, snapshot the active view and latest
///      sample, and consume the change flag. Release the mutex.
///    - **Step 2** — Readout view: build a [`ReadoutFrame`] and skip the
///      cycle when it matches the previous frame and nothing was
///      flagged. Demo view: always render (the progress bar animates).
///    - **Step 3** — Clear the buffer and render (no I2C, no mutex).
///    - **Step 4** — Flush the frame buffer to hardware (~20 ms I2C).
///
/// The previous readout frame is only updated after a successful flush,
/// so a failed flush is retried on the next cycle.
///
/// # Errors
///
/// * Initialisation failure: logs the error and **returns** (task exits).
/// * Render / flush failure: logs the error and continues to the next
///   cycle.
pub async fn display_update_task<I2C>(
    mut driver: OledDriver<I2C>,
    state: &'static embassy_sync::mutex::Mutex<
        embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex,
        StationState,
    >,
    config: ScreenConfig,
) where
    I2C: I2c,
{
    // ── Initialisation ───────────────────────────────────────────────
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised");

    let period = embassy_time::Duration::from_millis(config.update_period_ms());
    let mut last_frame: Option<ReadoutFrame> = None;
    let mut tick: u32 = 0;

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        embassy_time::Timer::after(period).await;
        tick = tick.wrapping_add(1);

        // ── Step 1: snapshot state (mutex held briefly) ──────────────
        let (view, sample, changed) = {
            let mut st = state.lock().await;
            (st.view(), st.display_sample(), st.take_display_change())
        }; // ← mutex released here, before any rendering or I2C work

        // ── Step 2: decide what this cycle draws ─────────────────────
        let readout_frame = match view {
            View::Readout => {
                let uptime_ms = embassy_time::Instant::now().as_millis();
                let frame = ReadoutFrame::new(sample, uptime_ms);
                if !changed && last_frame == Some(frame) {
                    continue;
                }
                Some(frame)
            }
            View::Demo(_) => None,
        };

        // ── Step 3: render to frame buffer (no I2C, no mutex) ────────
        driver.clear_buffer();
        let Some(display) = driver.display_mut() else {
            // Cannot happen after a successful init(), but guard anyway.
            continue;
        };

        let rendered = match view {
            View::Readout => {
                // readout_frame is always Some on this arm.
                let frame = readout_frame.unwrap_or_default();
                render_readout(display, &frame, &config)
            }
            View::Demo(idx) => match DemoScene::from_index(idx) {
                Some(scene) => scene.render(display, tick),
                None => {
                    // State validates indices; stale index means a scene
                    // was removed without updating DEMO_SCENE_COUNT.
                    #[cfg(feature = "defmt")]
                    defmt::warn!("No demo scene for index {}", idx);
                    continue;
                }
            },
        };
        if rendered.is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("Render failed");
            continue;
        }

        // ── Step 4: flush to hardware (~20 ms I2C, no mutex held) ────
        if let Err(_e) = driver.flush().await {
            #[cfg(feature = "defmt")]
            defmt::error!("Flush failed: {}", _e);
            continue;
        }

        if let Some(frame) = readout_frame {
            last_frame = Some(frame);
        }
    }
}
