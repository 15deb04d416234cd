//! roomsense-hw-interface
//!
//! HTU21D → StationState → OLED display integration firmware for the
//! Raspberry Pi Pico 2. Wires the three library crates into a live
//! sensor station:
//!
//! 1. The sensor poll task reads humidity and temperature from the
//!    HTU21D every 100 ms and records them in the shared `StationState`
//!    mutex (logging each sample over defmt).
//! 2. The OLED display task wakes on its 10 Hz timer, detects the
//!    change flag, and flushes the updated readout frame to the screen.
//! 3. At boot, before settling on the readout screen, the firmware
//!    plays each demo scene for 3 s as a display self-test.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_time::{Duration, Instant, Timer};
use ssd1306::prelude::DisplayRotation;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use htu21d_driver::{Htu21d, DEFAULT_ADDRESS, RESET_DELAY_MS};
use roomsense::readings::{
    Sample, StationState, View, DEMO_DWELL_MS, DEMO_SCENE_COUNT, SAMPLE_PERIOD_MS,
};
use roomsense_oled_display_rs::{display_update_task, DemoScene, OledDriver, ScreenConfig};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the I2C0 peripheral interrupt to Embassy's async handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Shared I2C0 bus — both the sensor and the OLED display access it
/// through I2cDevice wrappers that serialise transactions.
static I2C_BUS: StaticCell<
    Mutex<CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>,
> = StaticCell::new();

/// Shared station state — written by the sensor poll task,
/// read by the OLED display task.
static STATION_STATE: StaticCell<
    Mutex<CriticalSectionRawMutex, StationState>,
> = StaticCell::new();

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

/// Concrete I2C type for the OLED display, sharing I2C_BUS.
type OledI2c = I2cDevice<
    'static,
    CriticalSectionRawMutex,
    I2c<'static, I2C0, i2c::Async>,
>;

/// Concrete I2C type for the HTU21D sensor, sharing I2C_BUS.
type SensorI2c = I2cDevice<
    'static,
    CriticalSectionRawMutex,
    I2c<'static, I2C0, i2c::Async>,
>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises the generic `display_update_task` so it
/// can be spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn oled_task(
    driver: OledDriver<OledI2c>,
    state: &'static Mutex<CriticalSectionRawMutex, StationState>,
    config: ScreenConfig,
) {
    display_update_task(driver, state, config).await;
}

/// Periodic sensor poll task.
///
/// Reads humidity and temperature every [`SAMPLE_PERIOD_MS`] and records
/// the result in `StationState`. The mutex is held only during the
/// in-memory update — never during I2C operations.
#[embassy_executor::task]
async fn sensor_task(
    mut sensor: Htu21d<SensorI2c>,
    state: &'static Mutex<CriticalSectionRawMutex, StationState>,
) {
    info!("Sensor poll task started");

    loop {
        match sensor.measure().await {
            Ok(m) => {
                info!(
                    "time={}ms temperature={}C humidity={}%",
                    Instant::now().as_millis(),
                    m.temperature,
                    m.humidity,
                );

                // Mutex held only for the in-memory update.
                let mut st = state.lock().await;
                st.record_sample(Sample {
                    temperature: m.temperature,
                    humidity: m.humidity,
                });
            }
            Err(e) => {
                warn!("Sensor read failed: {}", e);
                let mut st = state.lock().await;
                st.record_failure();
            }
        }

        Timer::after(Duration::from_millis(SAMPLE_PERIOD_MS)).await;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("roomsense-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // I2C_SDA → GP20  (p.PIN_20)
    // I2C_SCL → GP21  (p.PIN_21)
    // ———————————————————————————————————————————————————————————————————————

    // Initialise I2C0, shared between the sensor and the OLED display.
    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    // Wrap in a mutex so both drivers can share the peripheral safely.
    let i2c_bus = I2C_BUS.init(Mutex::new(i2c));

    // Each driver gets its own I2cDevice wrapper. The wrapper acquires the
    // mutex before each I2C transaction and releases it after, serialising
    // bus access automatically.
    let i2c_sensor = I2cDevice::new(i2c_bus);
    let i2c_oled = I2cDevice::new(i2c_bus);

    // HTU21D at its fixed address. The display is mounted upside-down in
    // the enclosure, hence Rotate180.
    let mut sensor = Htu21d::new(i2c_sensor, DEFAULT_ADDRESS);
    let oled_driver = OledDriver::new(i2c_oled, 0x3C, DisplayRotation::Rotate180);

    // Initialise shared station state.
    let state = STATION_STATE.init(Mutex::new(StationState::new()));

    // —— Sensor initialisation ——————————————————————————————————————————————

    // Soft-reset so the sensor starts from the default configuration no
    // matter what state a warm reboot left it in. On failure we log and
    // continue — the poll task will keep retrying reads.
    match sensor.soft_reset().await {
        Ok(()) => Timer::after(Duration::from_millis(RESET_DELAY_MS)).await,
        Err(e) => error!("HTU21D soft reset failed: {}", e),
    }

    // —— Spawn tasks ————————————————————————————————————————————————————————

    spawner.spawn(oled_task(oled_driver, state, ScreenConfig::default())).unwrap();
    spawner.spawn(sensor_task(sensor, state)).unwrap();

    info!("All tasks spawned");

    // —— Boot demo reel —————————————————————————————————————————————————————

    // Play each scene once as a display self-test, then hand the screen
    // over to the live readout. Sampling is already running underneath.
    // The view is set per index so the reel never wraps back to scene 0
    // after the last dwell.
    for idx in 0..DEMO_SCENE_COUNT {
        if let Some(scene) = DemoScene::from_index(idx) {
            info!("Demo scene: {}", scene.title());
        }
        {
            let mut st = state.lock().await;
            if st.set_view(View::Demo(idx)).is_err() {
                error!("Demo scene {} unavailable", idx);
            }
        }
        Timer::after(Duration::from_millis(DEMO_DWELL_MS)).await;
    }
    {
        let mut st = state.lock().await;
        if st.set_view(View::Readout).is_err() {
            error!("Failed to switch to readout view");
        }
    }

    info!("Demo reel finished; showing readout");
}
