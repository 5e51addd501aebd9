//! HazardWatch Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single blocking super-loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter<RawGpio, RawGpio, LedcPwm, FreeRtos>          │
//! │  (Sensor+Indicator+Pwm+Delay)          LogEventSink (EventSink)│
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              MonitorLoop (pure logic)                  │    │
//! │  │  ArmState · ToneGenerator                              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info};

use hazardwatch::adapters::hardware::{HardwareAdapter, InputPins, LedPins};
use hazardwatch::adapters::log_sink::LogEventSink;
use hazardwatch::app::monitor::MonitorLoop;
use hazardwatch::config::SystemConfig;
use hazardwatch::drivers::hw_init::{self, LedcPwm, RawGpio};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HazardWatch v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = match SystemConfig::from_build_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config invalid: {}, aborting startup", e);
            return Err(e.into());
        }
    };

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals(&config) {
        error!("HAL init failed: {}, aborting startup", e);
        return Err(e.into());
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        InputPins {
            motion: RawGpio::new(config.motion_sensor_gpio),
            flame: RawGpio::new(config.flame_sensor_gpio),
            right_button: RawGpio::new(config.right_button_gpio),
            left_button: RawGpio::new(config.left_button_gpio),
        },
        LedPins {
            red: RawGpio::new(config.led_red_gpio),
            green: RawGpio::new(config.led_green_gpio),
            blue: RawGpio::new(config.led_blue_gpio),
        },
        LedcPwm::new(config.pwm_clock_hz, config.buzzer_gpio),
        FreeRtos,
    );
    hw.all_off(config.buzzer_gpio);

    let mut log_sink = LogEventSink::new();

    // ── 5. Monitor loop ───────────────────────────────────────
    let mut monitor = MonitorLoop::new(config);
    monitor.start(&mut log_sink);

    info!("System ready. Entering monitor loop.");
    monitor.run(&mut hw, &mut log_sink)
}
