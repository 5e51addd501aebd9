//! HardwareAdapter against embedded-hal test doubles.
//!
//! Verifies the adapter maps ports onto the right pins, absorbs HAL
//! errors, and can carry a full monitor pass.

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::mock_hw::RecordingSink;

use hazardwatch::adapters::hardware::{HardwareAdapter, InputPins, LedPins};
use hazardwatch::app::monitor::MonitorLoop;
use hazardwatch::app::ports::{DelayPort, IndicatorPort, InputLine, Led, PwmPort, SensorPort};
use hazardwatch::config::SystemConfig;

// ── Test doubles ──────────────────────────────────────────────

#[derive(Debug)]
struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Input whose level the test can change after handing it over.
#[derive(Clone)]
struct FakeInput {
    level: Rc<Cell<bool>>,
    faulty: bool,
}

impl FakeInput {
    fn at(level: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(level)),
            faulty: false,
        }
    }

    fn broken() -> Self {
        Self {
            level: Rc::new(Cell::new(false)),
            faulty: true,
        }
    }
}

impl ErrorType for FakeInput {
    type Error = PinFault;
}

impl InputPin for FakeInput {
    fn is_high(&mut self) -> Result<bool, PinFault> {
        if self.faulty { Err(PinFault) } else { Ok(self.level.get()) }
    }

    fn is_low(&mut self) -> Result<bool, PinFault> {
        self.is_high().map(|h| !h)
    }
}

#[derive(Default)]
struct FakeOutput {
    high: bool,
    writes: u32,
    faulty: bool,
}

impl ErrorType for FakeOutput {
    type Error = PinFault;
}

impl OutputPin for FakeOutput {
    fn set_low(&mut self) -> Result<(), PinFault> {
        if self.faulty {
            return Err(PinFault);
        }
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        if self.faulty {
            return Err(PinFault);
        }
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

#[derive(Default)]
struct FakePwm {
    wrap: u16,
    level: u16,
    enabled: bool,
}

impl PwmPort for FakePwm {
    fn configure_pwm_output(&mut self, _gpio: u8) {}
    fn set_pwm_clock_divisor(&mut self, _gpio: u8, _divisor: f32) {}

    fn set_pwm_wrap(&mut self, _gpio: u8, wrap: u16) {
        self.wrap = wrap;
    }

    fn set_pwm_enabled(&mut self, _gpio: u8, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_pwm_level(&mut self, _gpio: u8, level: u16) {
        self.level = level;
    }
}

/// Accumulates requested delay instead of sleeping.
#[derive(Default)]
struct FakeDelay {
    total_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

type TestAdapter = HardwareAdapter<FakeInput, FakeOutput, FakePwm, FakeDelay>;

/// Adapter with every input idle; returns handles to drive motion/flame.
fn make_adapter() -> (TestAdapter, FakeInput, FakeInput) {
    let motion = FakeInput::at(false);
    let flame = FakeInput::at(true);
    let adapter = HardwareAdapter::new(
        InputPins {
            motion: motion.clone(),
            flame: flame.clone(),
            right_button: FakeInput::at(true),
            left_button: FakeInput::at(true),
        },
        LedPins {
            red: FakeOutput::default(),
            green: FakeOutput::default(),
            blue: FakeOutput::default(),
        },
        FakePwm::default(),
        FakeDelay::default(),
    );
    (adapter, motion, flame)
}

// ── Port mapping ──────────────────────────────────────────────

#[test]
fn read_line_reports_pin_level() {
    let (mut hw, motion, flame) = make_adapter();
    assert!(!hw.read_line(InputLine::Motion));
    assert!(hw.read_line(InputLine::Flame));

    motion.level.set(true);
    flame.level.set(false);
    assert!(hw.read_line(InputLine::Motion));
    assert!(!hw.read_line(InputLine::Flame));
}

#[test]
fn failed_read_falls_back_to_idle_level() {
    let mut hw = HardwareAdapter::new(
        InputPins {
            motion: FakeInput::broken(),
            flame: FakeInput::broken(),
            right_button: FakeInput::broken(),
            left_button: FakeInput::broken(),
        },
        LedPins {
            red: FakeOutput::default(),
            green: FakeOutput::default(),
            blue: FakeOutput::default(),
        },
        FakePwm::default(),
        FakeDelay::default(),
    );

    for line in InputLine::ALL {
        let level = hw.read_line(line);
        assert!(!line.is_active(level), "{:?} must read inactive on fault", line);
    }
}

#[test]
fn set_led_drives_matching_pin() {
    let (mut hw, _, _) = make_adapter();
    hw.set_led(Led::Green, true);

    let (_, leds, _, _) = hw.release();
    assert!(leds.green.high);
    assert!(!leds.red.high);
    assert!(!leds.blue.high);
}

#[test]
fn failed_write_is_swallowed() {
    let (_, motion, flame) = make_adapter();
    let mut hw = HardwareAdapter::new(
        InputPins {
            motion,
            flame,
            right_button: FakeInput::at(true),
            left_button: FakeInput::at(true),
        },
        LedPins {
            red: FakeOutput {
                faulty: true,
                ..FakeOutput::default()
            },
            green: FakeOutput::default(),
            blue: FakeOutput::default(),
        },
        FakePwm::default(),
        FakeDelay::default(),
    );

    hw.set_led(Led::Red, true);
    hw.set_led(Led::Blue, true);

    let (_, leds, _, _) = hw.release();
    assert_eq!(leds.red.writes, 0);
    assert!(leds.blue.high, "other LEDs keep working");
}

#[test]
fn sleep_forwards_to_delay() {
    let (mut hw, _, _) = make_adapter();
    hw.sleep_ms(2000);
    hw.sleep_ms(5000);

    let (_, _, _, delay) = hw.release();
    assert_eq!(delay.total_ns, 7_000 * 1_000_000);
}

#[test]
fn all_off_clears_leds_and_buzzer() {
    let (mut hw, _, _) = make_adapter();
    hw.set_led(Led::Red, true);
    hw.set_led(Led::Blue, true);
    hw.set_pwm_level(10, 399);

    hw.all_off(10);

    let (_, leds, pwm, _) = hw.release();
    assert!(!leds.red.high && !leds.green.high && !leds.blue.high);
    assert_eq!(pwm.level, 0);
}

// ── Monitor over the adapter ──────────────────────────────────

#[test]
fn monitor_pass_over_adapter_alerts_on_motion() {
    let (mut hw, motion, _) = make_adapter();
    let mut sink = RecordingSink::new();
    let mut monitor = MonitorLoop::new(SystemConfig::default());
    monitor.handle_command(hazardwatch::app::commands::AppCommand::Arm, &mut hw, &mut sink);

    motion.level.set(true);
    monitor.run_iteration(&mut hw, &mut sink);

    let (_, leds, pwm, delay) = hw.release();
    assert!(leds.red.high, "red stays lit after the alert window");
    assert!(!leds.green.high);
    assert!(!leds.blue.high, "arm pulse ends off");
    assert_eq!(pwm.wrap, 499);
    assert_eq!(pwm.level, 0, "alert ends silent");
    assert!(pwm.enabled);
    // debounce + arm pulse + alert window + poll interval
    assert_eq!(delay.total_ns, (100 + 1000 + 2000 + 500) * 1_000_000);
}
