//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the four input pins, three LED pins, the buzzer PWM and a delay
//! provider, exposing them through [`SensorPort`], [`IndicatorPort`],
//! [`PwmPort`] and [`DelayPort`].  Pins and delay are anything that
//! implements the `embedded-hal` 1.0 traits, so the same adapter runs on
//! the ESP-IDF raw GPIO handles and on host-side test doubles.
//!
//! Per-call HAL errors never reach the monitor: a failed read logs a
//! warning and reports the line's idle level (no alert, no button press);
//! a failed write logs and is dropped.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::warn;

use crate::app::ports::{DelayPort, IndicatorPort, InputLine, Led, PwmPort, SensorPort};

/// The four polled inputs.
pub struct InputPins<I> {
    pub motion: I,
    pub flame: I,
    pub right_button: I,
    pub left_button: I,
}

/// The three status LEDs.
pub struct LedPins<O> {
    pub red: O,
    pub green: O,
    pub blue: O,
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, O, P, D> {
    inputs: InputPins<I>,
    leds: LedPins<O>,
    pwm: P,
    delay: D,
}

impl<I, O, P, D> HardwareAdapter<I, O, P, D>
where
    I: InputPin,
    O: OutputPin,
    P: PwmPort,
    D: DelayNs,
{
    pub fn new(inputs: InputPins<I>, leds: LedPins<O>, pwm: P, delay: D) -> Self {
        Self {
            inputs,
            leds,
            pwm,
            delay,
        }
    }

    /// Drive every LED low and silence the buzzer output.
    pub fn all_off(&mut self, buzzer_gpio: u8) {
        for led in Led::ALL {
            self.set_led(led, false);
        }
        self.pwm.set_pwm_level(buzzer_gpio, 0);
    }

    /// Give the pins back (used by tests to inspect final levels).
    pub fn release(self) -> (InputPins<I>, LedPins<O>, P, D) {
        (self.inputs, self.leds, self.pwm, self.delay)
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I, O, P, D> SensorPort for HardwareAdapter<I, O, P, D>
where
    I: InputPin,
{
    fn read_line(&mut self, line: InputLine) -> bool {
        let pin = match line {
            InputLine::Motion => &mut self.inputs.motion,
            InputLine::Flame => &mut self.inputs.flame,
            InputLine::RightButton => &mut self.inputs.right_button,
            InputLine::LeftButton => &mut self.inputs.left_button,
        };
        match pin.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("GPIO read failed on {:?}: {:?}, assuming idle", line, e);
                line.idle_level()
            }
        }
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<I, O, P, D> IndicatorPort for HardwareAdapter<I, O, P, D>
where
    O: OutputPin,
{
    fn set_led(&mut self, led: Led, on: bool) {
        let pin = match led {
            Led::Red => &mut self.leds.red,
            Led::Green => &mut self.leds.green,
            Led::Blue => &mut self.leds.blue,
        };
        if let Err(e) = pin.set_state(PinState::from(on)) {
            warn!("GPIO write failed on {:?} LED: {:?}", led, e);
        }
    }
}

// ── PwmPort implementation ────────────────────────────────────

impl<I, O, P, D> PwmPort for HardwareAdapter<I, O, P, D>
where
    P: PwmPort,
{
    fn configure_pwm_output(&mut self, gpio: u8) {
        self.pwm.configure_pwm_output(gpio);
    }

    fn set_pwm_clock_divisor(&mut self, gpio: u8, divisor: f32) {
        self.pwm.set_pwm_clock_divisor(gpio, divisor);
    }

    fn set_pwm_wrap(&mut self, gpio: u8, wrap: u16) {
        self.pwm.set_pwm_wrap(gpio, wrap);
    }

    fn set_pwm_enabled(&mut self, gpio: u8, enabled: bool) {
        self.pwm.set_pwm_enabled(gpio, enabled);
    }

    fn set_pwm_level(&mut self, gpio: u8, level: u16) {
        self.pwm.set_pwm_level(gpio, level);
    }
}

// ── DelayPort implementation ──────────────────────────────────

impl<I, O, P, D> DelayPort for HardwareAdapter<I, O, P, D>
where
    D: DelayNs,
{
    fn sleep_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
