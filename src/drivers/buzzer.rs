//! Piezo buzzer tone generator.
//!
//! Drives a passive piezo from one PWM output.  The counter runs at
//! `pwm_clock_hz / clock_divisor` and wraps after `wrap` counts, so the
//! tone frequency is
//!
//! ```text
//!   f = pwm_clock_hz / (clock_divisor * (wrap + 1))
//!   wrap  = pwm_clock_hz / (clock_divisor * f) - 1
//!   level = duty / 100 * wrap
//! ```
//!
//! With the default 125 MHz clock and a divisor of 125 the counter ticks
//! at 1 MHz: 2 kHz → wrap 499, 10 kHz → wrap 99.
//!
//! A frequency of zero means "silent".  It never reaches the division;
//! the output level is forced to 0 instead.

use log::warn;

use crate::app::ports::PwmPort;
use crate::config::SystemConfig;

/// Unclamped wrap value for `frequency`.  Callers must ensure
/// `frequency > 0`.
pub fn raw_wrap(pwm_clock_hz: u32, clock_divisor: f32, frequency: f32) -> f32 {
    (pwm_clock_hz as f32 / (clock_divisor * frequency)) - 1.0
}

/// Register values for one audible tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PwmSettings {
    pub clock_divisor: f32,
    pub wrap: u16,
    pub level: u16,
}

/// Compute PWM settings for `frequency` at `duty_cycle` percent.
///
/// Returns `None` for silence: zero, negative or non-finite frequencies.
/// The wrap is clamped into the 16-bit counter range and the duty into
/// `0..=100`, so `level <= wrap` always holds.
pub fn pwm_settings(
    pwm_clock_hz: u32,
    clock_divisor: f32,
    frequency: f32,
    duty_cycle: f32,
) -> Option<PwmSettings> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return None;
    }

    let raw = raw_wrap(pwm_clock_hz, clock_divisor, frequency);
    let wrap = if raw < 0.0 {
        warn!("Buzzer: {} Hz above PWM range, wrap clamped to 0", frequency);
        0
    } else if raw > f32::from(u16::MAX) {
        warn!("Buzzer: {} Hz below PWM range, wrap clamped to {}", frequency, u16::MAX);
        u16::MAX
    } else {
        raw as u16
    };

    let duty = if duty_cycle.is_nan() { 0.0 } else { duty_cycle.clamp(0.0, 100.0) };
    let level = ((duty / 100.0) * f32::from(wrap)) as u16;

    Some(PwmSettings {
        clock_divisor,
        wrap,
        level,
    })
}

/// Buzzer parameters.  `clock_divisor` and `wrap` are derived on every
/// activation and are not independently settable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuzzerConfig {
    /// Tone frequency in Hz; 0 = silent.
    pub frequency: f32,
    /// Duty cycle percentage (0-100).
    pub duty_cycle: f32,
    pub gpio: u8,
    pub clock_divisor: f32,
    pub wrap: u16,
}

pub struct ToneGenerator {
    config: BuzzerConfig,
    pwm_clock_hz: u32,
    level: u16,
}

impl ToneGenerator {
    pub fn new(gpio: u8, duty_cycle: f32, pwm_clock_hz: u32, clock_divisor: f32) -> Self {
        Self {
            config: BuzzerConfig {
                frequency: 0.0,
                duty_cycle,
                gpio,
                clock_divisor,
                wrap: 0,
            },
            pwm_clock_hz,
            level: 0,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(
            config.buzzer_gpio,
            config.alert_duty_percent,
            config.pwm_clock_hz,
            config.pwm_clock_divisor,
        )
    }

    /// Program the PWM so the buzzer pin emits `frequency` Hz at
    /// `duty_cycle` percent, or silence it when `frequency` is 0.
    pub fn activate(&mut self, pwm: &mut impl PwmPort, frequency: f32, duty_cycle: f32) {
        let gpio = self.config.gpio;
        self.config.frequency = frequency;
        self.config.duty_cycle = duty_cycle;

        pwm.configure_pwm_output(gpio);

        match pwm_settings(
            self.pwm_clock_hz,
            self.config.clock_divisor,
            frequency,
            duty_cycle,
        ) {
            Some(s) => {
                pwm.set_pwm_clock_divisor(gpio, s.clock_divisor);
                pwm.set_pwm_wrap(gpio, s.wrap);
                pwm.set_pwm_enabled(gpio, true);
                pwm.set_pwm_level(gpio, s.level);
                self.config.wrap = s.wrap;
                self.level = s.level;
            }
            None => {
                self.config.frequency = 0.0;
                self.config.wrap = 0;
                pwm.set_pwm_level(gpio, 0);
                self.level = 0;
            }
        }
    }

    /// Sound `frequency` at the configured duty cycle.
    pub fn sound(&mut self, pwm: &mut impl PwmPort, frequency: f32) {
        let duty = self.config.duty_cycle;
        self.activate(pwm, frequency, duty);
    }

    pub fn silence(&mut self, pwm: &mut impl PwmPort) {
        let duty = self.config.duty_cycle;
        self.activate(pwm, 0.0, duty);
    }

    pub fn config(&self) -> &BuzzerConfig {
        &self.config
    }

    /// Last level written to the PWM compare register.
    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn is_sounding(&self) -> bool {
        self.config.frequency > 0.0 && self.level > 0
    }
}
