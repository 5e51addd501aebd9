//! System configuration parameters
//!
//! Every tunable the monitor uses: pin wiring, alert tones, PWM clocking
//! and loop timing.  Defaults reproduce the reference board (see
//! [`pins`](crate::pins)).  The only override path is a JSON document
//! baked in at compile time through `HAZARDWATCH_CONFIG_JSON`; there is
//! no runtime reconfiguration.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::drivers::buzzer::raw_wrap;
use crate::pins;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Pins ---
    pub motion_sensor_gpio: u8,
    pub flame_sensor_gpio: u8,
    pub led_red_gpio: u8,
    pub led_green_gpio: u8,
    pub led_blue_gpio: u8,
    pub right_button_gpio: u8,
    pub left_button_gpio: u8,
    pub buzzer_gpio: u8,

    // --- Alert tones ---
    /// Tone for motion alerts (Hz)
    pub motion_tone_hz: f32,
    /// Tone for flame alerts (Hz)
    pub flame_tone_hz: f32,
    /// Buzzer PWM duty cycle while sounding (0-100%)
    pub alert_duty_percent: f32,

    // --- PWM ---
    /// PWM counter input clock (Hz)
    pub pwm_clock_hz: u32,
    /// Fixed PWM clock divisor
    pub pwm_clock_divisor: f32,

    // --- Timing ---
    /// How long an alert tone holds (milliseconds)
    pub alert_duration_ms: u32,
    /// Pause at the end of every armed pass (milliseconds)
    pub poll_interval_ms: u32,
    /// Pause after a button press (milliseconds)
    pub debounce_ms: u32,
    /// Blue LED hold after arming, on top of the debounce (milliseconds)
    pub arm_pulse_ms: u32,
    /// Emit a status report every N loop iterations (0 = never)
    pub status_interval_iterations: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Pins
            motion_sensor_gpio: pins::MOTION_SENSOR_GPIO,
            flame_sensor_gpio: pins::FLAME_SENSOR_GPIO,
            led_red_gpio: pins::LED_RED_GPIO,
            led_green_gpio: pins::LED_GREEN_GPIO,
            led_blue_gpio: pins::LED_BLUE_GPIO,
            right_button_gpio: pins::RIGHT_BUTTON_GPIO,
            left_button_gpio: pins::LEFT_BUTTON_GPIO,
            buzzer_gpio: pins::BUZZER_GPIO,

            // Tones
            motion_tone_hz: 2_000.0,
            flame_tone_hz: 10_000.0,
            alert_duty_percent: 80.0,

            // PWM
            pwm_clock_hz: pins::PWM_CLOCK_HZ,
            pwm_clock_divisor: pins::PWM_CLOCK_DIVISOR,

            // Timing
            alert_duration_ms: 2_000,
            poll_interval_ms: 500,
            debounce_ms: 100,
            arm_pulse_ms: 1_000,
            status_interval_iterations: 120,
        }
    }
}

impl SystemConfig {
    /// All eight GPIO assignments, in a fixed order.
    pub fn gpios(&self) -> [u8; 8] {
        [
            self.motion_sensor_gpio,
            self.flame_sensor_gpio,
            self.led_red_gpio,
            self.led_green_gpio,
            self.led_blue_gpio,
            self.right_button_gpio,
            self.left_button_gpio,
            self.buzzer_gpio,
        ]
    }

    /// Reject values the loop or the PWM peripheral cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gpios = self.gpios();
        if gpios.iter().any(|&g| g >= pins::GPIO_LIMIT) {
            return Err(ConfigError::ValidationFailed("GPIO number out of range"));
        }
        for (i, a) in gpios.iter().enumerate() {
            if gpios[i + 1..].contains(a) {
                return Err(ConfigError::ValidationFailed("duplicate GPIO assignment"));
            }
        }

        if self.pwm_clock_hz == 0 {
            return Err(ConfigError::ValidationFailed("pwm_clock_hz must be > 0"));
        }
        if !(1.0..256.0).contains(&self.pwm_clock_divisor) {
            return Err(ConfigError::ValidationFailed(
                "pwm_clock_divisor must be in [1, 256)",
            ));
        }
        if !(0.0..=100.0).contains(&self.alert_duty_percent) {
            return Err(ConfigError::ValidationFailed(
                "alert_duty_percent must be in [0, 100]",
            ));
        }

        for hz in [self.motion_tone_hz, self.flame_tone_hz] {
            if !hz.is_finite() || hz <= 0.0 {
                return Err(ConfigError::ValidationFailed("tone frequency must be > 0"));
            }
            let wrap = raw_wrap(self.pwm_clock_hz, self.pwm_clock_divisor, hz);
            if !(0.0..=f32::from(u16::MAX)).contains(&wrap) {
                return Err(ConfigError::ValidationFailed(
                    "tone frequency outside PWM counter range",
                ));
            }
        }

        if self.alert_duration_ms == 0 {
            return Err(ConfigError::ValidationFailed("alert_duration_ms must be > 0"));
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::ValidationFailed("debounce_ms must be > 0"));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override on top of the defaults
    /// and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::error!("Config override rejected: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration for this firmware image.
    ///
    /// Uses the `HAZARDWATCH_CONFIG_JSON` value captured at compile time,
    /// or the defaults when it was unset.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        match option_env!("HAZARDWATCH_CONFIG_JSON") {
            Some(json) => {
                log::info!("Applying build-time config override");
                Self::from_json(json)
            }
            None => Ok(Self::default()),
        }
    }
}
