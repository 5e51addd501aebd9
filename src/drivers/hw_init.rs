//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions and pulls and the LEDC timer/channel for the
//! buzzer using raw ESP-IDF sys calls.  Called once from `main()` before
//! the monitor loop starts; any failure here aborts startup.
//!
//! Also provides the two raw handles the [`HardwareAdapter`] is built
//! from on target:
//!
//! - [`RawGpio`] — a configured pin exposed through the `embedded-hal`
//!   digital traits.
//! - [`LedcPwm`] — the buzzer's LEDC channel exposed through [`PwmPort`].
//!   LEDC has no wrap register, so divisor and wrap are folded back into
//!   a timer frequency and the level into a duty fraction.
//!
//! [`HardwareAdapter`]: crate::adapters::hardware::HardwareAdapter
//! [`PwmPort`]: crate::app::ports::PwmPort

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::config::SystemConfig;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::{info, warn};

#[cfg(target_os = "espidf")]
use crate::app::ports::{InputLine, Pull, PwmPort};

/// Validate `config`, then configure every pin it names.
#[cfg(target_os = "espidf")]
pub fn init_peripherals(config: &SystemConfig) -> crate::error::Result<()> {
    config.validate()?;
    // SAFETY: Called once from main() before the monitor loop; single-threaded.
    unsafe {
        init_gpio_inputs(config)?;
        init_gpio_outputs(config)?;
        init_ledc(config)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(config: &SystemConfig) -> crate::error::Result<()> {
    config.validate()?;
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs(config: &SystemConfig) -> Result<(), HwInitError> {
    let inputs = [
        (config.motion_sensor_gpio, InputLine::Motion),
        (config.flame_sensor_gpio, InputLine::Flame),
        (config.right_button_gpio, InputLine::RightButton),
        (config.left_button_gpio, InputLine::LeftButton),
    ];

    for (pin, line) in inputs {
        let (pull_up_en, pull_down_en) = match line.pull() {
            Pull::Up => (gpio_pullup_t_GPIO_PULLUP_ENABLE, gpio_pulldown_t_GPIO_PULLDOWN_DISABLE),
            Pull::Down => (gpio_pullup_t_GPIO_PULLUP_DISABLE, gpio_pulldown_t_GPIO_PULLDOWN_ENABLE),
        };
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en,
            pull_down_en,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: GPIO inputs configured (motion, flame, buttons)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs(config: &SystemConfig) -> Result<(), HwInitError> {
    let output_pins = [
        config.led_red_gpio,
        config.led_green_gpio,
        config.led_blue_gpio,
    ];

    for pin in output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(i32::from(pin), 0) };
    }

    info!("hw_init: GPIO outputs configured (LEDs off)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

/// A configured GPIO behind the `embedded-hal` digital traits.
#[cfg(target_os = "espidf")]
pub struct RawGpio {
    pin: i32,
}

#[cfg(target_os = "espidf")]
impl RawGpio {
    /// Wrap a pin that [`init_peripherals`] has already configured.
    pub fn new(pin: u8) -> Self {
        Self { pin: i32::from(pin) }
    }
}

#[cfg(target_os = "espidf")]
impl embedded_hal::digital::ErrorType for RawGpio {
    type Error = core::convert::Infallible;
}

#[cfg(target_os = "espidf")]
impl embedded_hal::digital::InputPin for RawGpio {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!gpio_read(self.pin))
    }
}

#[cfg(target_os = "espidf")]
impl embedded_hal::digital::OutputPin for RawGpio {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.pin, true);
        Ok(())
    }
}

// ── LEDC PWM (buzzer) ─────────────────────────────────────────

/// LEDC duty resolution for the buzzer channel.
pub const LEDC_DUTY_BITS: u32 = 10;

/// Pin the buzzer LEDC channel is currently routed to.
///
/// The monitor silences the buzzer on every disarmed pass, and each
/// activation asks for the output to be configured.  Only a change of
/// pin reaches `ledc_channel_config`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelBinding {
    gpio: Option<u8>,
}

impl ChannelBinding {
    /// Binding for a channel already routed to `gpio` by [`init_peripherals`].
    pub const fn bound(gpio: u8) -> Self {
        Self { gpio: Some(gpio) }
    }

    /// Record `gpio` as the target.  Returns `true` when the channel has
    /// to be (re)configured.
    pub fn rebind(&mut self, gpio: u8) -> bool {
        if self.gpio == Some(gpio) {
            return false;
        }
        self.gpio = Some(gpio);
        true
    }

    /// Forget the binding after a failed configure so the next call retries.
    pub fn reset(&mut self) {
        self.gpio = None;
    }
}

#[cfg(target_os = "espidf")]
const LEDC_MODE: ledc_mode_t = ledc_mode_t_LEDC_LOW_SPEED_MODE;
#[cfg(target_os = "espidf")]
const LEDC_TIMER_BUZZER: ledc_timer_t = ledc_timer_t_LEDC_TIMER_0;
#[cfg(target_os = "espidf")]
const LEDC_CH_BUZZER: ledc_channel_t = ledc_channel_t_LEDC_CHANNEL_0;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc(config: &SystemConfig) -> Result<(), HwInitError> {
    // Timer 0: buzzer, starts at the motion tone and paused.
    let timer0 = ledc_timer_config_t {
        speed_mode: LEDC_MODE,
        timer_num: LEDC_TIMER_BUZZER,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_10_BIT,
        freq_hz: config.motion_tone_hz as u32,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    let ret = unsafe { ledc_channel_config(&buzzer_channel(config.buzzer_gpio)) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    unsafe { ledc_timer_pause(LEDC_MODE, LEDC_TIMER_BUZZER); }

    info!("hw_init: LEDC configured (buzzer=CH0 on GPIO {})", config.buzzer_gpio);
    Ok(())
}

#[cfg(target_os = "espidf")]
fn buzzer_channel(gpio: u8) -> ledc_channel_config_t {
    ledc_channel_config_t {
        speed_mode: LEDC_MODE,
        channel: LEDC_CH_BUZZER,
        timer_sel: LEDC_TIMER_BUZZER,
        gpio_num: i32::from(gpio),
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }
}

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t, what: &str) -> bool {
    if ret != ESP_OK as i32 {
        warn!("LEDC {} failed (rc={})", what, ret);
        return false;
    }
    true
}

/// The buzzer's LEDC channel behind [`PwmPort`].
#[cfg(target_os = "espidf")]
pub struct LedcPwm {
    pwm_clock_hz: u32,
    divisor: f32,
    wrap: u16,
    binding: ChannelBinding,
}

#[cfg(target_os = "espidf")]
impl LedcPwm {
    /// Wrap the channel [`init_peripherals`] routed to `buzzer_gpio`.
    pub fn new(pwm_clock_hz: u32, buzzer_gpio: u8) -> Self {
        Self {
            pwm_clock_hz,
            divisor: 1.0,
            wrap: 0,
            binding: ChannelBinding::bound(buzzer_gpio),
        }
    }

    fn period_counts(&self) -> u32 {
        u32::from(self.wrap) + 1
    }
}

#[cfg(target_os = "espidf")]
impl PwmPort for LedcPwm {
    fn configure_pwm_output(&mut self, gpio: u8) {
        if !self.binding.rebind(gpio) {
            return;
        }
        // SAFETY: re-binding the channel to its pin; main-loop only.
        if !check(unsafe { ledc_channel_config(&buzzer_channel(gpio)) }, "channel config") {
            self.binding.reset();
        }
    }

    fn set_pwm_clock_divisor(&mut self, _gpio: u8, divisor: f32) {
        self.divisor = divisor;
    }

    fn set_pwm_wrap(&mut self, _gpio: u8, wrap: u16) {
        self.wrap = wrap;
        let freq = self.pwm_clock_hz as f32 / (self.divisor * self.period_counts() as f32);
        if freq < 1.0 {
            warn!("LEDC: wrap {} gives sub-1 Hz tone, frequency unchanged", wrap);
            return;
        }
        // SAFETY: timer configured in init_ledc(); main-loop only.
        check(unsafe { ledc_set_freq(LEDC_MODE, LEDC_TIMER_BUZZER, freq as u32) }, "set freq");
    }

    fn set_pwm_enabled(&mut self, _gpio: u8, enabled: bool) {
        // SAFETY: timer configured in init_ledc(); main-loop only.
        let ret = unsafe {
            if enabled {
                ledc_timer_resume(LEDC_MODE, LEDC_TIMER_BUZZER)
            } else {
                ledc_timer_pause(LEDC_MODE, LEDC_TIMER_BUZZER)
            }
        };
        check(ret, "timer enable");
    }

    fn set_pwm_level(&mut self, _gpio: u8, level: u16) {
        let duty = (u32::from(level) << LEDC_DUTY_BITS) / self.period_counts();
        // SAFETY: channel configured in init_ledc(); duty register writes
        // are race-free since only the main loop calls this.
        unsafe {
            if check(ledc_set_duty(LEDC_MODE, LEDC_CH_BUZZER, duty), "set duty") {
                check(ledc_update_duty(LEDC_MODE, LEDC_CH_BUZZER), "update duty");
            }
        }
    }
}
