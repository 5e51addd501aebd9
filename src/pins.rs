//! GPIO / peripheral pin assignments for the HazardWatch board.
//!
//! Single source of truth for the default wiring.  [`SystemConfig`]
//! copies these into its `Default`, and every driver takes its pin from
//! the config rather than hard-coding a number.
//!
//! [`SystemConfig`]: crate::config::SystemConfig

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// HC-SR501 PIR motion sensor.  HIGH = motion.  Internal pull-down.
pub const MOTION_SENSOR_GPIO: u8 = 8;
/// IR flame sensor module, digital output.  LOW = flame.  Internal pull-up.
pub const FLAME_SENSOR_GPIO: u8 = 18;

// ---------------------------------------------------------------------------
// Status LEDs (discrete, active HIGH)
// ---------------------------------------------------------------------------

/// Motion alert indicator.
pub const LED_RED_GPIO: u8 = 13;
/// Flame alert indicator.
pub const LED_GREEN_GPIO: u8 = 11;
/// Arm acknowledgement pulse.
pub const LED_BLUE_GPIO: u8 = 12;

// ---------------------------------------------------------------------------
// User buttons (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Arms the system.
pub const RIGHT_BUTTON_GPIO: u8 = 6;
/// Disarms the system.
pub const LEFT_BUTTON_GPIO: u8 = 5;

// ---------------------------------------------------------------------------
// Piezo buzzer
// ---------------------------------------------------------------------------

/// Passive piezo, driven by a PWM output.
pub const BUZZER_GPIO: u8 = 10;

/// Pin numbers must stay below this.  `gpio_config` selects pins
/// through a 64-bit mask.
pub const GPIO_LIMIT: u8 = 64;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// PWM counter input clock (Hz) before the divisor.
pub const PWM_CLOCK_HZ: u32 = 125_000_000;
/// Fixed clock divisor.  Keeps the wrap inside the 16-bit counter for
/// every audible frequency above ~16 Hz.
pub const PWM_CLOCK_DIVISOR: f32 = 125.0;
