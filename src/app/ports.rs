//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorLoop (domain)
//! ```
//!
//! Driven adapters (GPIO, PWM, delay, event sinks) implement these traits.
//! The [`MonitorLoop`](super::monitor::MonitorLoop) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Every port call is infallible from the loop's point of view.  Adapters
//! that sit on a fallible HAL absorb per-call errors themselves (log and
//! substitute a safe value); only peripheral bring-up may fail, and that
//! happens before the loop starts.

// ───────────────────────────────────────────────────────────────
// Input lines
// ───────────────────────────────────────────────────────────────

/// The four digital inputs the monitor polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputLine {
    /// PIR motion sensor (active HIGH).
    Motion,
    /// Flame sensor (active LOW).
    Flame,
    /// Arm button (active LOW, pull-up).
    RightButton,
    /// Disarm button (active LOW, pull-up).
    LeftButton,
}

/// Internal pull resistor a line needs at bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
}

impl InputLine {
    pub const ALL: [Self; 4] = [
        Self::Motion,
        Self::Flame,
        Self::RightButton,
        Self::LeftButton,
    ];

    /// Electrical level that means "asserted" on this line.
    pub const fn active_level(self) -> bool {
        match self {
            Self::Motion => true,
            Self::Flame | Self::RightButton | Self::LeftButton => false,
        }
    }

    /// Level the line rests at when nothing is happening.
    pub const fn idle_level(self) -> bool {
        !self.active_level()
    }

    /// Interpret a raw level read from this line.
    pub const fn is_active(self, level: bool) -> bool {
        level == self.active_level()
    }

    /// Pull resistor that holds the line at its idle level.
    pub const fn pull(self) -> Pull {
        if self.idle_level() { Pull::Up } else { Pull::Down }
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to sample one input.
pub trait SensorPort {
    /// Raw electrical level of `line` (`true` = HIGH).
    fn read_line(&mut self, line: InputLine) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LEDs)
// ───────────────────────────────────────────────────────────────

/// The three status LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Led {
    Red,
    Green,
    Blue,
}

impl Led {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];
}

pub trait IndicatorPort {
    /// Drive `led` on (HIGH) or off (LOW).
    fn set_led(&mut self, led: Led, on: bool);
}

// ───────────────────────────────────────────────────────────────
// PWM port (driven adapter: ToneGenerator → PWM slice)
// ───────────────────────────────────────────────────────────────

/// Primitive PWM operations, addressed by GPIO.
///
/// Mirrors a wrap-counter PWM peripheral: the counter ticks at
/// `input_clock / clock_divisor` and resets after `wrap`; the pin is HIGH
/// while the counter is below `level`.
pub trait PwmPort {
    /// Route `gpio` to its PWM function.
    fn configure_pwm_output(&mut self, gpio: u8);
    fn set_pwm_clock_divisor(&mut self, gpio: u8, divisor: f32);
    fn set_pwm_wrap(&mut self, gpio: u8, wrap: u16);
    fn set_pwm_enabled(&mut self, gpio: u8, enabled: bool);
    fn set_pwm_level(&mut self, gpio: u8, level: u16);
}

// ───────────────────────────────────────────────────────────────
// Delay port
// ───────────────────────────────────────────────────────────────

/// Blocking delay.  The loop's alert windows and debounce pauses go
/// through here so tests can observe them without sleeping.
pub trait DelayPort {
    fn sleep_ms(&mut self, ms: u32);
}

/// Everything one monitor pass touches.  Blanket-implemented, so any
/// adapter that provides the four hardware ports qualifies.
pub trait Board: SensorPort + IndicatorPort + PwmPort + DelayPort {}

impl<T: SensorPort + IndicatorPort + PwmPort + DelayPort> Board for T {}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from loading or validating [`SystemConfig`](crate::config::SystemConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
