//! Armed / disarmed state machine.
//!
//! ```text
//!            right button
//!   ┌──────────┐ ───────▶ ┌───────┐
//!   │ Disarmed │          │ Armed │
//!   └──────────┘ ◀─────── └───────┘
//!             left button
//! ```
//!
//! Every other input is a self-transition.  The machine is a plain value
//! owned by [`MonitorLoop`](crate::app::monitor::MonitorLoop); there is no
//! process-wide flag.

/// The two operating states of the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ArmState {
    /// Alert outputs are forced off regardless of sensor readings.
    #[default]
    Disarmed = 0,
    /// Sensor-triggered alerts (LED + tone) are active.
    Armed = 1,
}

/// A button press observed during one loop pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPress {
    Right,
    Left,
}

impl ArmState {
    /// Next state after `press`.
    pub const fn on_press(self, press: ButtonPress) -> Self {
        match press {
            ButtonPress::Right => Self::Armed,
            ButtonPress::Left => Self::Disarmed,
        }
    }

    pub const fn is_armed(self) -> bool {
        matches!(self, Self::Armed)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::Armed => "Armed",
        }
    }
}

impl core::fmt::Display for ArmState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
