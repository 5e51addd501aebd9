//! Inbound commands to the monitor.
//!
//! The physical buttons are the only front-end on the board; each press
//! is translated into one of these and handed to
//! [`MonitorLoop::handle_command`](super::monitor::MonitorLoop::handle_command).

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Enter `Armed` and pulse the blue LED (right button).
    Arm,

    /// Enter `Disarmed` and force every alert output off (left button).
    Disarm,
}
