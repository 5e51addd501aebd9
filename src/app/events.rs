//! Outbound application events.
//!
//! The [`MonitorLoop`](super::monitor::MonitorLoop) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide where they go: the serial log on target, a recording
//! buffer in tests.

use crate::fsm::ArmState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The monitor has started (carries initial state).
    Started(ArmState),

    /// A button press moved the monitor between states.
    StateChanged { from: ArmState, to: ArmState },

    /// The PIR sensor fired while armed.
    MotionDetected,

    /// The flame sensor fired while armed.
    FlameDetected,

    /// Periodic status snapshot.
    Status(MonitorStatus),
}

/// A point-in-time status snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorStatus {
    pub state: ArmState,
    /// Loop passes since startup.
    pub iterations: u64,
    /// Motion alerts sounded since startup.
    pub motion_alerts: u32,
    /// Flame alerts sounded since startup.
    pub flame_alerts: u32,
    /// Frequency the buzzer is currently set to (0 = silent).
    pub buzzer_hz: f32,
}
