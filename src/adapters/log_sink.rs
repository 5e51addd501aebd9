//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (ESP-IDF logger → UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            AppEvent::MotionDetected => {
                warn!("ALERT | motion detected");
            }
            AppEvent::FlameDetected => {
                warn!("ALERT | flame detected");
            }
            AppEvent::Status(s) => {
                info!(
                    "STATUS | state={} | iter={} | motion_alerts={} flame_alerts={} | buzzer={:.0}Hz",
                    s.state, s.iterations, s.motion_alerts, s.flame_alerts, s.buzzer_hz,
                );
            }
        }
    }
}
