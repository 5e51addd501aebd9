//! The monitor loop — the hexagonal core.
//!
//! [`MonitorLoop`] owns the [`ArmState`], the buzzer [`ToneGenerator`] and
//! the configuration.  Every pass polls the sensors (when armed), then the
//! two buttons, and drives LEDs and buzzer accordingly.  All I/O flows
//! through the [`Board`] ports injected at call sites.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                 │       MonitorLoop        │
//! IndicatorPort ◀─│  ArmState · ToneGenerator│
//!   PwmPort     ◀─│                          │
//!   DelayPort   ◀─└─────────────────────────┘
//! ```
//!
//! ## Blocking semantics
//!
//! Alert windows, the poll interval and button debounce are plain blocking
//! sleeps.  While a 2 s alert sounds, no other input is observed; a second
//! sensor or a button pressed during that window is only seen if it is
//! still asserted when the loop reaches it.

use log::info;

use crate::config::SystemConfig;
use crate::drivers::buzzer::ToneGenerator;
use crate::fsm::{ArmState, ButtonPress};

use super::commands::AppCommand;
use super::events::{AppEvent, MonitorStatus};
use super::ports::{Board, EventSink, InputLine, Led};

pub struct MonitorLoop {
    state: ArmState,
    buzzer: ToneGenerator,
    config: SystemConfig,
    iterations: u64,
    motion_alerts: u32,
    flame_alerts: u32,
}

impl MonitorLoop {
    /// Construct the monitor in `Disarmed`.
    ///
    /// `config` is expected to have passed [`SystemConfig::validate`]
    /// during startup.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            state: ArmState::Disarmed,
            buzzer: ToneGenerator::from_config(&config),
            config,
            iterations: 0,
            motion_alerts: 0,
            flame_alerts: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.state));
        info!("Monitor started in {}", self.state);
    }

    /// Run forever.  There is no normal exit.
    pub fn run(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) -> ! {
        loop {
            self.run_iteration(hw, sink);
        }
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// One full pass: sensors (armed) or forced-off outputs (disarmed),
    /// then the right and left buttons, in that order.
    pub fn run_iteration(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) {
        self.iterations += 1;

        match self.state {
            ArmState::Armed => {
                self.poll_motion(hw, sink);
                self.poll_flame(hw, sink);
                hw.sleep_ms(self.config.poll_interval_ms);
            }
            ArmState::Disarmed => {
                hw.set_led(Led::Red, false);
                hw.set_led(Led::Green, false);
                self.buzzer.silence(hw);
            }
        }

        if InputLine::RightButton.is_active(hw.read_line(InputLine::RightButton)) {
            self.handle_command(AppCommand::Arm, hw, sink);
        }
        if InputLine::LeftButton.is_active(hw.read_line(InputLine::LeftButton)) {
            self.handle_command(AppCommand::Disarm, hw, sink);
        }

        let every = u64::from(self.config.status_interval_iterations);
        if every > 0 && self.iterations % every == 0 {
            sink.emit(&AppEvent::Status(self.status()));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply an arm/disarm request, including its LED and delay sequence.
    /// Repeating a command in the state it targets changes nothing but
    /// still runs the sequence.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl Board,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::Arm => {
                self.transition(ButtonPress::Right, sink);
                hw.set_led(Led::Blue, true);
                hw.sleep_ms(self.config.debounce_ms);
                hw.sleep_ms(self.config.arm_pulse_ms);
                hw.set_led(Led::Blue, false);
            }
            AppCommand::Disarm => {
                self.transition(ButtonPress::Left, sink);
                hw.set_led(Led::Blue, false);
                hw.set_led(Led::Green, false);
                hw.set_led(Led::Red, false);
                hw.sleep_ms(self.config.debounce_ms);
                self.buzzer.silence(hw);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ArmState {
        self.state
    }

    /// Loop passes executed since startup.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn buzzer(&self) -> &ToneGenerator {
        &self.buzzer
    }

    pub fn status(&self) -> MonitorStatus {
        MonitorStatus {
            state: self.state,
            iterations: self.iterations,
            motion_alerts: self.motion_alerts,
            flame_alerts: self.flame_alerts,
            buzzer_hz: self.buzzer.config().frequency,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn transition(&mut self, press: ButtonPress, sink: &mut impl EventSink) {
        let from = self.state;
        let to = from.on_press(press);
        if from != to {
            self.state = to;
            sink.emit(&AppEvent::StateChanged { from, to });
        }
    }

    fn poll_motion(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) {
        if InputLine::Motion.is_active(hw.read_line(InputLine::Motion)) {
            sink.emit(&AppEvent::MotionDetected);
            self.motion_alerts = self.motion_alerts.saturating_add(1);
            hw.set_led(Led::Red, true);
            self.sound_alert(hw, self.config.motion_tone_hz);
        } else {
            hw.set_led(Led::Red, false);
        }
    }

    fn poll_flame(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) {
        if InputLine::Flame.is_active(hw.read_line(InputLine::Flame)) {
            sink.emit(&AppEvent::FlameDetected);
            self.flame_alerts = self.flame_alerts.saturating_add(1);
            hw.set_led(Led::Green, true);
            self.sound_alert(hw, self.config.flame_tone_hz);
        } else {
            hw.set_led(Led::Green, false);
        }
    }

    /// Sound `frequency` for one alert window, then silence.
    fn sound_alert(&mut self, hw: &mut impl Board, frequency: f32) {
        self.buzzer.sound(hw, frequency);
        hw.sleep_ms(self.config.alert_duration_ms);
        self.buzzer.silence(hw);
    }
}

