//! End-to-end scenarios, asserted as exact hardware call sequences.

use crate::mock_hw::{HwCall, MockBoard, RecordingSink};

use hazardwatch::app::commands::AppCommand;
use hazardwatch::app::events::AppEvent;
use hazardwatch::app::monitor::MonitorLoop;
use hazardwatch::app::ports::{InputLine, Led};
use hazardwatch::config::SystemConfig;
use hazardwatch::fsm::ArmState;

// ── Armed, motion only ────────────────────────────────────────

#[test]
fn armed_motion_lights_red_and_sounds_two_khz() {
    let mut monitor = MonitorLoop::new(SystemConfig::default());
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();
    monitor.handle_command(AppCommand::Arm, &mut hw, &mut sink);
    hw.clear();

    // Flame held at its idle HIGH level throughout.
    hw.script(InputLine::Motion, &[true, false]);

    monitor.run_iteration(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![
            HwCall::Read(InputLine::Motion, true),
            HwCall::Led(Led::Red, true),
            HwCall::PwmConfigure(10),
            HwCall::PwmDivisor(125.0),
            HwCall::PwmWrap(499),
            HwCall::PwmEnabled(true),
            HwCall::PwmLevel(399),
            HwCall::Sleep(2000),
            HwCall::PwmConfigure(10),
            HwCall::PwmLevel(0),
            HwCall::Read(InputLine::Flame, true),
            HwCall::Led(Led::Green, false),
            HwCall::Sleep(500),
            HwCall::Read(InputLine::RightButton, true),
            HwCall::Read(InputLine::LeftButton, true),
        ]
    );
    assert!(hw.led(Led::Red), "red held until the next pass");

    hw.clear();
    monitor.run_iteration(&mut hw, &mut sink);

    assert_eq!(hw.calls[0], HwCall::Read(InputLine::Motion, false));
    assert_eq!(hw.calls[1], HwCall::Led(Led::Red, false));
    assert!(!hw.led_ever_on(Led::Green));
    assert!(hw.wraps().is_empty());
    assert_eq!(monitor.state(), ArmState::Armed);
}

// ── Disarmed, left pressed again ──────────────────────────────

#[test]
fn disarmed_left_press_is_a_quiet_no_op() {
    let mut monitor = MonitorLoop::new(SystemConfig::default());
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();
    hw.script(InputLine::LeftButton, &[true]);

    monitor.run_iteration(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![
            HwCall::Led(Led::Red, false),
            HwCall::Led(Led::Green, false),
            HwCall::PwmConfigure(10),
            HwCall::PwmLevel(0),
            HwCall::Read(InputLine::RightButton, true),
            HwCall::Read(InputLine::LeftButton, false),
            HwCall::Led(Led::Blue, false),
            HwCall::Led(Led::Green, false),
            HwCall::Led(Led::Red, false),
            HwCall::Sleep(100),
            HwCall::PwmConfigure(10),
            HwCall::PwmLevel(0),
        ]
    );
    assert_eq!(monitor.state(), ArmState::Disarmed);
    assert!(sink.events.is_empty(), "no state change reported");
}

// ── Full cycle ────────────────────────────────────────────────

#[test]
fn arm_alert_disarm_cycle() {
    let mut monitor = MonitorLoop::new(SystemConfig::default());
    let mut hw = MockBoard::new();
    let mut sink = RecordingSink::new();
    monitor.start(&mut sink);

    // Pass 1: disarmed, right pressed.
    hw.script(InputLine::RightButton, &[true]);
    monitor.run_iteration(&mut hw, &mut sink);
    // Pass 2: armed, flame fires.
    hw.script(InputLine::Flame, &[true]);
    monitor.run_iteration(&mut hw, &mut sink);
    // Pass 3: armed, quiet, left pressed.
    hw.script(InputLine::LeftButton, &[true]);
    monitor.run_iteration(&mut hw, &mut sink);
    // Pass 4: disarmed, motion held but ignored.
    hw.hold(InputLine::Motion, true);
    hw.clear();
    monitor.run_iteration(&mut hw, &mut sink);

    assert_eq!(
        sink.events,
        vec![
            AppEvent::Started(ArmState::Disarmed),
            AppEvent::StateChanged {
                from: ArmState::Disarmed,
                to: ArmState::Armed,
            },
            AppEvent::FlameDetected,
            AppEvent::StateChanged {
                from: ArmState::Armed,
                to: ArmState::Disarmed,
            },
        ]
    );
    assert!(!hw.was_read(InputLine::Motion));
    assert!(!hw.led_ever_on(Led::Red));
    assert_eq!(monitor.iterations(), 4);
}
