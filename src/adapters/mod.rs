//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `hardware`     | SensorPort         | `embedded-hal` input pins    |
//! |                | IndicatorPort      | `embedded-hal` output pins   |
//! |                | PwmPort            | buzzer PWM slice             |
//! |                | DelayPort          | `embedded-hal` delay         |
//! | `log_sink`     | EventSink          | Serial log output            |

pub mod hardware;
pub mod log_sink;
