//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the monitor's business rules: arming, sensor
//! polling and alert sequencing.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod events;
pub mod monitor;
pub mod ports;
