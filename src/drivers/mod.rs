//! Buzzer tone generation and one-shot hardware initialisation.

pub mod buzzer;
pub mod hw_init;
