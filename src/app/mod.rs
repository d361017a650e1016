//! Application core — pure sequencing logic, zero I/O.
//!
//! The [`ZoneSequencer`](sequencer::ZoneSequencer) turns a validated
//! [`Configuration`](crate::config::Configuration) into expander writes.
//! All interaction with hardware, timers and OS signals happens through the
//! **port traits** in [`ports`], keeping this layer fully testable without a
//! real I2C bus.

pub mod events;
pub mod ports;
pub mod sequencer;
