//! Chip drivers.

pub mod pcf8574;
