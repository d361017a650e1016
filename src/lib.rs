//! Sprinkler zone sequencer library.
//!
//! Exposes the pure-logic modules for integration testing. Linux-only
//! adapters (i2c-dev, signal handling) are compiled with the `linux`
//! feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod drivers;
pub mod error;
pub mod zone;

pub use error::{Error, Result};
