//! Command line definition.

use core::time::Duration;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{
    self, Configuration, DEFAULT_EXPANDER_ADDRESS, DEFAULT_I2C_BUS, DEFAULT_REPEAT,
};
use crate::error::ConfigError;

/// Run irrigation zones one at a time through a PCF8574 I2C expander
#[derive(Debug, Parser)]
#[command(
    name = "sprinkler",
    version,
    after_help = "Interrupt (Ctrl-C) or SIGTERM stops the run and switches every zone off."
)]
pub struct Cli {
    /// Comma-separated list of zones to use (1-8); may be given more than once
    #[arg(
        short,
        long,
        value_name = "LIST",
        action = ArgAction::Append,
        conflicts_with = "plan"
    )]
    pub zone: Vec<String>,

    /// Amount of time to run each zone (e.g. 10s, 1m30s; 0 holds one zone until interrupted)
    #[arg(short, long, value_name = "DURATION", default_value = "10s")]
    pub timeout: String,

    /// How many times to repeat the zone list
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_REPEAT)]
    pub repeat: u64,

    /// Print the resolved plan and every mask written
    #[arg(short, long)]
    pub verbose: bool,

    /// JSON plan file with `zones`, `timeout` and `repeat`
    #[arg(long, value_name = "FILE", conflicts_with_all = ["timeout", "repeat"])]
    pub plan: Option<PathBuf>,

    /// I2C bus number (/dev/i2c-N)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_I2C_BUS)]
    pub bus: u8,

    /// Expander address (7-bit, decimal or 0x-prefixed)
    #[arg(long, value_name = "ADDR", default_value_t = DEFAULT_EXPANDER_ADDRESS, value_parser = parse_address)]
    pub address: u8,

    /// Log masks instead of writing to the bus
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Every `--zone` value, parsed and concatenated in order.
    pub fn raw_zones(&self) -> Result<Vec<u64>, ConfigError> {
        let mut zones = Vec::new();
        for list in &self.zone {
            zones.extend(config::parse_zone_list(list)?);
        }
        Ok(zones)
    }

    /// Timeout as given, before the floor is applied.
    pub fn requested_timeout(&self) -> Result<Duration, ConfigError> {
        config::parse_duration(&self.timeout)
    }

    /// Validate the flag values into a [`Configuration`].
    pub fn configuration(&self) -> Result<Configuration, ConfigError> {
        config::validate(&self.raw_zones()?, self.requested_timeout()?, self.repeat)
    }
}

fn parse_address(text: &str) -> Result<u8, String> {
    match config::parse_uint(text) {
        Some(addr) if addr <= 0x7F => Ok(addr as u8),
        Some(addr) => Err(format!("0x{addr:x} is not a 7-bit address")),
        None => Err(format!("{text:?} is not an address")),
    }
}
