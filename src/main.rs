//! Sprinkler — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GuardedOutput<Pcf8574<LinuxI2cBus>>   ChannelCancel ◀─ signal │
//! │  (or DryRunOutput)                     LogEventSink            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │     ConfigValidator  ──▶  ZoneSequencer (pure logic)   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::fs;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use log::{info, warn};

use sprinkler::adapters::cancel::ChannelCancel;
use sprinkler::adapters::dry_run::DryRunOutput;
use sprinkler::adapters::hardware::GuardedOutput;
use sprinkler::adapters::linux_i2c::LinuxI2cBus;
use sprinkler::adapters::log_sink::LogEventSink;
use sprinkler::adapters::signal;
use sprinkler::app::ports::OutputPort;
use sprinkler::app::sequencer::{RunResult, ZoneSequencer};
use sprinkler::cli::Cli;
use sprinkler::config::{Configuration, format_duration};
use sprinkler::drivers::pcf8574::Pcf8574;
use sprinkler::error::ConfigError;
use sprinkler::zone::ZoneId;

fn main() -> Result<()> {
    // Before anything can spawn a thread: the watcher relies on every thread
    // inheriting the blocked mask.
    let mut cancel = signal::install().context("failed to install signal handlers")?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_configuration(&cli)?;
    if cli.verbose {
        log_plan(&config);
    }
    let mut sequencer = ZoneSequencer::new(config);
    let mut sink = LogEventSink::new(cli.verbose);

    let result = if cli.dry_run {
        let output = GuardedOutput::new(DryRunOutput::new(cli.address));
        execute(&mut sequencer, output, &mut cancel, &mut sink)
    } else {
        let bus = LinuxI2cBus::open(cli.bus)
            .map_err(sprinkler::Error::from)
            .context("I2C bus initialisation failed")?;
        info!("Expander at 0x{:02x} on /dev/i2c-{}", cli.address, cli.bus);
        let output = GuardedOutput::new(Pcf8574::new(bus, cli.address));
        execute(&mut sequencer, output, &mut cancel, &mut sink)
    };

    match result {
        RunResult::Completed | RunResult::Cancelled => Ok(()),
        RunResult::Failed(e) => {
            let state = sequencer.state();
            Err(sprinkler::Error::from(e)).with_context(|| {
                format!(
                    "run aborted after {} write(s) (pass {}, zone index {})",
                    state.writes,
                    state.pass + 1,
                    state.index
                )
            })
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Run the sequencer and restore the outputs, whatever the outcome.
fn execute<O: OutputPort>(
    sequencer: &mut ZoneSequencer,
    mut output: GuardedOutput<O>,
    cancel: &mut ChannelCancel,
    sink: &mut LogEventSink,
) -> RunResult {
    let result = sequencer.run(&mut output, cancel, sink);
    if let Some(reason) = cancel.reason() {
        info!("Stopped by {}", reason);
    }
    // a failed teardown is logged inside restore() and must not mask the result
    let _ = output.restore();
    result
}

/// Plan summary, printed before any hardware is touched.
fn log_plan(config: &Configuration) {
    let zones: Vec<u8> = config.zones().iter().map(|z| z.get()).collect();
    info!("Zones: {:?}", zones);
    info!("Repeating: {}", config.repeat());
    info!("Timeout: {}", format_duration(config.timeout()));
}

fn load_configuration(cli: &Cli) -> Result<Configuration> {
    if let Some(path) = &cli.plan {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read plan {}", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("invalid plan {}", path.display()));
    }

    let raw = cli.raw_zones().map_err(sprinkler::Error::from)?;
    for dropped in raw.iter().filter(|z| ZoneId::new(**z).is_none()) {
        warn!("Ignoring zone {} (valid zones are 1-8)", dropped);
    }

    let config = match cli.configuration() {
        Ok(config) => config,
        Err(e) => {
            if e == ConfigError::NoZonesSpecified {
                eprintln!("{}", Cli::command().render_help());
            }
            bail!(sprinkler::Error::from(e));
        }
    };

    if cli.requested_timeout().is_ok_and(|requested| config.timeout() != requested) {
        warn!("Increasing timeout to {}", format_duration(config.timeout()));
    }
    Ok(config)
}
