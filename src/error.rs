//! Unified error types for the sprinkler sequencer.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! binary's error handling uniform. Startup problems (`ConfigError`,
//! `HardwareInitError`) stop the process before a run begins; a
//! `WriteError` only ends the current run.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested configuration is malformed or contradictory.
    Config(ConfigError),
    /// The I2C bus could not be opened.
    HardwareInit(HardwareInitError),
    /// A mask write to the expander failed.
    Write(WriteError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::HardwareInit(e) => write!(f, "hardware init: {e}"),
            Self::Write(e) => write!(f, "write: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Reasons a zone plan is rejected before any hardware is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A zone token is not a non-negative integer.
    InvalidZone(String),
    /// A duration string could not be parsed.
    InvalidDuration(String),
    /// No in-range zone survived parsing.
    NoZonesSpecified,
    /// A zero timeout holds the first zone forever, so only one zone is allowed.
    TimeoutRequiredForMultipleZones,
    /// `repeat == 0`.
    NothingToDo,
    /// `repeat > 1` with a single zone.
    RedundantRepeat,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZone(token) => write!(f, "invalid zone {token:?}"),
            Self::InvalidDuration(text) => write!(f, "invalid duration {text:?}"),
            Self::NoZonesSpecified => write!(f, "no zone specified"),
            Self::TimeoutRequiredForMultipleZones => {
                write!(f, "no timeout with multiple zones")
            }
            Self::NothingToDo => write!(f, "nothing to do"),
            Self::RedundantRepeat => write!(f, "repeating only one zone"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware initialisation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareInitError {
    /// Device node or resource that failed to open.
    pub device: String,
    /// OS-level reason.
    pub reason: String,
}

impl fmt::Display for HardwareInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.device, self.reason)
    }
}

impl std::error::Error for HardwareInitError {}

impl From<HardwareInitError> for Error {
    fn from(e: HardwareInitError) -> Self {
        Self::HardwareInit(e)
    }
}

// ---------------------------------------------------------------------------
// Output write errors
// ---------------------------------------------------------------------------

/// A single mask write was not acknowledged by the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteError(pub ErrorKind);

impl WriteError {
    pub fn kind(&self) -> ErrorKind {
        self.0
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I2C {}", self.0)
    }
}

impl std::error::Error for WriteError {}

impl From<WriteError> for Error {
    fn from(e: WriteError) -> Self {
        Self::Write(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
