//! Hardware adapter — bridges the expander driver to the [`OutputPort`].
//!
//! [`GuardedOutput`] owns the output for the length of a run and puts the
//! expander back to all-off when the run ends, however it ends. This is the
//! only place the all-off mask is written.

use embedded_hal::i2c::{Error as _, I2c};
use log::{error, info};

use crate::app::ports::OutputPort;
use crate::drivers::pcf8574::Pcf8574;
use crate::error::WriteError;
use crate::zone::OutputMask;

// ── OutputPort for the PCF8574 ────────────────────────────────

impl<I2C: I2c> OutputPort for Pcf8574<I2C> {
    fn write(&mut self, mask: OutputMask) -> Result<(), WriteError> {
        self.set_byte(mask.bits()).map_err(|e| WriteError(e.kind()))
    }
}

// ── GuardedOutput ─────────────────────────────────────────────

/// Scoped owner of an output that restores [`OutputMask::ALL_OFF`] once
/// after use.
///
/// The teardown write happens on [`restore`](Self::restore) or on drop,
/// whichever comes first. A write after a restore re-arms the guard.
/// Teardown failures are logged and swallowed.
pub struct GuardedOutput<O: OutputPort> {
    inner: O,
    armed: bool,
}

impl<O: OutputPort> GuardedOutput<O> {
    pub fn new(inner: O) -> Self {
        Self { inner, armed: true }
    }

    pub fn get_ref(&self) -> &O {
        &self.inner
    }

    /// True until the all-off mask has been attempted.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Write the all-off mask if it has not been attempted yet.
    pub fn restore(&mut self) -> Result<(), WriteError> {
        if !self.armed {
            return Ok(());
        }
        self.armed = false;
        match self.inner.write(OutputMask::ALL_OFF) {
            Ok(()) => {
                info!("Outputs restored to {}", OutputMask::ALL_OFF);
                Ok(())
            }
            Err(e) => {
                error!("Failed to restore outputs: {}", e);
                Err(e)
            }
        }
    }
}

impl<O: OutputPort> OutputPort for GuardedOutput<O> {
    fn write(&mut self, mask: OutputMask) -> Result<(), WriteError> {
        self.armed = true;
        self.inner.write(mask)
    }
}

impl<O: OutputPort> Drop for GuardedOutput<O> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
