//! Port traits — the boundary between the sequencer and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ZoneSequencer (domain)
//! ```
//!
//! Driven adapters (expander output, cancellation source, event sinks)
//! implement these traits. The sequencer consumes them via generics, so the
//! domain core never touches the bus or the signal machinery directly.

use core::time::Duration;

use crate::error::WriteError;
use crate::zone::OutputMask;

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → expander)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the sequencer hands over the full output byte.
///
/// Each call replaces the previous register contents; implementations must
/// not merge masks.
pub trait OutputPort {
    fn write(&mut self, mask: OutputMask) -> Result<(), WriteError>;
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    fn write(&mut self, mask: OutputMask) -> Result<(), WriteError> {
        (**self).write(mask)
    }
}

// ───────────────────────────────────────────────────────────────
// Cancellation port (driven adapter: timer + interrupt → domain)
// ───────────────────────────────────────────────────────────────

/// How a timed wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration elapsed with no cancellation.
    TimedOut,
    /// Cancellation arrived first.
    Cancelled,
}

/// Race between a deadline and an external stop request.
///
/// These are the only places the sequencer blocks. Cancellation always wins,
/// however little time remains.
pub trait CancelPort {
    /// Block for `timeout` or until cancelled, whichever comes first.
    fn wait_or_cancel(&mut self, timeout: Duration) -> WaitOutcome;

    /// Block until cancelled.
    fn wait_for_cancel(&mut self);

    /// Non-blocking check for a cancellation that arrived before the run.
    fn cancel_pending(&mut self) -> bool {
        false
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The sequencer reports progress as [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AppEvent) {}
}
