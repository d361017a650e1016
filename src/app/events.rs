//! Outbound sequencer events.
//!
//! The [`ZoneSequencer`](super::sequencer::ZoneSequencer) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters decide
//! where they go; the binary logs them.

use core::time::Duration;

use crate::zone::{OutputMask, ZoneId};

use super::sequencer::RunResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A run is about to issue its first write.
    RunStarted {
        zones: Vec<ZoneId>,
        repeat: u64,
        timeout: Duration,
    },

    /// A mask was written successfully.
    ZoneActivated {
        pass: u64,
        zone: ZoneId,
        mask: OutputMask,
    },

    /// Zero-timeout mode: the zone stays on until cancelled.
    Holding { zone: ZoneId },

    /// The run reached a terminal state.
    RunFinished(RunResult),
}
