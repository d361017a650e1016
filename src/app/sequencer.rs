//! Zone sequencer — the run state machine.
//!
//! ```text
//!   Ready ──run()──▶ Running ──▶ Finished(Completed | Cancelled | Failed)
//! ```
//!
//! For each pass and each zone the sequencer computes the mask, writes it,
//! then waits on the [`CancelPort`]. The wait is the only suspension point,
//! so a cancellation observed there always lands before the next write. A
//! cancellation already pending when the run starts means nothing is written.
//! The sequencer never writes the all-off mask itself; restoring the
//! expander is the job of whoever owns the output
//! (see [`GuardedOutput`](crate::adapters::hardware::GuardedOutput)).

use log::{error, info, warn};

use crate::config::Configuration;
use crate::error::WriteError;

use super::events::AppEvent;
use super::ports::{CancelPort, EventSink, OutputPort, WaitOutcome};

/// Terminal outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResult {
    /// Every pass over every zone finished its full timeout.
    Completed,
    /// Stopped by an external request. Not an error.
    Cancelled,
    /// A write failed; zones before it were actuated as requested.
    Failed(WriteError),
}

impl RunResult {
    /// `Completed` and `Cancelled` are both normal endings.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Lifecycle of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Ready,
    Running,
    Finished(RunResult),
}

/// Position of a run, updated before each write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    /// Zero-based pass over the zone list.
    pub pass: u64,
    /// Zero-based index into the zone list.
    pub index: usize,
    /// Writes acknowledged by the output so far.
    pub writes: u64,
}

/// Drives one validated [`Configuration`] against the ports.
pub struct ZoneSequencer {
    config: Configuration,
    state: RunState,
    status: RunStatus,
}

impl ZoneSequencer {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            state: RunState::default(),
            status: RunStatus::Ready,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Execute the plan until it completes, is cancelled, or a write fails.
    ///
    /// A finished sequencer does not resume: calling `run` again returns the
    /// stored result without touching the output.
    pub fn run(
        &mut self,
        output: &mut impl OutputPort,
        cancel: &mut impl CancelPort,
        sink: &mut impl EventSink,
    ) -> RunResult {
        if let RunStatus::Finished(result) = self.status {
            warn!("Sequencer already finished ({:?}), not restarting", result);
            return result;
        }

        self.status = RunStatus::Running;
        sink.emit(&AppEvent::RunStarted {
            zones: self.config.zones().to_vec(),
            repeat: self.config.repeat(),
            timeout: self.config.timeout(),
        });

        let result = self.drive(output, cancel, sink);

        self.status = RunStatus::Finished(result);
        sink.emit(&AppEvent::RunFinished(result));
        result
    }

    fn drive(
        &mut self,
        output: &mut impl OutputPort,
        cancel: &mut impl CancelPort,
        sink: &mut impl EventSink,
    ) -> RunResult {
        let timeout = self.config.timeout();

        if cancel.cancel_pending() {
            info!("Cancelled before the first write");
            return RunResult::Cancelled;
        }

        for pass in 0..self.config.repeat() {
            for (index, &zone) in self.config.zones().iter().enumerate() {
                self.state.pass = pass;
                self.state.index = index;

                let mask = zone.mask();
                if let Err(e) = output.write(mask) {
                    error!("Zone {}: write of {} failed: {}", zone, mask, e);
                    return RunResult::Failed(e);
                }
                self.state.writes += 1;
                sink.emit(&AppEvent::ZoneActivated { pass, zone, mask });

                if timeout.is_zero() {
                    sink.emit(&AppEvent::Holding { zone });
                    cancel.wait_for_cancel();
                    return RunResult::Cancelled;
                }

                if cancel.wait_or_cancel(timeout) == WaitOutcome::Cancelled {
                    info!("Cancelled during zone {} (pass {})", zone, pass + 1);
                    return RunResult::Cancelled;
                }
            }
        }

        RunResult::Completed
    }
}
