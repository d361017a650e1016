//! Channel-backed cancellation source.
//!
//! [`ChannelCancel`] implements [`CancelPort`] on top of an `mpsc` channel.
//! Anything holding a [`CancelHandle`] (a signal watcher thread, a test, a
//! future RPC handler) can end the current wait.

use core::fmt;
use core::time::Duration;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Instant;

use log::warn;

use crate::app::ports::{CancelPort, WaitOutcome};

/// Why a run was asked to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// SIGINT / Ctrl-C.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// Programmatic request.
    Requested,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "interrupt"),
            Self::Terminate => write!(f, "terminate"),
            Self::Requested => write!(f, "requested"),
        }
    }
}

/// Sending half. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelHandle(Sender<CancelReason>);

impl CancelHandle {
    /// Returns `false` once the receiving side is gone.
    pub fn cancel(&self, reason: CancelReason) -> bool {
        self.0.send(reason).is_ok()
    }
}

pub struct ChannelCancel {
    rx: Receiver<CancelReason>,
    reason: Option<CancelReason>,
}

impl ChannelCancel {
    pub fn new() -> (CancelHandle, Self) {
        let (tx, rx) = mpsc::channel();
        (CancelHandle(tx), Self { rx, reason: None })
    }

    /// Reason of the most recent cancellation observed by a wait.
    pub fn reason(&self) -> Option<CancelReason> {
        self.reason
    }
}

impl CancelPort for ChannelCancel {
    fn wait_or_cancel(&mut self, timeout: Duration) -> WaitOutcome {
        let started = Instant::now();
        match self.rx.recv_timeout(timeout) {
            Ok(reason) => {
                self.reason = Some(reason);
                WaitOutcome::Cancelled
            }
            Err(RecvTimeoutError::Timeout) => WaitOutcome::TimedOut,
            Err(RecvTimeoutError::Disconnected) => {
                // Nothing can cancel any more; serve the rest of the timeout.
                thread::sleep(timeout.saturating_sub(started.elapsed()));
                WaitOutcome::TimedOut
            }
        }
    }

    fn wait_for_cancel(&mut self) {
        match self.rx.recv() {
            Ok(reason) => self.reason = Some(reason),
            Err(_) => warn!("Cancellation source closed, ending hold"),
        }
    }
    fn cancel_pending(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(reason) => {
                self.reason = Some(reason);
                true
            }
            Err(_) => false,
        }
    }
}
