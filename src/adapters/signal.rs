//! OS signal → cancellation adapter.
//!
//! `SIGINT` and `SIGTERM` are blocked on the calling thread and a watcher
//! thread collects them with `sigwait`, forwarding each one to a
//! [`CancelHandle`].
//!
//! Call [`install`] before any other thread is spawned: threads inherit the
//! signal mask of their creator, and a thread that leaves the signals
//! unblocked would receive them with the default (terminating) action.

use std::io;
use std::thread;

use log::{info, warn};
use nix::sys::signal::{SigSet, Signal};

use super::cancel::{CancelReason, ChannelCancel};

/// Block the stop signals and start the watcher thread.
pub fn install() -> io::Result<ChannelCancel> {
    let mut set = SigSet::empty();
    set.add(Signal::SIGINT);
    set.add(Signal::SIGTERM);
    set.thread_block().map_err(io::Error::from)?;

    let (handle, cancel) = ChannelCancel::new();
    thread::Builder::new()
        .name("signal-watch".into())
        .spawn(move || {
            loop {
                let reason = match set.wait() {
                    Ok(sig) => {
                        info!("{} received", sig.as_str());
                        if sig == Signal::SIGTERM {
                            CancelReason::Terminate
                        } else {
                            CancelReason::Interrupt
                        }
                    }
                    Err(e) => {
                        warn!("sigwait failed: {}", e);
                        return;
                    }
                };
                if !handle.cancel(reason) {
                    return;
                }
            }
        })?;

    Ok(cancel)
}
