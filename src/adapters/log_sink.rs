//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing sequencer events through the `log`
//! facade. With `verbose` set, every written mask is logged at `info`;
//! otherwise it drops to `debug`. The plan summary is logged by the binary
//! before the bus is opened.

use log::{Level, debug, info, log};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::sequencer::RunResult;
use crate::config::format_duration;

pub struct LogEventSink {
    level: Level,
}

impl LogEventSink {
    pub fn new(verbose: bool) -> Self {
        Self {
            level: if verbose { Level::Info } else { Level::Debug },
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::RunStarted {
                zones,
                repeat,
                timeout,
            } => {
                debug!(
                    "Run started: {} zone(s) x {} every {}",
                    zones.len(),
                    repeat,
                    format_duration(*timeout)
                );
            }
            AppEvent::ZoneActivated { pass, zone, mask } => {
                log!(self.level, "Zone: {} Input: {} (pass {})", zone, mask, pass + 1);
            }
            AppEvent::Holding { zone } => {
                info!("Holding zone {} until interrupted", zone);
            }
            AppEvent::RunFinished(result) => match result {
                RunResult::Completed => info!("Run completed"),
                RunResult::Cancelled => info!("Run cancelled"),
                RunResult::Failed(e) => info!("Run failed: {}", e),
            },
        }
    }
}
