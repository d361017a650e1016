//! Mock hardware for integration tests.
//!
//! Records every output write and every wait so tests can assert on the
//! full command history without touching a real bus.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use sprinkler::app::events::AppEvent;
use sprinkler::app::ports::{CancelPort, EventSink, OutputPort, WaitOutcome};
use sprinkler::error::WriteError;
use sprinkler::zone::OutputMask;

// ── MockOutput ────────────────────────────────────────────────

/// Output that can be told to reject the n-th write (1-based).
#[derive(Debug, Default)]
pub struct MockOutput {
    /// Every mask handed to `write`, including rejected ones.
    pub attempts: Vec<u8>,
    /// Masks the "bus" acknowledged.
    pub acked: Vec<u8>,
    fail_at: Option<usize>,
}

#[allow(dead_code)]
impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }

    pub fn teardown_attempts(&self) -> usize {
        self.attempts
            .iter()
            .filter(|m| **m == OutputMask::ALL_OFF.bits())
            .count()
    }
}

impl OutputPort for MockOutput {
    fn write(&mut self, mask: OutputMask) -> Result<(), WriteError> {
        self.attempts.push(mask.bits());
        if self.fail_at == Some(self.attempts.len()) {
            return Err(WriteError(ErrorKind::Bus));
        }
        self.acked.push(mask.bits());
        Ok(())
    }
}

/// Shared handle so a test can inspect the output after the guard that
/// owns it is dropped.
#[derive(Debug, Clone, Default)]
pub struct SharedOutput(pub Rc<RefCell<MockOutput>>);

impl OutputPort for SharedOutput {
    fn write(&mut self, mask: OutputMask) -> Result<(), WriteError> {
        self.0.borrow_mut().write(mask)
    }
}

// ── ScriptedCancel ────────────────────────────────────────────

/// Answers waits from a script; once the script runs out every wait times
/// out. The indefinite hold always returns, as if interrupted.
#[derive(Debug, Default)]
pub struct ScriptedCancel {
    script: VecDeque<WaitOutcome>,
    pub waits: Vec<Duration>,
    pub holds: usize,
}

#[allow(dead_code)]
impl ScriptedCancel {
    pub fn never() -> Self {
        Self::default()
    }

    /// Time out `n` waits, then cancel.
    pub fn cancel_on_wait(n: usize) -> Self {
        let mut script: VecDeque<_> = std::iter::repeat_n(WaitOutcome::TimedOut, n).collect();
        script.push_back(WaitOutcome::Cancelled);
        Self {
            script,
            ..Self::default()
        }
    }
}

impl CancelPort for ScriptedCancel {
    fn wait_or_cancel(&mut self, timeout: Duration) -> WaitOutcome {
        self.waits.push(timeout);
        self.script.pop_front().unwrap_or(WaitOutcome::TimedOut)
    }

    fn wait_for_cancel(&mut self) {
        self.holds += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockI2c ───────────────────────────────────────────────────

#[derive(Debug)]
pub struct MockI2cError(pub ErrorKind);

impl embedded_hal::i2c::Error for MockI2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// I2C bus that logs `(address, bytes)` for every write.
#[derive(Debug, Clone, Default)]
pub struct MockI2c {
    pub log: Rc<RefCell<Vec<(u8, Vec<u8>)>>>,
    pub nack: Rc<RefCell<bool>>,
}

#[allow(dead_code)]
impl MockI2c {
    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.log.borrow().clone()
    }

    pub fn set_nack(&self, nack: bool) {
        *self.nack.borrow_mut() = nack;
    }
}

impl ErrorType for MockI2c {
    type Error = MockI2cError;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if *self.nack.borrow() {
            return Err(MockI2cError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => self.log.borrow_mut().push((address, bytes.to_vec())),
                Operation::Read(buf) => buf.fill(0xFF),
            }
        }
        Ok(())
    }
}
