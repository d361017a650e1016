//! Output adapter for machines without an expander.
//!
//! Logs each mask instead of writing it, so a plan can be exercised end to
//! end on a workstation.

use log::info;

use crate::app::ports::OutputPort;
use crate::error::WriteError;
use crate::zone::OutputMask;

pub struct DryRunOutput {
    address: u8,
}

impl DryRunOutput {
    pub fn new(address: u8) -> Self {
        Self { address }
    }
}

impl OutputPort for DryRunOutput {
    fn write(&mut self, mask: OutputMask) -> Result<(), WriteError> {
        info!("DRY-RUN | 0x{:02x} <- {}", self.address, mask);
        Ok(())
    }
}
