//! PCF8574 8-bit quasi-bidirectional I/O expander.
//!
//! The chip has no registers: a one-byte write sets all eight pins at once.
//!
//! Generic over any [`embedded_hal::i2c::I2c`] bus so the same driver runs
//! against `/dev/i2c-N` on Linux and against a mock bus in tests.

use embedded_hal::i2c::{I2c, SevenBitAddress};

pub struct Pcf8574<I2C> {
    bus: I2C,
    address: SevenBitAddress,
    last: Option<u8>,
}

impl<I2C: I2c> Pcf8574<I2C> {
    pub fn new(bus: I2C, address: SevenBitAddress) -> Self {
        Self {
            bus,
            address,
            last: None,
        }
    }

    /// Drive all eight pins from `value`.
    pub fn set_byte(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.bus.write(self.address, &[value])?;
        self.last = Some(value);
        Ok(())
    }

    /// Last value the bus acknowledged, if any.
    pub fn last_written(&self) -> Option<u8> {
        self.last
    }
}
