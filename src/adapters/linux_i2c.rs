//! Linux I2C adapter — `/dev/i2c-N` behind [`embedded_hal::i2c::I2c`].
//!
//! The kernel's i2c-dev interface binds a file descriptor to one slave
//! address with the `I2C_SLAVE` ioctl; after that every `write(2)` or
//! `read(2)` is a complete bus transaction to that address.
//!
//! Each [`Operation`] becomes its own transaction, so a write followed by a
//! read is separated by a STOP rather than a repeated START. The PCF8574
//! does not care.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::fd::AsRawFd;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress};
use log::debug;
use nix::errno::Errno;

use crate::error::HardwareInitError;

const I2C_SLAVE: u16 = 0x0703;

nix::ioctl_write_int_bad!(i2c_set_slave, I2C_SLAVE);

/// Failed i2c-dev call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinuxI2cError {
    pub op: &'static str,
    pub errno: Errno,
}

impl embedded_hal::i2c::Error for LinuxI2cError {
    fn kind(&self) -> ErrorKind {
        match self.errno {
            Errno::ENXIO | Errno::EREMOTEIO => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            Errno::EAGAIN => ErrorKind::ArbitrationLoss,
            Errno::EBUSY | Errno::ETIMEDOUT => ErrorKind::Bus,
            _ => ErrorKind::Other,
        }
    }
}

impl core::fmt::Display for LinuxI2cError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.op, self.errno.desc())
    }
}

impl std::error::Error for LinuxI2cError {}

fn errno_of(op: &'static str, e: &std::io::Error) -> LinuxI2cError {
    LinuxI2cError {
        op,
        errno: Errno::from_raw(e.raw_os_error().unwrap_or(Errno::EIO as i32)),
    }
}

/// An open `/dev/i2c-N` character device. Closed on drop.
pub struct LinuxI2cBus {
    file: File,
    slave: Option<SevenBitAddress>,
}

impl LinuxI2cBus {
    pub fn open(bus: u8) -> Result<Self, HardwareInitError> {
        let path = format!("/dev/i2c-{bus}");
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| HardwareInitError {
                device: path.clone(),
                reason: e.to_string(),
            })?;
        debug!("Opened {}", path);
        Ok(Self { file, slave: None })
    }

    fn select(&mut self, address: SevenBitAddress) -> Result<(), LinuxI2cError> {
        if self.slave == Some(address) {
            return Ok(());
        }
        // SAFETY: the descriptor belongs to `self.file`, which outlives the
        // call, and I2C_SLAVE takes its argument by value.
        let res = unsafe { i2c_set_slave(self.file.as_raw_fd(), i32::from(address)) };
        res.map_err(|errno| LinuxI2cError {
            op: "I2C_SLAVE",
            errno,
        })?;
        self.slave = Some(address);
        Ok(())
    }

    fn write_once(&mut self, bytes: &[u8]) -> Result<(), LinuxI2cError> {
        let n = self.file.write(bytes).map_err(|e| errno_of("write", &e))?;
        if n != bytes.len() {
            return Err(LinuxI2cError {
                op: "write",
                errno: Errno::EIO,
            });
        }
        Ok(())
    }

    fn read_once(&mut self, buf: &mut [u8]) -> Result<(), LinuxI2cError> {
        let n = self.file.read(buf).map_err(|e| errno_of("read", &e))?;
        if n != buf.len() {
            return Err(LinuxI2cError {
                op: "read",
                errno: Errno::EIO,
            });
        }
        Ok(())
    }
}

impl ErrorType for LinuxI2cBus {
    type Error = LinuxI2cError;
}

impl I2c for LinuxI2cBus {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.select(address)?;
        for op in operations {
            match op {
                Operation::Write(bytes) => self.write_once(bytes)?,
                Operation::Read(buf) => self.read_once(buf)?,
            }
        }
        Ok(())
    }
}
