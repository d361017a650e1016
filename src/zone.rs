//! Zone numbering and the expander output mask.
//!
//! The PCF8574 drives its eight quasi-bidirectional pins from a single
//! output byte. The relay board is active-low, so a zone is energised by
//! clearing its bit while every other bit stays high:
//!
//! ```text
//!   zone   1  2  3  4  5  6  7  8
//!   bit    0  1  2  3  4  5  6  7
//!   mask(3) = 0b1111_1011
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lowest valid zone number.
pub const MIN_ZONE: u8 = 1;
/// Highest valid zone number (one per expander pin).
pub const MAX_ZONE: u8 = 8;

/// A zone number in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u8")]
pub struct ZoneId(u8);

impl ZoneId {
    /// Returns `None` for values outside `1..=8`.
    pub fn new(raw: u64) -> Option<Self> {
        if (u64::from(MIN_ZONE)..=u64::from(MAX_ZONE)).contains(&raw) {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Expander bit driven by this zone.
    pub fn bit(self) -> u8 {
        self.0 - 1
    }

    /// Mask that energises this zone alone.
    pub fn mask(self) -> OutputMask {
        OutputMask::for_zone(self)
    }

    /// All eight zones in ascending order.
    pub fn all() -> impl Iterator<Item = ZoneId> {
        (MIN_ZONE..=MAX_ZONE).map(ZoneId)
    }
}

impl TryFrom<u64> for ZoneId {
    type Error = String;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| format!("zone {raw} outside {MIN_ZONE}..={MAX_ZONE}"))
    }
}

impl From<ZoneId> for u8 {
    fn from(zone: ZoneId) -> Self {
        zone.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full byte written to the expander. Active-low per bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputMask(u8);

impl OutputMask {
    /// Every output high: no zone energised.
    pub const ALL_OFF: Self = Self(0xFF);

    pub const fn for_zone(zone: ZoneId) -> Self {
        Self(!(1u8 << (zone.0 - 1)))
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Zones this mask energises (cleared bits), lowest first.
    pub fn active_zones(self) -> impl Iterator<Item = ZoneId> {
        ZoneId::all().filter(move |z| self.0 & (1 << z.bit()) == 0)
    }
}

impl fmt::Binary for OutputMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::Display for OutputMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}
