//! Run configuration and its validation rules.
//!
//! A [`Configuration`] can only be obtained through [`validate`] (directly,
//! or via serde, which routes through the same function), so every value the
//! sequencer sees already satisfies:
//!
//! - at least one zone;
//! - a zero timeout only with a single zone;
//! - `repeat >= 1`, and `repeat > 1` only with more than one zone;
//! - a non-zero timeout of at least [`MIN_TIMEOUT`].

use core::fmt::Write as _;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::zone::ZoneId;

/// Shortest non-zero time a zone may stay open.
pub const MIN_TIMEOUT: Duration = Duration::from_secs(5);
/// Per-zone time when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Passes over the zone list when none is given.
pub const DEFAULT_REPEAT: u64 = 1;

/// I2C bus the expander sits on (`/dev/i2c-1` on a Raspberry Pi).
pub const DEFAULT_I2C_BUS: u8 = 1;
/// PCF8574 with A0..A2 tied low.
pub const DEFAULT_EXPANDER_ADDRESS: u8 = 0x20;

// ───────────────────────────────────────────────────────────────
// Configuration
// ───────────────────────────────────────────────────────────────

/// A validated zone plan. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration", into = "RawConfiguration")]
pub struct Configuration {
    zones: Vec<ZoneId>,
    timeout: Duration,
    repeat: u64,
}

impl Configuration {
    /// Zones in activation order. Never empty.
    pub fn zones(&self) -> &[ZoneId] {
        &self.zones
    }

    /// Effective per-zone time. Zero means hold the single zone until cancelled.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn repeat(&self) -> u64 {
        self.repeat
    }

    /// True for the manual mode: one zone, no timeout.
    pub fn is_hold(&self) -> bool {
        self.timeout.is_zero()
    }

    /// Writes an uninterrupted run issues.
    pub fn planned_writes(&self) -> u64 {
        (self.zones.len() as u64).saturating_mul(self.repeat)
    }
}

/// Unvalidated form used for (de)serialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfiguration {
    pub zones: Vec<u64>,
    #[serde(default = "default_timeout_text")]
    pub timeout: String,
    #[serde(default = "default_repeat")]
    pub repeat: u64,
}

fn default_timeout_text() -> String {
    format_duration(DEFAULT_TIMEOUT)
}

fn default_repeat() -> u64 {
    DEFAULT_REPEAT
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = ConfigError;

    fn try_from(raw: RawConfiguration) -> Result<Self, Self::Error> {
        let timeout = parse_duration(&raw.timeout)?;
        validate(&raw.zones, timeout, raw.repeat)
    }
}

impl From<Configuration> for RawConfiguration {
    fn from(config: Configuration) -> Self {
        Self {
            zones: config.zones.iter().map(|z| u64::from(z.get())).collect(),
            timeout: format_duration(config.timeout),
            repeat: config.repeat,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

/// Build a [`Configuration`] from parsed zone numbers, a timeout and a
/// repeat count.
///
/// Zone numbers outside `1..=8` are dropped, not rejected. The checks then
/// run in a fixed order and the first failure wins. A timeout between zero
/// and [`MIN_TIMEOUT`] is raised to the floor.
pub fn validate(zones: &[u64], timeout: Duration, repeat: u64) -> Result<Configuration, ConfigError> {
    let zones: Vec<ZoneId> = zones.iter().copied().filter_map(ZoneId::new).collect();

    if zones.is_empty() {
        return Err(ConfigError::NoZonesSpecified);
    }
    if timeout.is_zero() && zones.len() > 1 {
        return Err(ConfigError::TimeoutRequiredForMultipleZones);
    }
    if repeat == 0 {
        return Err(ConfigError::NothingToDo);
    }
    if repeat > 1 && zones.len() == 1 {
        return Err(ConfigError::RedundantRepeat);
    }

    Ok(Configuration {
        zones,
        timeout: normalize_timeout(timeout),
        repeat,
    })
}

/// Raise a positive timeout below the floor to [`MIN_TIMEOUT`].
pub fn normalize_timeout(timeout: Duration) -> Duration {
    if !timeout.is_zero() && timeout < MIN_TIMEOUT {
        MIN_TIMEOUT
    } else {
        timeout
    }
}

// ───────────────────────────────────────────────────────────────
// Token parsing
// ───────────────────────────────────────────────────────────────

/// Parse a comma-separated zone list into raw numbers.
///
/// Every token must be a non-negative integer; range filtering is left to
/// [`validate`].
pub fn parse_zone_list(value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(',')
        .map(|token| parse_uint(token).ok_or_else(|| ConfigError::InvalidZone(token.to_string())))
        .collect()
}

/// Unsigned integer with optional `0x`, `0o`, `0b` prefix or leading-zero octal.
pub fn parse_uint(token: &str) -> Option<u64> {
    let (digits, radix) = match token.as_bytes() {
        [b'0', b'x' | b'X', ..] => (&token[2..], 16),
        [b'0', b'o' | b'O', ..] => (&token[2..], 8),
        [b'0', b'b' | b'B', ..] => (&token[2..], 2),
        [b'0', _, ..] => (&token[1..], 8),
        _ => (token, 10),
    };
    // from_str_radix tolerates a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Parse a duration such as `10s`, `1m30s`, `1.5h` or `250ms`.
///
/// Each number needs a unit (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`) except
/// the bare string `0`. Signs are not accepted.
pub fn parse_duration(text: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(text.to_string());

    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.is_empty() {
        return Err(invalid());
    }

    let mut rest = text;
    let mut total_ns: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after) = rest.split_at(int_len);
        let (frac_part, after) = match after.strip_prefix('.') {
            Some(tail) => tail.split_at(tail.bytes().take_while(u8::is_ascii_digit).count()),
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        let scale = unit_nanos(unit).ok_or_else(invalid)?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        total_ns = whole
            .checked_mul(scale)
            .and_then(|ns| total_ns.checked_add(ns))
            .ok_or_else(invalid)?;

        if !frac_part.is_empty() {
            let digits = &frac_part[..frac_part.len().min(18)];
            let frac: u128 = digits.parse().map_err(|_| invalid())?;
            let frac_ns = frac * scale / 10u128.pow(digits.len() as u32);
            total_ns = total_ns.checked_add(frac_ns).ok_or_else(invalid)?;
        }
        rest = after;
    }

    let secs = u64::try_from(total_ns / 1_000_000_000).map_err(|_| invalid())?;
    Ok(Duration::new(secs, (total_ns % 1_000_000_000) as u32))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    })
}

/// Render a duration the way [`parse_duration`] reads it back (`1m30s`, `500ms`).
pub fn format_duration(d: Duration) -> String {
    if d.is_zero() {
        return "0s".to_string();
    }
    let secs = d.as_secs();
    let nanos = d.subsec_nanos();
    if secs == 0 {
        return if nanos % 1_000_000 == 0 {
            format!("{}ms", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            format!("{}µs", nanos / 1_000)
        } else {
            format!("{nanos}ns")
        };
    }

    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    let mut out = String::new();
    if h > 0 {
        let _ = write!(out, "{h}h");
    }
    if h > 0 || m > 0 {
        let _ = write!(out, "{m}m");
    }
    if nanos == 0 {
        let _ = write!(out, "{s}s");
    } else {
        let frac = format!("{nanos:09}");
        let _ = write!(out, "{s}.{}s", frac.trim_end_matches('0'));
    }
    out
}
