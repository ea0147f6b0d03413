//! LED and beep feedback sequence codecs.
//!
//! Feedback events are encoded as compact comma-separated values:
//!
//! - LED: `RRGGBB,on_ms,off_ms,repeats` (exactly 4 fields)
//! - Beep: `on_ms,off_ms,repeats[,frequency]` (3 or 4 fields)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FormatError;

/// An RGB color, written as exactly 6 uppercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RgbColor(pub [u8; 3]);

impl RgbColor {
    /// Creates a color from red, green and blue components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for RgbColor {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FormatError::InvalidHex {
                value: s.to_string(),
                reason: "expected exactly 6 hex digits",
            });
        }

        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| FormatError::InvalidHex {
                value: s.to_string(),
                reason: "expected exactly 6 hex digits",
            })
        };

        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

/// One LED feedback event: color plus on/off timing and repeat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedSequence {
    /// LED color.
    pub color: RgbColor,
    /// On time in milliseconds (0-65535).
    pub on_ms: u16,
    /// Off time in milliseconds (0-65535).
    pub off_ms: u16,
    /// Number of repeats (1-255).
    pub repeats: u8,
}

impl LedSequence {
    /// Creates an LED sequence, rejecting a zero repeat count.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::OutOfRange`] if `repeats` is 0.
    pub fn new(color: RgbColor, on_ms: u16, off_ms: u16, repeats: u8) -> Result<Self, FormatError> {
        check_repeats(repeats)?;
        Ok(Self {
            color,
            on_ms,
            off_ms,
            repeats,
        })
    }
}

impl fmt::Display for LedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.color, self.on_ms, self.off_ms, self.repeats
        )
    }
}

impl FromStr for LedSequence {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(FormatError::FieldCount {
                expected: "4",
                got: parts.len(),
            });
        }

        let color: RgbColor = parts[0].parse()?;
        let on_ms = millis("on_ms", parts[1])?;
        let off_ms = millis("off_ms", parts[2])?;
        let repeats = repeat_count(parts[3])?;

        Ok(Self {
            color,
            on_ms,
            off_ms,
            repeats,
        })
    }
}

/// One beep feedback event: on/off timing, repeat count and an
/// optional buzzer frequency.
///
/// When `frequency` is absent, the reader uses its built-in default
/// of 3136 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeepSequence {
    /// On time in milliseconds (0-65535).
    pub on_ms: u16,
    /// Off time in milliseconds (0-65535).
    pub off_ms: u16,
    /// Number of repeats (1-255).
    pub repeats: u8,
    /// Buzzer frequency in Hz (100-20000); `None` means the device
    /// default.
    pub frequency: Option<u16>,
}

impl BeepSequence {
    /// Creates a beep sequence, checking repeat and frequency domains.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::OutOfRange`] if `repeats` is 0 or a
    /// given `frequency` is outside 100-20000 Hz.
    pub fn new(
        on_ms: u16,
        off_ms: u16,
        repeats: u8,
        frequency: Option<u16>,
    ) -> Result<Self, FormatError> {
        check_repeats(repeats)?;
        if let Some(hz) = frequency {
            check_frequency(hz)?;
        }
        Ok(Self {
            on_ms,
            off_ms,
            repeats,
            frequency,
        })
    }
}

impl fmt::Display for BeepSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.on_ms, self.off_ms, self.repeats)?;
        if let Some(hz) = self.frequency {
            write!(f, ",{hz}")?;
        }
        Ok(())
    }
}

impl FromStr for BeepSequence {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(FormatError::FieldCount {
                expected: "3 or 4",
                got: parts.len(),
            });
        }

        let on_ms = millis("on_ms", parts[0])?;
        let off_ms = millis("off_ms", parts[1])?;
        let repeats = repeat_count(parts[2])?;

        let frequency = if let Some(raw) = parts.get(3) {
            let hz = number("frequency", raw)?;
            check_frequency(hz)?;
            Some(hz)
        } else {
            None
        };

        Ok(Self {
            on_ms,
            off_ms,
            repeats,
            frequency,
        })
    }
}

fn number(what: &'static str, raw: &str) -> Result<u16, FormatError> {
    let value: u32 = raw.parse().map_err(|_| FormatError::InvalidNumber {
        what,
        value: raw.to_string(),
    })?;
    u16::try_from(value).map_err(|_| FormatError::OutOfRange {
        what,
        value,
        range: "0-65535",
    })
}

fn millis(what: &'static str, raw: &str) -> Result<u16, FormatError> {
    number(what, raw)
}

fn repeat_count(raw: &str) -> Result<u8, FormatError> {
    let value: u32 = raw.parse().map_err(|_| FormatError::InvalidNumber {
        what: "repeats",
        value: raw.to_string(),
    })?;
    if value == 0 {
        return Err(FormatError::OutOfRange {
            what: "repeats",
            value,
            range: "1-255",
        });
    }
    u8::try_from(value).map_err(|_| FormatError::OutOfRange {
        what: "repeats",
        value,
        range: "1-255",
    })
}

const fn check_repeats(repeats: u8) -> Result<(), FormatError> {
    if repeats == 0 {
        return Err(FormatError::OutOfRange {
            what: "repeats",
            value: 0,
            range: "1-255",
        });
    }
    Ok(())
}

fn check_frequency(hz: u16) -> Result<(), FormatError> {
    if (100..=20000).contains(&hz) {
        Ok(())
    } else {
        Err(FormatError::OutOfRange {
            what: "frequency",
            value: u32::from(hz),
            range: "100-20000",
        })
    }
}
