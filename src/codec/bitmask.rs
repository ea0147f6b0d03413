//! Keyboard-source bitmask codec (`KBSource`).
//!
//! `KBSource` selects which reader events are typed out over keyboard
//! emulation. The wire form is one or two uppercase hex digits; each
//! bit of the byte enables one data source. Two bits are reserved by
//! the firmware and round-trip losslessly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FormatError;

/// Set of keyboard-emulation data sources, stored as the raw byte.
///
/// Construction is builder-style, accumulating bits into the plain
/// integer:
///
/// ```
/// use vtap_config::codec::KbSource;
///
/// let source = KbSource::empty().mobile_pass().card_tag_uid();
/// assert_eq!(source.to_string(), "81");
/// ```
///
/// Unknown or reserved bits are preserved exactly, so a value written
/// by newer firmware survives a decode/encode cycle unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KbSource(u8);

impl KbSource {
    /// Bit 7: mobile wallet pass reads (Apple VAS / Google Smart Tap).
    pub const MOBILE_PASS: u8 = 0x80;
    /// Bit 6: Smart Tap UID.
    pub const STUID: u8 = 0x40;
    /// Bit 5: card emulation write mode.
    pub const CARD_EMULATION: u8 = 0x20;
    /// Bit 2: attached scanners.
    pub const SCANNERS: u8 = 0x04;
    /// Bit 1: command interface messages.
    pub const COMMAND_INTERFACE: u8 = 0x02;
    /// Bit 0: card/tag UID.
    pub const CARD_TAG_UID: u8 = 0x01;

    /// The reader's factory default (`A5`): mobile pass, card
    /// emulation, scanners and card/tag UID.
    pub const READER_DEFAULT: Self = Self(0xA5);

    /// Creates an empty source set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates a source set from a raw byte, reserved bits included.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every bit in `mask` is set.
    #[must_use]
    pub const fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    /// Enables mobile wallet pass data.
    #[must_use]
    pub const fn mobile_pass(self) -> Self {
        Self(self.0 | Self::MOBILE_PASS)
    }

    /// Enables Smart Tap UID data.
    #[must_use]
    pub const fn stuid(self) -> Self {
        Self(self.0 | Self::STUID)
    }

    /// Enables card emulation write mode.
    #[must_use]
    pub const fn card_emulation(self) -> Self {
        Self(self.0 | Self::CARD_EMULATION)
    }

    /// Enables scanner input.
    #[must_use]
    pub const fn scanners(self) -> Self {
        Self(self.0 | Self::SCANNERS)
    }

    /// Enables command interface messages.
    #[must_use]
    pub const fn command_interface(self) -> Self {
        Self(self.0 | Self::COMMAND_INTERFACE)
    }

    /// Enables card/tag UID data.
    #[must_use]
    pub const fn card_tag_uid(self) -> Self {
        Self(self.0 | Self::CARD_TAG_UID)
    }
}

impl Default for KbSource {
    fn default() -> Self {
        Self::READER_DEFAULT
    }
}

impl fmt::Display for KbSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

impl FromStr for KbSource {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 2 {
            return Err(FormatError::InvalidHex {
                value: s.to_string(),
                reason: "expected 1 or 2 hex digits",
            });
        }

        u8::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| FormatError::InvalidHex {
                value: s.to_string(),
                reason: "expected 1 or 2 hex digits",
            })
    }
}
