//! NFC tag reading configuration (`NFCType*`, `TagRead*` keys).
//!
//! Controls which tag technologies the reader handles and, in block
//! mode, which block is read and how the data is formatted.

use serde::{Deserialize, Serialize};

use super::error::FieldError;
use super::raw;

/// Reading mode for one NFC tag type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NfcTagMode {
    /// Tag type disabled.
    Disabled,
    /// Report only the tag UID.
    Uid,
    /// Read NDEF records.
    Ndef,
    /// Read raw block data.
    Block,
    /// Read DESFire secure data (Type 4 only).
    SecureData,
}

impl NfcTagMode {
    /// The single-character wire code for this mode.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Disabled => '0',
            Self::Uid => 'U',
            Self::Ndef => 'N',
            Self::Block => 'B',
            Self::SecureData => 'D',
        }
    }

    fn decode(field: &str, value: &str) -> Result<Self, FieldError> {
        match value {
            "0" => Ok(Self::Disabled),
            "U" => Ok(Self::Uid),
            "N" => Ok(Self::Ndef),
            "B" => Ok(Self::Block),
            "D" => Ok(Self::SecureData),
            _ => Err(FieldError::malformed(field, "expected 0, U, N, B or D")),
        }
    }
}

/// MIFARE key type for block authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagKeyType {
    /// Key type A.
    A,
    /// Key type B.
    B,
    /// Key type C (compatibility).
    C,
}

impl TagKeyType {
    #[must_use]
    pub(crate) const fn code(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }

    fn decode(field: &str, value: &str) -> Result<Self, FieldError> {
        match value {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(FieldError::malformed(field, "expected A, B or C")),
        }
    }
}

/// Output format for block data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagReadFormat {
    /// ASCII text.
    Ascii,
    /// Decimal number.
    Decimal,
    /// Hexadecimal.
    Hex,
}

impl TagReadFormat {
    #[must_use]
    pub(crate) const fn code(self) -> char {
        match self {
            Self::Ascii => 'a',
            Self::Decimal => 'd',
            Self::Hex => 'h',
        }
    }

    fn decode(field: &str, value: &str) -> Result<Self, FieldError> {
        match value {
            "a" => Ok(Self::Ascii),
            "d" => Ok(Self::Decimal),
            "h" => Ok(Self::Hex),
            _ => Err(FieldError::malformed(field, "expected a, d or h")),
        }
    }
}

/// Minimum digit count for UID output: a fixed width or automatic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinDigits {
    /// Let the reader pick the width (`A`).
    Auto,
    /// Fixed width, 1-20 digits.
    Fixed(u8),
}

impl MinDigits {
    fn decode(field: &str, value: &str) -> Result<Self, FieldError> {
        if value == "A" {
            return Ok(Self::Auto);
        }
        raw::number::<u8>(field, value, "1-20 or A").map(Self::Fixed)
    }

    fn encode(self) -> String {
        match self {
            Self::Auto => "A".to_string(),
            Self::Fixed(n) => n.to_string(),
        }
    }
}

/// Block read settings, used when a tag type is in block mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagReadSection {
    /// Block number to read (`TagReadBlockNum`).
    pub block_num: Option<u8>,
    /// Authentication key slot, 1-9 (`TagReadKeySlot`).
    pub key_slot: Option<u8>,
    /// MIFARE key type (`TagReadKeyType`).
    pub key_type: Option<TagKeyType>,
    /// Start byte within the block, 0-15 (`TagReadOffset`).
    pub offset: u8,
    /// Bytes to read, 1-16 (`TagReadLength`).
    pub length: Option<u8>,
    /// Output format (`TagReadFormat`).
    pub format: Option<TagReadFormat>,
    /// Minimum digits for UID output (`TagReadMinDigits`).
    pub min_digits: Option<MinDigits>,
}

impl TagReadSection {
    pub(crate) fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if let Some(slot) = self.key_slot {
            if !(1..=9).contains(&slot) {
                errors.push(FieldError::range("TagReadKeySlot", slot, "1-9"));
            }
        }
        if self.offset > 15 {
            errors.push(FieldError::range("TagReadOffset", self.offset, "0-15"));
        }
        if let Some(len) = self.length {
            if !(1..=16).contains(&len) {
                errors.push(FieldError::range("TagReadLength", len, "1-16"));
            }
        }
        if let Some(MinDigits::Fixed(n)) = self.min_digits {
            if !(1..=20).contains(&n) {
                errors.push(FieldError::range("TagReadMinDigits", n, "1-20 or A"));
            }
        }

        errors
    }

    fn to_lines(self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(block) = self.block_num {
            lines.push(format!("TagReadBlockNum={block}"));
        }
        if let Some(slot) = self.key_slot {
            lines.push(format!("TagReadKeySlot={slot}"));
        }
        if let Some(key_type) = self.key_type {
            lines.push(format!("TagReadKeyType={}", key_type.code()));
        }
        if self.offset != 0 {
            lines.push(format!("TagReadOffset={}", self.offset));
        }
        if let Some(len) = self.length {
            lines.push(format!("TagReadLength={len}"));
        }
        if let Some(format) = self.format {
            lines.push(format!("TagReadFormat={}", format.code()));
        }
        if let Some(min) = self.min_digits {
            lines.push(format!("TagReadMinDigits={}", min.encode()));
        }

        lines
    }

    fn is_default(self) -> bool {
        self == Self::default()
    }
}

/// NFC tag reading settings. Singleton section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NfcSection {
    /// Type 2 tag mode (NTAG, MIFARE Ultralight).
    pub type2: Option<NfcTagMode>,
    /// Type 4 tag mode (DESFire, ISO 14443-4).
    pub type4: Option<NfcTagMode>,
    /// Type 5 tag mode (ICODE, ISO 15693).
    pub type5: Option<NfcTagMode>,
    /// Report an error payload on read failures (`NFCReportReadError`).
    pub report_read_error: bool,
    /// Filter out random Type 4 UIDs (`IgnoreRandomUID`).
    pub ignore_random_uid: bool,
    /// Reverse the byte order of output (`TagByteOrder`).
    pub byte_order_reversed: bool,
    /// Block read settings.
    pub tag_read: Option<TagReadSection>,
}

impl NfcSection {
    /// Checks every local constraint, failing on the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), FieldError> {
        match self.errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        // Secure data mode is reserved for Type 4 hardware.
        if self.type2 == Some(NfcTagMode::SecureData) {
            errors.push(FieldError::malformed(
                "NFCType2",
                "secure data mode is only valid for Type 4",
            ));
        }
        if self.type5 == Some(NfcTagMode::SecureData) {
            errors.push(FieldError::malformed(
                "NFCType5",
                "secure data mode is only valid for Type 4",
            ));
        }

        if let Some(ref tag_read) = self.tag_read {
            errors.extend(tag_read.errors());
        }

        errors
    }

    /// Renders the `Key=Value` lines for this section.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(mode) = self.type2 {
            lines.push(format!("NFCType2={}", mode.code()));
        }
        if let Some(mode) = self.type4 {
            lines.push(format!("NFCType4={}", mode.code()));
        }
        if let Some(mode) = self.type5 {
            lines.push(format!("NFCType5={}", mode.code()));
        }
        if self.report_read_error {
            lines.push("NFCReportReadError=1".to_string());
        }
        if self.ignore_random_uid {
            lines.push("IgnoreRandomUID=1".to_string());
        }
        if self.byte_order_reversed {
            lines.push("TagByteOrder=1".to_string());
        }
        if let Some(tag_read) = self.tag_read {
            lines.extend(tag_read.to_lines());
        }

        lines
    }

    /// Builds the section from raw `(key, value)` fields, accumulating
    /// every violated constraint.
    ///
    /// # Errors
    ///
    /// Returns every decode and validation error found.
    pub fn from_lines(fields: &[(String, String)]) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut section = Self::default();
        let mut tag_read = TagReadSection::default();

        for (key, value) in fields {
            let result = section.apply(&mut tag_read, key, value);
            if let Err(e) = result {
                errors.push(e);
            }
        }

        if !tag_read.is_default() {
            section.tag_read = Some(tag_read);
        }

        errors.extend(section.errors());
        if errors.is_empty() {
            Ok(section)
        } else {
            Err(errors)
        }
    }

    fn apply(
        &mut self,
        tag_read: &mut TagReadSection,
        key: &str,
        value: &str,
    ) -> Result<(), FieldError> {
        match key {
            "NFCType2" => self.type2 = Some(NfcTagMode::decode(key, value)?),
            "NFCType4" => self.type4 = Some(NfcTagMode::decode(key, value)?),
            "NFCType5" => self.type5 = Some(NfcTagMode::decode(key, value)?),
            "NFCReportReadError" => self.report_read_error = raw::bool_flag(key, value)?,
            "IgnoreRandomUID" => self.ignore_random_uid = raw::bool_flag(key, value)?,
            "TagByteOrder" => self.byte_order_reversed = raw::bool_flag(key, value)?,
            "TagReadBlockNum" => tag_read.block_num = Some(raw::number(key, value, "0-255")?),
            "TagReadKeySlot" => tag_read.key_slot = Some(raw::number(key, value, "1-9")?),
            "TagReadKeyType" => tag_read.key_type = Some(TagKeyType::decode(key, value)?),
            "TagReadOffset" => tag_read.offset = raw::number(key, value, "0-15")?,
            "TagReadLength" => tag_read.length = Some(raw::number(key, value, "1-16")?),
            "TagReadFormat" => tag_read.format = Some(TagReadFormat::decode(key, value)?),
            "TagReadMinDigits" => tag_read.min_digits = Some(MinDigits::decode(key, value)?),
            _ => {}
        }
        Ok(())
    }
}
