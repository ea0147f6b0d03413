//! MIFARE DESFire application configuration (`DESFire*` keys).
//!
//! Up to 9 applications, each read from a secure card file, plus a
//! group-level output separator. Key family:
//! `DESFire<slot>AppID` … `DESFire<slot>SysIDLength` and
//! `DESFireSeparator`.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::FieldError;
use super::raw;
use super::slots::{DesfireSlots, SlotGroup};

/// Cryptographic mode for DESFire authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesfireCrypto {
    /// No encryption (wire value 0).
    None,
    /// 3DES (wire value 1).
    TripleDes,
    /// AES (wire value 3).
    Aes,
}

impl DesfireCrypto {
    #[must_use]
    pub(crate) const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::TripleDes => 1,
            Self::Aes => 3,
        }
    }

    fn decode(field: &str, value: &str) -> Result<Self, FieldError> {
        match value {
            "0" => Ok(Self::None),
            "1" => Ok(Self::TripleDes),
            "3" => Ok(Self::Aes),
            _ => Err(FieldError::malformed(field, "expected 0, 1 or 3")),
        }
    }
}

/// Output format for DESFire data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesfireFormat {
    /// Raw file data (wire value 0).
    Raw,
    /// KEY-ID v1 (wire value 1).
    KeyIdV1,
    /// KEY-ID v2 (wire value 2).
    KeyIdV2,
}

impl DesfireFormat {
    #[must_use]
    pub(crate) const fn code(self) -> u8 {
        match self {
            Self::Raw => 0,
            Self::KeyIdV1 => 1,
            Self::KeyIdV2 => 2,
        }
    }

    fn decode(field: &str, value: &str) -> Result<Self, FieldError> {
        match value {
            "0" => Ok(Self::Raw),
            "1" => Ok(Self::KeyIdV1),
            "2" => Ok(Self::KeyIdV2),
            _ => Err(FieldError::malformed(field, "expected 0, 1 or 2")),
        }
    }
}

/// Configuration for one DESFire application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesfireEntry {
    /// Application ID, exactly 6 hex digits, stored uppercase.
    pub app_id: String,
    /// File ID to read, 1-255.
    pub file_id: Option<u8>,
    /// Key number for authentication.
    pub key_num: Option<u8>,
    /// Key slot for authentication, 1-9.
    pub key_slot: Option<u8>,
    /// Cryptographic mode.
    pub crypto: Option<DesfireCrypto>,
    /// Data output format.
    pub format: Option<DesfireFormat>,
    /// Bytes to read, 1-255, default 3.
    pub read_length: u8,
    /// File offset to start reading, default 0.
    pub read_offset: u8,
    /// Key diversification enabled.
    pub diversification: bool,
    /// Privacy key number.
    pub privacy_key_num: Option<u8>,
    /// Privacy key slot.
    pub privacy_key_slot: Option<u8>,
    /// System ID key slot.
    pub sysid_key_slot: Option<u8>,
    /// System ID length, 0-16.
    pub sysid_length: Option<u8>,
}

impl DesfireEntry {
    /// Creates a validated entry for an application ID.
    ///
    /// # Errors
    ///
    /// Fails fast on the first violated constraint.
    pub fn new(app_id: impl Into<String>) -> Result<Self, FieldError> {
        let entry = Self {
            app_id: app_id.into().to_ascii_uppercase(),
            file_id: None,
            key_num: None,
            key_slot: None,
            crypto: None,
            format: None,
            read_length: defaults::DESFIRE_READ_LENGTH,
            read_offset: 0,
            diversification: false,
            privacy_key_num: None,
            privacy_key_slot: None,
            sysid_key_slot: None,
            sysid_length: None,
        };
        entry.validate()?;
        Ok(entry)
    }

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

        if self.app_id.len() != 6 || !self.app_id.bytes().all(|b| b.is_ascii_hexdigit()) {
            errors.push(FieldError::malformed(
                "AppID",
                "expected exactly 6 hex digits",
            ));
        }

        if self.file_id == Some(0) {
            errors.push(FieldError::range("FileID", 0, "1-255"));
        }
        if let Some(slot) = self.key_slot {
            if !(1..=9).contains(&slot) {
                errors.push(FieldError::range("KeySlot", slot, "1-9"));
            }
        }
        if self.read_length == 0 {
            errors.push(FieldError::range("ReadLength", 0, "1-255"));
        }
        if let Some(len) = self.sysid_length {
            if len > 16 {
                errors.push(FieldError::range("SysIDLength", len, "0-16"));
            }
        }

        errors
    }

    /// Renders the `Key=Value` lines for this entry at `slot`.
    #[must_use]
    pub fn to_lines(&self, slot: u8) -> Vec<String> {
        let prefix = format!("DESFire{slot}");
        let mut lines = vec![format!("{prefix}AppID={}", self.app_id)];

        if let Some(file_id) = self.file_id {
            lines.push(format!("{prefix}FileID={file_id}"));
        }
        if let Some(key_num) = self.key_num {
            lines.push(format!("{prefix}KeyNum={key_num}"));
        }
        if let Some(key_slot) = self.key_slot {
            lines.push(format!("{prefix}KeySlot={key_slot}"));
        }
        if let Some(crypto) = self.crypto {
            lines.push(format!("{prefix}Crypto={}", crypto.code()));
        }
        if let Some(format) = self.format {
            lines.push(format!("{prefix}Format={}", format.code()));
        }
        if self.read_length != defaults::DESFIRE_READ_LENGTH {
            lines.push(format!("{prefix}ReadLength={}", self.read_length));
        }
        if self.read_offset != 0 {
            lines.push(format!("{prefix}ReadOffset={}", self.read_offset));
        }
        if self.diversification {
            lines.push(format!("{prefix}Diversification=1"));
        }
        if let Some(num) = self.privacy_key_num {
            lines.push(format!("{prefix}PrivacyKeyNum={num}"));
        }
        if let Some(slot) = self.privacy_key_slot {
            lines.push(format!("{prefix}PrivacyKeySlot={slot}"));
        }
        if let Some(slot) = self.sysid_key_slot {
            lines.push(format!("{prefix}SysIDKeySlot={slot}"));
        }
        if let Some(len) = self.sysid_length {
            lines.push(format!("{prefix}SysIDLength={len}"));
        }

        lines
    }

    /// Builds an entry from raw `(suffix, value)` fields, accumulating
    /// every violated constraint.
    ///
    /// # Errors
    ///
    /// Returns every decode and validation error found.
    pub fn from_lines(fields: &[(String, String)]) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut app_id = None;
        let mut entry = Self {
            app_id: String::new(),
            file_id: None,
            key_num: None,
            key_slot: None,
            crypto: None,
            format: None,
            read_length: defaults::DESFIRE_READ_LENGTH,
            read_offset: 0,
            diversification: false,
            privacy_key_num: None,
            privacy_key_slot: None,
            sysid_key_slot: None,
            sysid_length: None,
        };

        for (name, value) in fields {
            let result = Self::apply(&mut entry, &mut app_id, name, value);
            if let Err(e) = result {
                errors.push(e);
            }
        }

        let Some(app_id) = app_id else {
            errors.push(FieldError::required("AppID"));
            return Err(errors);
        };
        entry.app_id = app_id;

        errors.extend(entry.errors());
        if errors.is_empty() { Ok(entry) } else { Err(errors) }
    }

    fn apply(
        entry: &mut Self,
        app_id: &mut Option<String>,
        name: &str,
        value: &str,
    ) -> Result<(), FieldError> {
        match name {
            "AppID" => *app_id = Some(value.to_ascii_uppercase()),
            "FileID" => entry.file_id = Some(raw::number(name, value, "1-255")?),
            "KeyNum" => entry.key_num = Some(raw::number(name, value, "0-255")?),
            "KeySlot" => entry.key_slot = Some(raw::number(name, value, "1-9")?),
            "Crypto" => entry.crypto = Some(DesfireCrypto::decode(name, value)?),
            "Format" => entry.format = Some(DesfireFormat::decode(name, value)?),
            "ReadLength" => entry.read_length = raw::number(name, value, "1-255")?,
            "ReadOffset" => entry.read_offset = raw::number(name, value, "0-255")?,
            "Diversification" => entry.diversification = raw::bool_flag(name, value)?,
            "PrivacyKeyNum" => entry.privacy_key_num = Some(raw::number(name, value, "0-255")?),
            "PrivacyKeySlot" => entry.privacy_key_slot = Some(raw::number(name, value, "0-255")?),
            "SysIDKeySlot" => entry.sysid_key_slot = Some(raw::number(name, value, "0-255")?),
            "SysIDLength" => entry.sysid_length = Some(raw::number(name, value, "0-16")?),
            _ => {}
        }
        Ok(())
    }
}

/// The DESFire group: up to 9 applications plus the output separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesfireSection {
    /// Configured applications, keyed by slot.
    pub apps: SlotGroup<DesfireSlots, DesfireEntry>,
    /// Separator between app outputs, default `,`.
    pub separator: char,
}

impl Default for DesfireSection {
    fn default() -> Self {
        Self {
            apps: SlotGroup::new(),
            separator: defaults::DESFIRE_SEPARATOR,
        }
    }
}

impl DesfireSection {
    /// Collects every violated constraint across all applications,
    /// with full key names.
    pub(crate) fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for (slot, app) in self.apps.iter() {
            let prefix = format!("DESFire{slot}");
            for e in app.errors() {
                errors.push(e.with_prefix(&prefix));
            }
        }
        errors
    }

    /// Renders the lines for every application plus the separator.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (slot, app) in self.apps.iter() {
            lines.extend(app.to_lines(slot));
        }
        if self.separator != defaults::DESFIRE_SEPARATOR {
            lines.push(format!("DESFireSeparator={}", self.separator));
        }
        lines
    }
}
