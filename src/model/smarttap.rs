//! Google Smart Tap pass configuration.
//!
//! Key family: `ST<slot>CollectorID`, `ST<slot>KeySlot`,
//! `ST<slot>KeyVersion`.

use serde::{Deserialize, Serialize};

use super::error::FieldError;

/// Configuration for a single Google Smart Tap pass type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartTapEntry {
    /// Google Collector ID, a numeric string issued by Google.
    pub collector_id: String,
    /// Private key slot (1-6), or 0 for automatic selection.
    pub key_slot: u8,
    /// Key version matching the Google dashboard; 0 means unset.
    pub key_version: u16,
}

impl SmartTapEntry {
    /// Creates a validated entry.
    ///
    /// # Errors
    ///
    /// Fails fast on the first violated constraint.
    pub fn new(
        collector_id: impl Into<String>,
        key_slot: u8,
        key_version: u16,
    ) -> Result<Self, FieldError> {
        let entry = Self {
            collector_id: collector_id.into(),
            key_slot,
            key_version,
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

        if self.collector_id.is_empty() {
            errors.push(FieldError::required("CollectorID"));
        } else if !self.collector_id.bytes().all(|b| b.is_ascii_digit()) {
            errors.push(FieldError::malformed(
                "CollectorID",
                "expected a numeric string",
            ));
        }

        if self.key_slot > 6 {
            errors.push(FieldError::range("KeySlot", self.key_slot, "0-6"));
        }

        errors
    }

    /// Renders the `Key=Value` lines for this entry at `slot`.
    ///
    /// Key slot and key version are omitted at their automatic/unset
    /// value 0; parsing restores the same defaults.
    #[must_use]
    pub fn to_lines(&self, slot: u8) -> Vec<String> {
        let mut lines = vec![format!("ST{slot}CollectorID={}", self.collector_id)];
        if self.key_slot > 0 {
            lines.push(format!("ST{slot}KeySlot={}", self.key_slot));
        }
        if self.key_version > 0 {
            lines.push(format!("ST{slot}KeyVersion={}", self.key_version));
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
        let mut collector_id = None;
        let mut key_slot = 0u8;
        let mut key_version = 0u16;

        for (name, value) in fields {
            match name.as_str() {
                "CollectorID" => collector_id = Some(value.clone()),
                "KeySlot" => match super::raw::number::<u8>(name, value, "0-6") {
                    Ok(v) => key_slot = v,
                    Err(e) => errors.push(e),
                },
                "KeyVersion" => match super::raw::number::<u16>(name, value, "0-65535") {
                    Ok(v) => key_version = v,
                    Err(e) => errors.push(e),
                },
                _ => {}
            }
        }

        let Some(collector_id) = collector_id else {
            errors.push(FieldError::required("CollectorID"));
            return Err(errors);
        };

        let entry = Self {
            collector_id,
            key_slot,
            key_version,
        };
        errors.extend(entry.errors());

        if errors.is_empty() { Ok(entry) } else { Err(errors) }
    }
}
