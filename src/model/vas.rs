//! Apple VAS (Value Added Services) pass configuration.
//!
//! One entry per Apple Wallet pass type the reader should accept.
//! Key family: `VAS<slot>MerchantID`, `VAS<slot>KeySlot`,
//! `VAS<slot>MerchantURL`.

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::FieldError;

/// Configuration for a single Apple VAS pass type.
///
/// A value object: edit by building a modified copy, remove by taking
/// it out of the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppleVasEntry {
    /// Apple Pass Type ID; must start with `pass.`.
    pub merchant_id: String,
    /// Private key slot holding the decryption key (1-6), or 0 for
    /// automatic selection.
    pub key_slot: u8,
    /// Optional URL invoked when presenting a pass.
    pub merchant_url: Option<String>,
}

impl AppleVasEntry {
    /// Creates a validated entry.
    ///
    /// # Errors
    ///
    /// Fails fast on the first violated constraint: merchant ID
    /// prefix or key slot range.
    pub fn new(merchant_id: impl Into<String>, key_slot: u8) -> Result<Self, FieldError> {
        let entry = Self {
            merchant_id: merchant_id.into(),
            key_slot,
            merchant_url: None,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Returns a copy with the merchant URL set.
    ///
    /// # Errors
    ///
    /// Returns a `Format` error if the URL does not parse.
    pub fn with_merchant_url(mut self, url: impl Into<String>) -> Result<Self, FieldError> {
        self.merchant_url = Some(url.into());
        self.validate()?;
        Ok(self)
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

    /// Collects every violated local constraint.
    pub(crate) fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.merchant_id.is_empty() {
            errors.push(FieldError::required("MerchantID"));
        } else if !self.merchant_id.starts_with("pass.") {
            errors.push(FieldError::malformed(
                "MerchantID",
                "must start with 'pass.'",
            ));
        }

        if self.key_slot > 6 {
            errors.push(FieldError::range("KeySlot", self.key_slot, "0-6"));
        }

        if let Some(ref url) = self.merchant_url {
            if let Err(e) = Url::parse(url) {
                errors.push(FieldError::malformed("MerchantURL", e.to_string()));
            }
        }

        errors
    }

    /// Renders the `Key=Value` lines for this entry at `slot`.
    ///
    /// `MerchantID` and `KeySlot` are always written; the reader
    /// requires both even when the key slot is automatic.
    #[must_use]
    pub fn to_lines(&self, slot: u8) -> Vec<String> {
        let mut lines = vec![
            format!("VAS{slot}MerchantID={}", self.merchant_id),
            format!("VAS{slot}KeySlot={}", self.key_slot),
        ];
        if let Some(ref url) = self.merchant_url {
            lines.push(format!("VAS{slot}MerchantURL={url}"));
        }
        lines
    }

    /// Builds an entry from raw `(suffix, value)` fields, accumulating
    /// every violated constraint instead of stopping on the first.
    ///
    /// # Errors
    ///
    /// Returns every decode and validation error found.
    pub fn from_lines(fields: &[(String, String)]) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut merchant_id = None;
        let mut key_slot = 0u8;
        let mut merchant_url = None;

        for (name, value) in fields {
            match name.as_str() {
                "MerchantID" => merchant_id = Some(value.clone()),
                "KeySlot" => match super::raw::number::<u8>(name, value, "0-6") {
                    Ok(v) => key_slot = v,
                    Err(e) => errors.push(e),
                },
                "MerchantURL" => merchant_url = Some(value.clone()),
                _ => {}
            }
        }

        let Some(merchant_id) = merchant_id else {
            errors.push(FieldError::required("MerchantID"));
            return Err(errors);
        };

        let entry = Self {
            merchant_id,
            key_slot,
            merchant_url,
        };
        errors.extend(entry.errors());

        if errors.is_empty() { Ok(entry) } else { Err(errors) }
    }
}
