//! Startup pass-slot filters (`VASDefaultPassesEnabled`,
//! `STDefaultPassesEnabled`).
//!
//! Restricting which pass slots are checked at startup shortens the
//! read cycle when not every slot is in use.

use serde::{Deserialize, Serialize};

use super::error::FieldError;
use super::raw;

/// The set of pass slots enabled at startup: at least one, each 1-6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledPasses(Vec<u8>);

impl EnabledPasses {
    /// Creates a validated filter.
    ///
    /// # Errors
    ///
    /// Fails fast on an empty list or a slot outside 1-6.
    pub fn new(field: &str, slots: Vec<u8>) -> Result<Self, FieldError> {
        if slots.is_empty() {
            return Err(FieldError::required(field));
        }
        for &slot in &slots {
            if !(1..=6).contains(&slot) {
                return Err(FieldError::range(field, slot, "1-6"));
            }
        }
        Ok(Self(slots))
    }

    /// Returns the enabled slot numbers in file order.
    #[must_use]
    pub fn slots(&self) -> &[u8] {
        &self.0
    }

    /// Renders the `Key=Value` line for this filter under `key`.
    #[must_use]
    pub fn to_line(&self, key: &str) -> String {
        let joined: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        format!("{key}={}", joined.join(","))
    }

    /// Decodes a comma-separated slot list, accumulating every
    /// violated constraint.
    ///
    /// # Errors
    ///
    /// Returns every decode and validation error found.
    pub fn from_value(field: &str, value: &str) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut slots = Vec::new();

        for part in value.split(',') {
            match raw::number::<u8>(field, part, "1-6") {
                Ok(slot) if (1..=6).contains(&slot) => slots.push(slot),
                Ok(slot) => errors.push(FieldError::range(field, slot, "1-6")),
                Err(e) => errors.push(e),
            }
        }

        if slots.is_empty() && errors.is_empty() {
            errors.push(FieldError::malformed(field, "expected at least one slot"));
        }

        if errors.is_empty() {
            Ok(Self(slots))
        } else {
            Err(errors)
        }
    }
}
