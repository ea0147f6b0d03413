//! Error types for section model validation and aggregate structure.

use thiserror::Error;

use crate::codec::FormatError;

/// Field-level validation error.
///
/// The `field` is the key suffix for repeated sections (the parser
/// prepends the slot prefix when reporting) and the full key for
/// singleton sections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Malformed sub-encoding.
    #[error("malformed {field}: {reason}")]
    Format {
        /// Key or key suffix the value belongs to
        field: String,
        /// What is wrong with the value
        reason: String,
    },

    /// Value outside its documented domain.
    #[error("{field} out of range: {value} (expected {expected})")]
    Range {
        /// Key or key suffix the value belongs to
        field: String,
        /// The offending value
        value: String,
        /// The accepted domain (e.g. "0-6")
        expected: &'static str,
    },

    /// Mandatory field absent.
    #[error("missing required field {field}")]
    Required {
        /// Key or key suffix of the missing field
        field: String,
    },
}

impl FieldError {
    /// Creates a `Format` error from a codec decode failure.
    #[must_use]
    pub fn format(field: impl Into<String>, source: &FormatError) -> Self {
        Self::Format {
            field: field.into(),
            reason: source.to_string(),
        }
    }

    /// Creates a `Format` error with a free-form reason.
    #[must_use]
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `Range` error.
    #[must_use]
    pub fn range(
        field: impl Into<String>,
        value: impl ToString,
        expected: &'static str,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            expected,
        }
    }

    /// Creates a `Required` error.
    #[must_use]
    pub fn required(field: impl Into<String>) -> Self {
        Self::Required {
            field: field.into(),
        }
    }

    /// Returns a copy with the group/slot prefix prepended to the
    /// field name, turning a key suffix into the full key.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Self {
        let full = format!("{prefix}{}", self.field());
        match self {
            Self::Format { reason, .. } => Self::Format {
                field: full,
                reason: reason.clone(),
            },
            Self::Range {
                value, expected, ..
            } => Self::Range {
                field: full,
                value: value.clone(),
                expected,
            },
            Self::Required { .. } => Self::Required { field: full },
        }
    }

    /// Returns the key (or key suffix) this error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Format { field, .. } | Self::Range { field, .. } | Self::Required { field } => {
                field
            }
        }
    }
}

/// Cross-section structural error raised by the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A repeated group already holds its maximum number of entries.
    #[error("{group} group is full (max {max} entries)")]
    GroupFull {
        /// Group key prefix ("VAS", "ST" or "DESFire")
        group: &'static str,
        /// Maximum number of entries for the group
        max: u8,
    },

    /// Two entries claim the same slot number.
    #[error("duplicate {group} slot {slot}")]
    DuplicateSlot {
        /// Group key prefix
        group: &'static str,
        /// The contested slot number
        slot: u8,
    },

    /// A slot number outside the group's valid range.
    #[error("{group} slot {slot} out of range (1-{max})")]
    SlotOutOfRange {
        /// Group key prefix
        group: &'static str,
        /// The offending slot number
        slot: u8,
        /// Highest valid slot for the group
        max: u8,
    },
}
