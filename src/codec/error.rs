//! Error type for field codec decoding.

use thiserror::Error;

/// Error type for sub-format decoding.
///
/// Raised when a raw config value does not match its documented
/// sub-encoding. Carries enough context to point at the offending
/// part of the value; the section models attach the key name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The value is not hexadecimal of the expected width.
    #[error("invalid hex value '{value}': {reason}")]
    InvalidHex {
        /// The raw value as found in the file
        value: String,
        /// What was expected instead
        reason: &'static str,
    },

    /// A comma-separated sequence had the wrong number of fields.
    #[error("expected {expected} comma-separated fields, got {got}")]
    FieldCount {
        /// Description of the accepted arity (e.g. "4" or "3 or 4")
        expected: &'static str,
        /// Number of fields actually present
        got: usize,
    },

    /// A field that must be numeric is not a number.
    #[error("invalid number '{value}' for {what}")]
    InvalidNumber {
        /// Name of the sub-field
        what: &'static str,
        /// The raw value as found in the file
        value: String,
    },

    /// A numeric field is outside its documented domain.
    #[error("{what} {value} out of range ({range})")]
    OutOfRange {
        /// Name of the sub-field
        what: &'static str,
        /// The parsed value
        value: u32,
        /// The accepted range (e.g. "1-255")
        range: &'static str,
    },

    /// A `%XX` escape is truncated or not followed by two hex digits.
    #[error("invalid escape sequence at byte {pos}")]
    BadEscape {
        /// Byte offset of the `%` within the value
        pos: usize,
    },
}
