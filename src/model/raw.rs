//! Raw value decoding shared by the section models.
//!
//! `from_lines` implementations turn raw `Key=Value` strings into
//! typed fields through these helpers so that every section reports
//! malformed values the same way.

use std::fmt::Display;
use std::str::FromStr;

use super::error::FieldError;

/// Decodes a `0`/`1` flag.
pub(crate) fn bool_flag(field: &str, value: &str) -> Result<bool, FieldError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(FieldError::malformed(field, "expected 0 or 1")),
    }
}

/// Decodes an unsigned number of the field's storage width.
///
/// A value that is numeric but too wide for `T` is reported as a
/// range error against `expected`, not as malformed.
pub(crate) fn number<T>(field: &str, value: &str, expected: &'static str) -> Result<T, FieldError>
where
    T: FromStr + TryFrom<u32>,
{
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::malformed(field, "expected an unsigned number"));
    }

    let wide: u32 = value
        .parse()
        .map_err(|_| FieldError::range(field, value, expected))?;

    T::try_from(wide).map_err(|_| FieldError::range(field, wide, expected))
}

/// Decodes a single-character value.
pub(crate) fn single_char(field: &str, value: &str) -> Result<char, FieldError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(FieldError::malformed(field, "expected a single character")),
    }
}

/// Decodes a value through its codec `FromStr` implementation.
pub(crate) fn codec<T>(field: &str, value: &str) -> Result<T, FieldError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e: T::Err| FieldError::malformed(field, e.to_string()))
}
