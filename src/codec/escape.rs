//! ASCII-hex-escaped string codec (`KBPrefix` / `KBPostfix`).
//!
//! Prefix and postfix values mix three kinds of content:
//!
//! - `$t`: an opaque variable token, substituted by the reader
//!   firmware (e.g. a timestamp); passed through untouched here
//! - `%XX`: one raw byte as two hex digits (e.g. `%0A` for newline)
//! - anything else: a literal character
//!
//! Encoding is the exact inverse of decoding: literal `%` and `$` are
//! re-escaped as `%25` and `%24` so a decode/encode cycle can never
//! change meaning.

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::FormatError;

/// One decoded unit of an escaped string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeToken {
    /// A character passed through literally.
    Literal(char),
    /// One raw byte from a `%XX` escape.
    Byte(u8),
    /// The `$t` variable, resolved by the device.
    Timestamp,
}

/// A decoded escaped string, stored as its token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EscapedString(Vec<EscapeToken>);

impl EscapedString {
    /// The conventional postfix: a single newline byte (`%0A`).
    #[must_use]
    pub fn newline() -> Self {
        Self(vec![EscapeToken::Byte(0x0A)])
    }

    /// Creates an escaped string from plain literal text.
    #[must_use]
    pub fn literal(text: &str) -> Self {
        Self(text.chars().map(EscapeToken::Literal).collect())
    }

    /// Returns the decoded token sequence.
    #[must_use]
    pub fn tokens(&self) -> &[EscapeToken] {
        &self.0
    }

    // Canonical form: the bytes for '%' and '$' are stored as
    // literals, so every construction path yields the same tokens
    // for the same meaning.
    fn normalize(token: EscapeToken) -> EscapeToken {
        match token {
            EscapeToken::Byte(b'%') => EscapeToken::Literal('%'),
            EscapeToken::Byte(b'$') => EscapeToken::Literal('$'),
            other => other,
        }
    }
}

impl From<Vec<EscapeToken>> for EscapedString {
    fn from(tokens: Vec<EscapeToken>) -> Self {
        Self(tokens.into_iter().map(Self::normalize).collect())
    }
}

impl fmt::Display for EscapedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            match *token {
                EscapeToken::Timestamp => write!(f, "$t")?,
                EscapeToken::Byte(b) => write!(f, "%{b:02X}")?,
                EscapeToken::Literal('%') => write!(f, "%25")?,
                EscapeToken::Literal('$') => write!(f, "%24")?,
                EscapeToken::Literal(c) => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for EscapedString {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Vec::new();
        let mut chars = s.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '%' => {
                    let hex: String = chars.by_ref().take(2).map(|(_, c)| c).collect();
                    if hex.len() != 2 {
                        return Err(FormatError::BadEscape { pos });
                    }
                    let byte = u8::from_str_radix(&hex, 16)
                        .map_err(|_| FormatError::BadEscape { pos })?;
                    tokens.push(Self::normalize(EscapeToken::Byte(byte)));
                }
                '$' if chars.peek().is_some_and(|&(_, next)| next == 't') => {
                    chars.next();
                    tokens.push(EscapeToken::Timestamp);
                }
                _ => tokens.push(EscapeToken::Literal(c)),
            }
        }

        Ok(Self(tokens))
    }
}

impl Serialize for EscapedString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EscapedString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
