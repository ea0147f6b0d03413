//! Stateless field codecs for the config.txt sub-formats.
//!
//! This module provides encode/decode for the structurally distinct
//! sub-encodings embedded in config values:
//! - Hex bitmask flags ([`KbSource`])
//! - LED color+timing sequences ([`LedSequence`], [`RgbColor`])
//! - Beep timing+frequency sequences ([`BeepSequence`])
//! - ASCII-hex-escaped strings ([`EscapedString`])
//!
//! All codecs are pure: decoding is `FromStr`, encoding is `Display`,
//! and `decode(encode(x)) == x` holds for every valid value.

mod bitmask;
mod error;
mod escape;
mod sequence;

#[cfg(test)]
mod bitmask_tests;
#[cfg(test)]
mod escape_tests;

pub use bitmask::KbSource;
pub use error::FormatError;
pub use escape::{EscapeToken, EscapedString};
pub use sequence::{BeepSequence, LedSequence, RgbColor};
