//! vtap-config: VTAP100 config.txt codec
//!
//! A library for reading and writing the `config.txt` file consumed
//! by VTAP100 NFC pass readers: a typed data model for every
//! configuration section, a parser that restores device defaults and
//! reports every offending key at once, and a generator whose output
//! parses back to the same configuration.

pub mod codec;
pub mod generator;
pub mod model;
pub mod parser;

#[cfg(test)]
mod roundtrip_tests;

pub use generator::{GenerateError, Generator, generate, generate_template};
pub use model::VtapConfig;
pub use parser::{ParseError, Parsed, parse};
