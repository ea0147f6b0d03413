//! Documented device defaults for config values.
//!
//! Centralized constants so that default-suppressed emission and
//! parse-time default restoration agree on the same values.

use crate::codec::{EscapedString, KbSource};

/// Default keyboard data-source bitmask (`KBSource`).
pub const KB_SOURCE_BITS: u8 = 0xA5;

/// Default inter-keystroke delay in milliseconds (`KBDelayMS`).
pub const KB_DELAY_MS: u8 = 5;

/// Default pass section separator (`KBPassSeparator`).
pub const KB_PASS_SEPARATOR: char = '|';

/// Default buzzer frequency in Hz when a beep sequence omits it.
pub const BEEP_FREQUENCY_HZ: u16 = 3136;

/// Default DESFire read length in bytes (`DESFire*ReadLength`).
pub const DESFIRE_READ_LENGTH: u8 = 3;

/// Default DESFire multi-app output separator (`DESFireSeparator`).
pub const DESFIRE_SEPARATOR: char = ',';

/// Default keyboard source as a typed value.
#[must_use]
pub const fn kb_source() -> KbSource {
    KbSource::READER_DEFAULT
}

/// Default keyboard postfix: a single newline byte (`%0A`).
#[must_use]
pub fn kb_postfix() -> EscapedString {
    EscapedString::newline()
}
