//! Typed configuration model.
//!
//! One entity per configuration domain:
//! - Apple VAS passes ([`AppleVasEntry`], repeated, slots 1-6)
//! - Google Smart Tap passes ([`SmartTapEntry`], repeated, slots 1-6)
//! - Keyboard emulation ([`KeyboardSection`], singleton)
//! - NFC tag reading ([`NfcSection`], singleton)
//! - MIFARE DESFire apps ([`DesfireEntry`] in [`DesfireSection`],
//!   repeated, slots 1-9)
//! - LED/beep feedback ([`FeedbackSection`], singleton)
//!
//! all composed into [`VtapConfig`]. Each section owns its field
//! validation and its `Key=Value` line production/consumption; slot
//! numbers are owned by the aggregate's [`SlotGroup`]s, never stored
//! on entries.
//!
//! # Validation
//!
//! Direct construction (`new`, `validate`) fails fast on the first
//! violated constraint. `from_lines` accumulates every violation so
//! the parser can report a whole file's problems at once.

mod config;
pub mod defaults;
mod desfire;
mod error;
mod feedback;
mod keyboard;
mod nfc;
mod passes;
mod raw;
mod slots;
mod smarttap;
mod vas;

#[cfg(test)]
mod desfire_tests;
#[cfg(test)]
mod keyboard_tests;
#[cfg(test)]
mod nfc_tests;

pub use config::{SmartTapGroup, VasGroup, VtapConfig};
pub use desfire::{DesfireCrypto, DesfireEntry, DesfireFormat, DesfireSection};
pub use error::{FieldError, StructuralError};
pub use feedback::{BeepSection, FeedbackSection, LedMode, LedSection, LedSelect};
pub use keyboard::KeyboardSection;
pub use nfc::{MinDigits, NfcSection, NfcTagMode, TagKeyType, TagReadFormat, TagReadSection};
pub use passes::EnabledPasses;
pub use slots::{DesfireSlots, SlotGroup, SlotKind, SmartTapSlots, VasSlots};
pub use smarttap::SmartTapEntry;
pub use vas::AppleVasEntry;
