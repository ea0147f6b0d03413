//! The aggregate configuration for one device file.

use serde::{Deserialize, Serialize};

use super::desfire::{DesfireEntry, DesfireSection};
use super::error::{FieldError, StructuralError};
use super::feedback::FeedbackSection;
use super::keyboard::KeyboardSection;
use super::nfc::NfcSection;
use super::passes::EnabledPasses;
use super::slots::{SlotGroup, SmartTapSlots, VasSlots};
use super::smarttap::SmartTapEntry;
use super::vas::AppleVasEntry;

/// Apple VAS pass group, up to 6 entries.
pub type VasGroup = SlotGroup<VasSlots, AppleVasEntry>;
/// Google Smart Tap pass group, up to 6 entries.
pub type SmartTapGroup = SlotGroup<SmartTapSlots, SmartTapEntry>;

/// The root configuration object for one config.txt file.
///
/// Owns every configured section by composition. Slot uniqueness and
/// group-size limits are enforced by the slot groups at insertion;
/// field-level rules are re-checked by [`validate`](Self::validate).
///
/// Not internally synchronized: share between threads only behind
/// external locking. Independent instances are freely concurrent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VtapConfig {
    /// Apple VAS passes.
    pub vas: VasGroup,
    /// VAS startup slot filter.
    pub vas_default_passes: Option<EnabledPasses>,
    /// Google Smart Tap passes.
    pub smarttap: SmartTapGroup,
    /// Smart Tap startup slot filter.
    pub smarttap_default_passes: Option<EnabledPasses>,
    /// Keyboard emulation settings.
    pub keyboard: Option<KeyboardSection>,
    /// NFC tag settings.
    pub nfc: Option<NfcSection>,
    /// MIFARE DESFire settings.
    pub desfire: Option<DesfireSection>,
    /// LED/beep feedback settings.
    pub feedback: Option<FeedbackSection>,
    /// Unrecognized keys, kept verbatim for forward compatibility
    /// and re-emitted on generation. Last occurrence wins.
    pub extra: Vec<(String, String)>,
}

impl VtapConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a VAS entry at the lowest free slot.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::GroupFull`] when all 6 slots are taken.
    pub fn add_vas(&mut self, entry: AppleVasEntry) -> Result<u8, StructuralError> {
        self.vas.push(entry)
    }

    /// Appends a Smart Tap entry at the lowest free slot.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::GroupFull`] when all 6 slots are taken.
    pub fn add_smarttap(&mut self, entry: SmartTapEntry) -> Result<u8, StructuralError> {
        self.smarttap.push(entry)
    }

    /// Appends a DESFire application at the lowest free slot,
    /// creating the DESFire section if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::GroupFull`] when all 9 slots are taken.
    pub fn add_desfire(&mut self, entry: DesfireEntry) -> Result<u8, StructuralError> {
        self.desfire
            .get_or_insert_with(DesfireSection::default)
            .apps
            .push(entry)
    }

    /// Stores an unrecognized key verbatim, replacing any earlier
    /// value for the same key.
    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.extra.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.extra.push((key, value));
        }
    }

    /// Re-checks every field-level rule across all sections.
    ///
    /// Structural invariants hold by construction; this exists so the
    /// generator can refuse to emit a config whose fields were edited
    /// into an invalid state.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint, with full key names.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        for (slot, entry) in self.vas.iter() {
            let prefix = format!("VAS{slot}");
            for e in entry.errors() {
                errors.push(e.with_prefix(&prefix));
            }
        }
        for (slot, entry) in self.smarttap.iter() {
            let prefix = format!("ST{slot}");
            for e in entry.errors() {
                errors.push(e.with_prefix(&prefix));
            }
        }
        if let Some(ref keyboard) = self.keyboard {
            errors.extend(keyboard.errors());
        }
        if let Some(ref nfc) = self.nfc {
            errors.extend(nfc.errors());
        }
        if let Some(ref desfire) = self.desfire {
            errors.extend(desfire.errors());
        }
        if let Some(ref feedback) = self.feedback {
            errors.extend(feedback.errors());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
