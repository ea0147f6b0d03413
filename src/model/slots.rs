//! Slot-numbered entry groups.
//!
//! Repeated sections (Apple VAS, Smart Tap, DESFire) are keyed by a
//! slot number embedded in the key prefix (`VAS3MerchantID`). The
//! aggregate owns slot assignment: entries never store their own
//! slot. [`SlotGroup`] enforces the structural invariants: distinct
//! slots, slots within range, and the group-size limit.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::StructuralError;

/// Marker describing a slot group's key prefix and capacity.
pub trait SlotKind {
    /// Key prefix, also used in error messages ("VAS", "ST", "DESFire").
    const GROUP: &'static str;
    /// Highest valid slot number; slots run 1 to `MAX`.
    const MAX: u8;
}

/// Apple VAS pass slots (1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VasSlots;

impl SlotKind for VasSlots {
    const GROUP: &'static str = "VAS";
    const MAX: u8 = 6;
}

/// Google Smart Tap pass slots (1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmartTapSlots;

impl SlotKind for SmartTapSlots {
    const GROUP: &'static str = "ST";
    const MAX: u8 = 6;
}

/// DESFire application slots (1-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DesfireSlots;

impl SlotKind for DesfireSlots {
    const GROUP: &'static str = "DESFire";
    const MAX: u8 = 9;
}

/// An ordered group of slot-numbered entries.
///
/// Slots are preserved exactly as parsed (gaps included), so a file
/// using slots 1 and 3 regenerates with the same numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGroup<K: SlotKind, T> {
    entries: BTreeMap<u8, T>,
    _kind: PhantomData<K>,
}

// Derived Default would demand T: Default; an empty group needs no
// such bound.
impl<K: SlotKind, T> Default for SlotGroup<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SlotKind, T> SlotGroup<K, T> {
    /// Creates an empty group.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            _kind: PhantomData,
        }
    }

    /// Appends an entry at the lowest free slot and returns that slot.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::GroupFull`] when every slot is taken.
    pub fn push(&mut self, entry: T) -> Result<u8, StructuralError> {
        let slot = (1..=K::MAX)
            .find(|slot| !self.entries.contains_key(slot))
            .ok_or(StructuralError::GroupFull {
                group: K::GROUP,
                max: K::MAX,
            })?;
        self.entries.insert(slot, entry);
        Ok(slot)
    }

    /// Places an entry at an explicit slot.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::SlotOutOfRange`] for a slot outside
    /// 1 to the group maximum, or [`StructuralError::DuplicateSlot`]
    /// when the slot is already occupied.
    pub fn insert(&mut self, slot: u8, entry: T) -> Result<(), StructuralError> {
        Self::check_slot(slot)?;
        if self.entries.contains_key(&slot) {
            return Err(StructuralError::DuplicateSlot {
                group: K::GROUP,
                slot,
            });
        }
        self.entries.insert(slot, entry);
        Ok(())
    }

    /// Removes and returns the entry at `slot`, if any.
    pub fn remove(&mut self, slot: u8) -> Option<T> {
        self.entries.remove(&slot)
    }

    /// Returns the entry at `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: u8) -> Option<&T> {
        self.entries.get(&slot)
    }

    /// Mutable access to the entry at `slot`, if occupied.
    pub fn get_mut(&mut self, slot: u8) -> Option<&mut T> {
        self.entries.get_mut(&slot)
    }

    /// Iterates entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &T)> {
        self.entries.iter().map(|(&slot, entry)| (slot, entry))
    }

    /// Number of entries in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the group holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest valid slot number for this group.
    #[must_use]
    pub const fn max_slots() -> u8 {
        K::MAX
    }

    fn check_slot(slot: u8) -> Result<(), StructuralError> {
        if slot == 0 || slot > K::MAX {
            return Err(StructuralError::SlotOutOfRange {
                group: K::GROUP,
                slot,
                max: K::MAX,
            });
        }
        Ok(())
    }
}

impl<K: SlotKind, T: Serialize> Serialize for SlotGroup<K, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, K: SlotKind, T: Deserialize<'de>> Deserialize<'de> for SlotGroup<K, T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<u8, T>::deserialize(deserializer)?;
        for &slot in entries.keys() {
            Self::check_slot(slot).map_err(de::Error::custom)?;
        }
        Ok(Self {
            entries,
            _kind: PhantomData,
        })
    }
}
