//! Persistent player progress.

use std::collections::BTreeMap;

use crate::equipment::{EquipmentSlot, ItemId};

/// Snapshot written at the end of every player turn and read back at level
/// load. Items are stored by id and resolved against the item catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaveData {
    pub current_health: u32,
    pub extra_health_slots: u32,
    pub exhaustion: u32,
    pub equipped: BTreeMap<EquipmentSlot, ItemId>,
}
