//! Equipped items and the stat bonuses they grant.
//!
//! Totals are never cached: every query sums over whatever is equipped right
//! now, so an equip or unequip shows up on the very next lookup.

use std::collections::BTreeMap;
use std::fmt;

use strum::IntoEnumIterator;

use crate::unit::UnitClass;

/// Identifier of an item definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Equipment slots. Each holds at most one item.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    Head,
    Torso,
    Shoes,
    Weapon,
}

/// Stats an item can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Damage,
    Defense,
    Heal,
    MovementSpeed,
    MaxHealth,
    MaxActionPoints,
    WeaponRange,
}

/// Flat bonuses granted to any wielder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemStats {
    pub damage: i32,
    pub defense: i32,
    pub heal: i32,
    pub movement_speed: i32,
    pub max_health: i32,
    pub max_action_points: i32,
    /// Absolute reach of a weapon; 0 on non-weapons.
    pub weapon_range: i32,
}

impl ItemStats {
    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Damage => self.damage,
            StatKind::Defense => self.defense,
            StatKind::Heal => self.heal,
            StatKind::MovementSpeed => self.movement_speed,
            StatKind::MaxHealth => self.max_health,
            StatKind::MaxActionPoints => self.max_action_points,
            StatKind::WeaponRange => self.weapon_range,
        }
    }
}

/// Bonus that only applies when the wielder's class matches the item's class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassBonus {
    pub stat: StatKind,
    pub amount: i32,
}

/// Static definition of an equippable item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipmentSlot,
    /// Class eligible for the class bonuses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: Option<UnitClass>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: ItemStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_bonus_1: Option<ClassBonus>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_bonus_2: Option<ClassBonus>,
}

impl ItemDefinition {
    pub fn new(id: ItemId, name: impl Into<String>, slot: EquipmentSlot) -> Self {
        Self {
            id,
            name: name.into(),
            slot,
            class: None,
            stats: ItemStats::default(),
            class_bonus_1: None,
            class_bonus_2: None,
        }
    }

    pub fn with_stats(mut self, stats: ItemStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_class_bonuses(
        mut self,
        class: UnitClass,
        first: Option<ClassBonus>,
        second: Option<ClassBonus>,
    ) -> Self {
        self.class = Some(class);
        self.class_bonus_1 = first;
        self.class_bonus_2 = second;
        self
    }

    /// Contribution of this item to `stat` for a wielder of class `wielder`.
    pub fn bonus(&self, stat: StatKind, wielder: UnitClass) -> i32 {
        let class_matches = self.class == Some(wielder);
        let class_part: i32 = [self.class_bonus_1, self.class_bonus_2]
            .into_iter()
            .flatten()
            .filter(|bonus| class_matches && bonus.stat == stat)
            .map(|bonus| bonus.amount)
            .sum();
        self.stats.get(stat) + class_part
    }
}

/// Items currently equipped by the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EquipmentSet {
    slots: BTreeMap<EquipmentSlot, ItemDefinition>,
}

impl EquipmentSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Equips `item` into its slot, returning whatever it replaced.
    pub fn equip(&mut self, item: ItemDefinition) -> Option<ItemDefinition> {
        self.slots.insert(item.slot, item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemDefinition> {
        self.slots.remove(&slot)
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&ItemDefinition> {
        self.slots.get(&slot)
    }

    /// Equipped items in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        EquipmentSlot::iter().filter_map(|slot| self.slots.get(&slot))
    }

    /// Equipped item id per slot.
    pub fn loadout(&self) -> BTreeMap<EquipmentSlot, ItemId> {
        self.slots
            .iter()
            .map(|(slot, item)| (*slot, item.id))
            .collect()
    }

    /// Sum of flat and matching class bonuses over every equipped item.
    pub fn total_bonus(&self, stat: StatKind, wielder: UnitClass) -> i32 {
        self.iter().map(|item| item.bonus(stat, wielder)).sum()
    }

    /// Equipped weapon's absolute reach, or 1 (melee) without a weapon.
    pub fn weapon_range(&self) -> u32 {
        self.get(EquipmentSlot::Weapon)
            .map(|weapon| weapon.stats.weapon_range.max(1) as u32)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> ItemDefinition {
        ItemDefinition::new(ItemId(1), "Sword", EquipmentSlot::Weapon)
            .with_stats(ItemStats {
                damage: 2,
                weapon_range: 1,
                ..ItemStats::default()
            })
            .with_class_bonuses(
                UnitClass::Warrior,
                Some(ClassBonus {
                    stat: StatKind::Damage,
                    amount: 3,
                }),
                Some(ClassBonus {
                    stat: StatKind::Defense,
                    amount: 1,
                }),
            )
    }

    fn boots() -> ItemDefinition {
        ItemDefinition::new(ItemId(2), "Boots", EquipmentSlot::Shoes).with_stats(ItemStats {
            movement_speed: 1,
            defense: 1,
            ..ItemStats::default()
        })
    }

    #[test]
    fn flat_bonuses_sum_across_items() {
        let mut set = EquipmentSet::empty();
        set.equip(sword());
        set.equip(boots());

        assert_eq!(set.total_bonus(StatKind::MovementSpeed, UnitClass::Mage), 1);
        assert_eq!(set.total_bonus(StatKind::Defense, UnitClass::Mage), 1);
    }

    #[test]
    fn class_bonus_requires_matching_class() {
        let mut set = EquipmentSet::empty();
        set.equip(sword());

        assert_eq!(set.total_bonus(StatKind::Damage, UnitClass::Warrior), 5);
        assert_eq!(set.total_bonus(StatKind::Damage, UnitClass::Rogue), 2);
        assert_eq!(set.total_bonus(StatKind::Defense, UnitClass::Warrior), 1);
    }

    #[test]
    fn equipping_occupied_slot_replaces() {
        let mut set = EquipmentSet::empty();
        set.equip(sword());
        let bow = ItemDefinition::new(ItemId(3), "Bow", EquipmentSlot::Weapon).with_stats(
            ItemStats {
                weapon_range: 3,
                ..ItemStats::default()
            },
        );

        let replaced = set.equip(bow);
        assert_eq!(replaced.map(|item| item.id), Some(ItemId(1)));
        assert_eq!(set.weapon_range(), 3);
        assert_eq!(set.total_bonus(StatKind::Damage, UnitClass::Warrior), 0);
    }

    #[test]
    fn weapon_range_defaults_to_melee() {
        let mut set = EquipmentSet::empty();
        assert_eq!(set.weapon_range(), 1);
        set.equip(boots());
        assert_eq!(set.weapon_range(), 1);
    }

    #[test]
    fn totals_track_unequip_immediately() {
        let mut set = EquipmentSet::empty();
        set.equip(boots());
        assert_eq!(set.total_bonus(StatKind::MovementSpeed, UnitClass::Warrior), 1);
        set.unequip(EquipmentSlot::Shoes);
        assert_eq!(set.total_bonus(StatKind::MovementSpeed, UnitClass::Warrior), 0);
    }
}
