//! Combat units (the player and enemies).

use std::fmt;

use bitflags::bitflags;

use crate::combat::StatusEffects;
use crate::hex::{HexCoord, RoomId};

/// Unique identifier for a unit on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl UnitId {
    /// Reserved identifier for the player-controlled unit.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier for a non-unit object placed on a tile (chest, barrel, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropId(pub u32);

/// Side a unit fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Player,
    Enemy,
}

/// Character class. Items may grant extra bonuses to one class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitClass {
    #[default]
    Warrior,
    Rogue,
    Mage,
    Cleric,
}

bitflags! {
    /// Boolean status bits tracked per unit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFlags: u8 {
        const ALIVE       = 1 << 0;
        /// Takes turns and can be targeted. Enemies start asleep until their
        /// room is entered.
        const ACTIVE      = 1 << 1;
        const HIGHLIGHTED = 1 << 2;
    }
}

/// What an enemy does on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyProfile {
    pub damage: u32,
    /// Hex distance the enemy can strike from.
    pub attack_range: u32,
    /// Steps the enemy may walk per turn.
    pub movement: u32,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            damage: 1,
            attack_range: 1,
            movement: 2,
        }
    }
}

/// A unit taking part in combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatUnit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub class: UnitClass,
    pub position: HexCoord,
    pub room: RoomId,
    pub health: u32,
    /// Max health before slot and equipment bonuses.
    pub base_max_health: u32,
    pub shield: u32,
    pub movement: u32,
    pub flags: UnitFlags,
    pub status: StatusEffects,
    /// Present for enemies only.
    pub profile: Option<EnemyProfile>,
}

impl CombatUnit {
    pub fn player(class: UnitClass, position: HexCoord, max_health: u32) -> Self {
        Self {
            id: UnitId::PLAYER,
            kind: UnitKind::Player,
            class,
            position,
            room: RoomId::default(),
            health: max_health,
            base_max_health: max_health,
            shield: 0,
            movement: 0,
            flags: UnitFlags::ALIVE | UnitFlags::ACTIVE,
            status: StatusEffects::default(),
            profile: None,
        }
    }

    pub fn enemy(id: UnitId, position: HexCoord, max_health: u32, profile: EnemyProfile) -> Self {
        Self {
            id,
            kind: UnitKind::Enemy,
            class: UnitClass::default(),
            position,
            room: RoomId::default(),
            health: max_health,
            base_max_health: max_health,
            shield: 0,
            movement: 0,
            flags: UnitFlags::ALIVE,
            status: StatusEffects::default(),
            profile: Some(profile),
        }
    }

    pub fn with_room(mut self, room: RoomId) -> Self {
        self.room = room;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.flags.contains(UnitFlags::ALIVE)
    }

    /// Alive and awake.
    pub fn is_active(&self) -> bool {
        self.flags.contains(UnitFlags::ALIVE | UnitFlags::ACTIVE)
    }

    pub fn is_enemy(&self) -> bool {
        self.kind == UnitKind::Enemy
    }

    /// Spends movement points, flooring at zero.
    pub fn spend_movement(&mut self, amount: u32) {
        self.movement = self.movement.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemies_start_asleep() {
        let enemy = CombatUnit::enemy(UnitId(3), HexCoord::ORIGIN, 5, EnemyProfile::default());
        assert!(enemy.is_alive());
        assert!(!enemy.is_active());
        assert!(CombatUnit::player(UnitClass::Rogue, HexCoord::ORIGIN, 10).is_active());
    }

    #[test]
    fn movement_floors_at_zero() {
        let mut player = CombatUnit::player(UnitClass::Warrior, HexCoord::ORIGIN, 10);
        player.movement = 2;
        player.spend_movement(5);
        assert_eq!(player.movement, 0);
    }
}
