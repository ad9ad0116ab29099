//! Reports returned by successful transitions.
//!
//! The core does no I/O; everything the presentation layer or the runtime
//! needs to show or log is carried back in these values.

use crate::card::{CardId, CardSide};
use crate::combat::{DamageOutcome, StatusRider};
use crate::hex::{HexCoord, WorldPosition};
use crate::save::SaveData;
use crate::unit::UnitId;

/// Attack committed by a played card and waiting for a target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmedAttack {
    /// Card damage plus the equipment damage bonus.
    pub damage: u32,
    /// Card range adjusted by the equipped weapon's reach.
    pub range: u32,
    /// Status effects applied to the target when the attack lands.
    pub riders: Vec<StatusRider>,
}

/// Result of playing a card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayOutcome {
    pub card: CardId,
    pub side: CardSide,
    /// Cards drawn by `Draw` effects.
    pub drawn: Vec<CardId>,
    pub action_points_gained: u32,
    /// Shield from `GainBlock` plus the side's block (with equipment bonus).
    pub shield_gained: u32,
    pub healed: u32,
    pub movement_gained: u32,
    pub armed: Option<ArmedAttack>,
    /// Enemies the armed attack can hit, sorted by id.
    pub highlighted: Vec<UnitId>,
    /// Action points left after paying for the card.
    pub action_points: u32,
}

/// Result of resolving an armed attack against a clicked enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub target: UnitId,
    pub damage: DamageOutcome,
    /// Riders that stuck (none when the target died).
    pub riders: Vec<StatusRider>,
}

/// Result of moving the player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    /// Steps from just after the start to the destination.
    pub path: Vec<HexCoord>,
    /// World positions of `path`, for the movement tween.
    pub world_path: Vec<WorldPosition>,
    pub cost: u32,
    pub remaining_movement: u32,
    /// Enemies woken up by entering a new room.
    pub activated: Vec<UnitId>,
}

/// Result of ending the player's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndTurnOutcome {
    /// Attack that was still armed and got dropped.
    pub forfeited: Option<ArmedAttack>,
    /// Points carried into the next player turn.
    pub carried_action_points: u32,
    /// Snapshot to persist.
    pub save: SaveData,
}

/// What one enemy did during the enemy turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyActionReport {
    pub enemy: UnitId,
    /// Poison tick taken before acting.
    pub poison: Option<DamageOutcome>,
    /// The enemy lost this turn to a stun.
    pub stunned: bool,
    /// Steps walked toward the player.
    pub path: Vec<HexCoord>,
    pub world_path: Vec<WorldPosition>,
    /// Hit landed on the player.
    pub attack: Option<DamageOutcome>,
    /// The enemy died during its own turn.
    pub died: bool,
    /// The attack ended the run.
    pub player_killed: bool,
}

impl EnemyActionReport {
    pub(crate) fn new(enemy: UnitId) -> Self {
        Self {
            enemy,
            poison: None,
            stunned: false,
            path: Vec::new(),
            world_path: Vec::new(),
            attack: None,
            died: false,
            player_killed: false,
        }
    }
}

/// Result of closing the enemy turn and opening the next player turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStart {
    /// Turn number that just started (1-based).
    pub turn: u32,
    /// Shield removed per unit, only for units that had any.
    pub shields_decayed: Vec<(UnitId, u32)>,
    pub action_points: u32,
    /// Cards drawn for the opening hand (first turn only).
    pub drawn: Vec<CardId>,
}
