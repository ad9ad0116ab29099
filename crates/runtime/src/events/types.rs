//! Event types for different topics.

use serde::{Deserialize, Serialize};
use tactics_core::{
    ArmedAttack, AttackOutcome, CardId, EnemyActionReport, HexCoord, PlayOutcome, TurnPhase,
    TurnStart, UnitId,
};

/// Events related to turn management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    PhaseChanged { from: TurnPhase, to: TurnPhase },

    /// Enemies about to act, in the order they will act.
    EnemyTurnStarted { order: Vec<UnitId> },

    /// Shields stripped at the end of the enemy turn.
    ShieldsDecayed { units: Vec<(UnitId, u32)> },

    /// A new player turn opened.
    TurnStarted(TurnStart),

    GameOver { turn: u32 },
}

/// Events related to attacks and movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    AttackArmed {
        attack: ArmedAttack,
        highlighted: Vec<UnitId>,
    },

    AttackCancelled(ArmedAttack),

    AttackResolved(AttackOutcome),

    UnitMoved {
        unit: UnitId,
        path: Vec<HexCoord>,
        cost: u32,
    },

    EnemyActed(EnemyActionReport),
}

/// Events related to cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardEvent {
    CardPlayed(PlayOutcome),

    CardsDrawn { cards: Vec<CardId> },
}
