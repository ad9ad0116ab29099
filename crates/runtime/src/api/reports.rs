//! Values the turn worker hands back to clients.
use serde::{Deserialize, Serialize};
use tactics_core::{
    ArmedAttack, CardId, EnemyActionReport, GameCore, HexCoord, TurnPhase, TurnStart, UnitId,
};

/// Everything that happened between "end turn" and the next player turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTurnReport {
    /// Attack that was still armed when the player ended the turn.
    pub forfeited: Option<ArmedAttack>,
    /// One entry per enemy that acted, in the order they acted.
    pub actions: Vec<EnemyActionReport>,
    /// `None` when the run ended during the enemy turn.
    pub next_turn: Option<TurnStart>,
}

impl EnemyTurnReport {
    pub fn ended_run(&self) -> bool {
        self.next_turn.is_none()
    }
}

/// Read-only view of the game for clients that do not follow events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub phase: TurnPhase,
    pub turn: u32,
    pub action_points: u32,
    pub player_position: HexCoord,
    pub player_health: u32,
    pub player_max_health: u32,
    pub player_shield: u32,
    pub movement: u32,
    pub hand: Vec<CardId>,
    pub highlighted: Vec<UnitId>,
    /// Living enemies with their health.
    pub enemies: Vec<(UnitId, u32)>,
}

impl GameStatus {
    pub(crate) fn of(core: &GameCore) -> Self {
        let player = core.player();
        Self {
            phase: core.phase(),
            turn: core.turn(),
            action_points: core.action_points().current(),
            player_position: player.position,
            player_health: player.health,
            player_max_health: core.player_max_health(),
            player_shield: player.shield,
            movement: player.movement,
            hand: core.hand().to_vec(),
            highlighted: core.highlighted(),
            enemies: core
                .enemies()
                .iter()
                .filter(|enemy| enemy.is_alive())
                .map(|enemy| (enemy.id, enemy.health))
                .collect(),
        }
    }
}
