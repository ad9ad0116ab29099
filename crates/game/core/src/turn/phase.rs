/// Sub-state of the player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerPhase {
    /// Cards may be played and the player may move.
    AwaitingAction,
    /// An attack is armed; the next enemy click resolves or cancels it.
    AwaitingAttackResolution,
}

/// Where the run currently is in the turn cycle.
///
/// ```text
/// PlayerTurn(AwaitingAction) <-> PlayerTurn(AwaitingAttackResolution)
///            |                                   |
///            +---------- end_player_turn --------+
///                              v
///                          EnemyTurn --finish_enemy_turn--> PlayerTurn(AwaitingAction)
///
/// any state --player death--> GameOver (terminal)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    PlayerTurn(PlayerPhase),
    EnemyTurn,
    GameOver,
}

impl TurnPhase {
    pub const START: Self = Self::PlayerTurn(PlayerPhase::AwaitingAction);

    pub const fn is_player_turn(self) -> bool {
        matches!(self, Self::PlayerTurn(_))
    }

    pub const fn is_enemy_turn(self) -> bool {
        matches!(self, Self::EnemyTurn)
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlayerTurn(PlayerPhase::AwaitingAction) => "player_turn.awaiting_action",
            Self::PlayerTurn(PlayerPhase::AwaitingAttackResolution) => {
                "player_turn.awaiting_attack_resolution"
            }
            Self::EnemyTurn => "enemy_turn",
            Self::GameOver => "game_over",
        }
    }
}

impl Default for TurnPhase {
    fn default() -> Self {
        Self::START
    }
}

impl core::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
