use crate::card::{CardId, DeckError};
use crate::error::{ErrorSeverity, GameError};
use crate::hex::{GridError, HexCoord};
use crate::unit::UnitId;

use super::TurnPhase;

/// Rejected turn transitions.
///
/// A rejection never mutates state: the caller's action simply has no effect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("the run is over")]
    GameOver,

    #[error("no action is expected in phase {0}")]
    NotAwaitingAction(TurnPhase),

    #[error("it is not the player's turn (phase {0})")]
    NotPlayerTurn(TurnPhase),

    #[error("it is not the enemy turn (phase {0})")]
    NotEnemyTurn(TurnPhase),

    #[error("no action points left")]
    NoActionPoints,

    #[error("{0} is not a known card")]
    UnknownCard(CardId),

    #[error("{0} is not in hand")]
    CardNotInHand(CardId),

    #[error("no attack is armed")]
    NoAttackArmed,

    #[error("unit {0} is not a highlighted target")]
    TargetNotHighlighted(UnitId),

    #[error("unit {0} does not exist")]
    UnknownUnit(UnitId),

    #[error("enemy {0} cannot act")]
    EnemyNotActive(UnitId),

    #[error("{0} is out of movement range")]
    DestinationUnreachable(HexCoord),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Deck(#[from] DeckError),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver => ErrorSeverity::Fatal,
            Self::NotAwaitingAction(_)
            | Self::NotPlayerTurn(_)
            | Self::NotEnemyTurn(_)
            | Self::NoActionPoints
            | Self::UnknownCard(_)
            | Self::CardNotInHand(_)
            | Self::NoAttackArmed
            | Self::TargetNotHighlighted(_)
            | Self::UnknownUnit(_)
            | Self::EnemyNotActive(_) => ErrorSeverity::Validation,
            Self::DestinationUnreachable(_) => ErrorSeverity::Recoverable,
            Self::Grid(_) | Self::Deck(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "TURN_GAME_OVER",
            Self::NotAwaitingAction(_) => "TURN_NOT_AWAITING_ACTION",
            Self::NotPlayerTurn(_) => "TURN_NOT_PLAYER_TURN",
            Self::NotEnemyTurn(_) => "TURN_NOT_ENEMY_TURN",
            Self::NoActionPoints => "TURN_NO_ACTION_POINTS",
            Self::UnknownCard(_) => "TURN_UNKNOWN_CARD",
            Self::CardNotInHand(_) => "TURN_CARD_NOT_IN_HAND",
            Self::NoAttackArmed => "TURN_NO_ATTACK_ARMED",
            Self::TargetNotHighlighted(_) => "TURN_TARGET_NOT_HIGHLIGHTED",
            Self::UnknownUnit(_) => "TURN_UNKNOWN_UNIT",
            Self::EnemyNotActive(_) => "TURN_ENEMY_NOT_ACTIVE",
            Self::DestinationUnreachable(_) => "TURN_DESTINATION_UNREACHABLE",
            Self::Grid(error) => error.error_code(),
            Self::Deck(error) => error.error_code(),
        }
    }
}
