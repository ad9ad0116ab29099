//! Turn state machine types.
//!
//! The transitions themselves are methods on [`crate::GameCore`]; this module
//! holds the phase enum, the action point budget, the rejection error and the
//! outcome reports.

mod action_points;
mod error;
mod outcome;
mod phase;

pub use action_points::ActionPoints;
pub use error::TurnError;
pub use outcome::{
    ArmedAttack, AttackOutcome, EndTurnOutcome, EnemyActionReport, MoveOutcome, PlayOutcome,
    TurnStart,
};
pub use phase::{PlayerPhase, TurnPhase};
