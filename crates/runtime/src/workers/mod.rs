//! Worker tasks that back the runtime orchestration.
//!
//! The turn worker is the only task that touches the game core.

mod turn;

pub use turn::{Command, TurnWorker, TurnWorkerParts};
