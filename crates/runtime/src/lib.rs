//! Async orchestration for the hex tactics rules.
//!
//! A single turn worker owns the [`tactics_core::GameCore`]; everything else
//! talks to it through a cloneable [`RuntimeHandle`]. The worker paces the
//! enemy turn, waits on the presentation layer for movement, persists the
//! save snapshot at the end of every player turn and publishes what happened
//! on a topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists the player's save snapshot
//! - `workers` keeps the turn worker internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    EnemyTurnReport, GameStatus, NullPresentation, Presentation, Result, RuntimeError,
    RuntimeHandle,
};
pub use events::{CardEvent, CombatEvent, Event, EventBus, Topic, TurnEvent};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
