//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories and rejected turn
//! transitions so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use tactics_core::TurnError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The core refused the transition; nothing changed.
    #[error("transition rejected: {0}")]
    Rejected(#[source] TurnError),

    #[error("turn worker command channel closed")]
    CommandChannelClosed,

    #[error("turn worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("turn worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires a game core before building")]
    MissingCore,

    #[error("failed to set up level: {0}")]
    Setup(String),

    #[error("presentation layer not ready after {polls} polls")]
    NotReady { polls: u32 },
}

impl RuntimeError {
    /// Turn error behind a rejection, if this is one.
    pub fn rejection(&self) -> Option<&TurnError> {
        match self {
            RuntimeError::Rejected(error) => Some(error),
            _ => None,
        }
    }
}
