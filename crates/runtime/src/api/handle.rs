//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers one async helper per
//! input event the game reacts to, plus event streaming by topic.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use tactics_core::{
    ArmedAttack, AttackOutcome, CardId, CardSide, HexCoord, MoveOutcome, PlayOutcome, RangeResult,
    SaveData, UnitId,
};

use super::errors::{Result, RuntimeError};
use super::reports::{EnemyTurnReport, GameStatus};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    game_over: Arc<watch::Sender<bool>>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        game_over: Arc<watch::Sender<bool>>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            game_over,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Play `card` from the hand using `side`.
    pub async fn play_card(&self, card: CardId, side: CardSide) -> Result<PlayOutcome> {
        self.request(|reply| Command::PlayCard { card, side, reply })
            .await?
    }

    /// Resolve the armed attack against a clicked enemy.
    pub async fn click_enemy(&self, target: UnitId) -> Result<AttackOutcome> {
        self.request(|reply| Command::ClickEnemy { target, reply })
            .await?
    }

    /// Drop the armed attack without spending it.
    pub async fn cancel_attack(&self) -> Result<ArmedAttack> {
        self.request(|reply| Command::CancelAttack { reply }).await?
    }

    /// Move the player; resolves once the presentation finished the tween.
    pub async fn move_player(&self, destination: HexCoord) -> Result<MoveOutcome> {
        self.request(|reply| Command::MovePlayer { destination, reply })
            .await?
    }

    /// End the player turn and run the whole enemy turn.
    ///
    /// Resolves once the next player turn has started, or early when the run
    /// ends during the enemy turn.
    pub async fn end_turn(&self) -> Result<EnemyTurnReport> {
        self.request(|reply| Command::EndTurn { reply }).await?
    }

    /// End the run.
    ///
    /// The signal bypasses the command queue, so an enemy turn in flight is
    /// abandoned at its next suspension point. Resolves once the worker has
    /// entered game over.
    pub async fn player_death(&self) -> Result<()> {
        self.game_over.send_replace(true);
        self.request(|reply| Command::PlayerDeath { reply }).await
    }

    /// Cells the player can currently walk to.
    pub async fn movement_range(&self) -> Result<RangeResult> {
        self.request(|reply| Command::MovementRange { reply }).await
    }

    /// Query the current game status (read-only snapshot)
    pub async fn status(&self) -> Result<GameStatus> {
        self.request(|reply| Command::QueryStatus { reply }).await
    }

    /// Current save snapshot, without persisting it.
    pub async fn snapshot(&self) -> Result<SaveData> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Whether the run has ended.
    pub fn is_game_over(&self) -> bool {
        *self.game_over.borrow()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Phase changes, turn starts, game over
    /// - `Topic::Combat` - Attacks, movement and enemy actions
    /// - `Topic::Card` - Cards played and drawn
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
