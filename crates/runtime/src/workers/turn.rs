//! Turn worker that owns the authoritative [`tactics_core::GameCore`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies
//! them to the core one at a time, drives the presentation layer and
//! publishes events to the EventBus. All core mutation happens on this task.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use tactics_core::{
    ArmedAttack, AttackOutcome, CardId, CardSide, GameCore, GameError, HexCoord, MoveOutcome,
    PlayOutcome, RangeResult, SaveData, TurnError, TurnPhase, UnitId,
};

use crate::api::{EnemyTurnReport, GameStatus, Presentation, Result, RuntimeError};
use crate::events::{CardEvent, CombatEvent, EventBus, TurnEvent};
use crate::repository::SaveRepository;

/// Commands that can be sent to the turn worker
pub enum Command {
    PlayCard {
        card: CardId,
        side: CardSide,
        reply: oneshot::Sender<Result<PlayOutcome>>,
    },
    ClickEnemy {
        target: UnitId,
        reply: oneshot::Sender<Result<AttackOutcome>>,
    },
    CancelAttack {
        reply: oneshot::Sender<Result<ArmedAttack>>,
    },
    MovePlayer {
        destination: HexCoord,
        reply: oneshot::Sender<Result<MoveOutcome>>,
    },
    /// End the player turn and run the enemy turn to completion.
    EndTurn {
        reply: oneshot::Sender<Result<EnemyTurnReport>>,
    },
    /// Sent after the game-over signal; replies once the run has ended.
    PlayerDeath { reply: oneshot::Sender<()> },
    MovementRange { reply: oneshot::Sender<RangeResult> },
    QueryStatus { reply: oneshot::Sender<GameStatus> },
    QuerySnapshot { reply: oneshot::Sender<SaveData> },
}

/// Collaborators the worker drives besides the core.
pub struct TurnWorkerParts {
    pub event_bus: EventBus,
    pub presentation: Arc<dyn Presentation>,
    pub saves: Arc<dyn SaveRepository>,
    pub game_over: Arc<watch::Sender<bool>>,
    pub enemy_delay: Duration,
}

/// Background task that processes turn commands.
pub struct TurnWorker {
    core: GameCore,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    presentation: Arc<dyn Presentation>,
    saves: Arc<dyn SaveRepository>,
    game_over_tx: Arc<watch::Sender<bool>>,
    game_over_rx: watch::Receiver<bool>,
    enemy_delay: Duration,
    announced: bool,
}

impl TurnWorker {
    pub fn new(core: GameCore, command_rx: mpsc::Receiver<Command>, parts: TurnWorkerParts) -> Self {
        info!(
            "TurnWorker initialized at turn {} ({}), {} enemies",
            core.turn(),
            core.phase(),
            core.enemies().len()
        );

        let game_over_rx = parts.game_over.subscribe();
        Self {
            core,
            command_rx,
            event_bus: parts.event_bus,
            presentation: parts.presentation,
            saves: parts.saves,
            game_over_tx: parts.game_over,
            game_over_rx,
            enemy_delay: parts.enemy_delay,
            announced: false,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                _ = game_over_signal(&mut self.game_over_rx), if !self.announced => {
                    let from = self.core.phase();
                    self.announce_game_over(from);
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
            }
        }
        debug!("TurnWorker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::PlayCard { card, side, reply } => {
                let result = self.play_card(card, side);
                if reply.send(result).is_err() {
                    debug!("PlayCard reply channel closed (caller dropped)");
                }
            }
            Command::ClickEnemy { target, reply } => {
                let result = self.click_enemy(target);
                if reply.send(result).is_err() {
                    debug!("ClickEnemy reply channel closed (caller dropped)");
                }
            }
            Command::CancelAttack { reply } => {
                let result = self.cancel_attack();
                if reply.send(result).is_err() {
                    debug!("CancelAttack reply channel closed (caller dropped)");
                }
            }
            Command::MovePlayer { destination, reply } => {
                let result = self.move_player(destination).await;
                if reply.send(result).is_err() {
                    debug!("MovePlayer reply channel closed (caller dropped)");
                }
            }
            Command::EndTurn { reply } => {
                let result = self.end_turn().await;
                if reply.send(result).is_err() {
                    debug!("EndTurn reply channel closed (caller dropped)");
                }
            }
            Command::PlayerDeath { reply } => {
                let from = self.core.phase();
                self.announce_game_over(from);
                if reply.send(()).is_err() {
                    debug!("PlayerDeath reply channel closed (caller dropped)");
                }
            }
            Command::MovementRange { reply } => {
                if reply.send(self.core.movement_range()).is_err() {
                    debug!("MovementRange reply channel closed (caller dropped)");
                }
            }
            Command::QueryStatus { reply } => {
                if reply.send(GameStatus::of(&self.core)).is_err() {
                    debug!("QueryStatus reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.core.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn play_card(&mut self, card: CardId, side: CardSide) -> Result<PlayOutcome> {
        let from = self.core.phase();
        let outcome = self
            .core
            .process_played_card(card, side)
            .map_err(|e| rejected("play_card", e))?;
        debug!(
            "{} played ({}), {} action points left",
            card, side, outcome.action_points
        );

        if outcome.movement_gained > 0 {
            self.presentation
                .update_movement_points(self.core.player().movement);
        }
        if !outcome.drawn.is_empty() {
            self.event_bus.publish(CardEvent::CardsDrawn {
                cards: outcome.drawn.clone(),
            });
        }
        if let Some(attack) = &outcome.armed {
            self.presentation
                .update_attack_info(attack.damage, attack.range);
            for tile in self.tiles_of(&outcome.highlighted) {
                self.presentation.enable_highlight(tile);
            }
            self.event_bus.publish(CombatEvent::AttackArmed {
                attack: attack.clone(),
                highlighted: outcome.highlighted.clone(),
            });
        }
        self.event_bus
            .publish(CardEvent::CardPlayed(outcome.clone()));
        self.publish_phase_change(from);

        Ok(outcome)
    }

    fn click_enemy(&mut self, target: UnitId) -> Result<AttackOutcome> {
        let from = self.core.phase();
        let tiles = self.tiles_of(&self.core.highlighted());
        let outcome = self
            .core
            .handle_enemy_click(target)
            .map_err(|e| rejected("click_enemy", e))?;
        debug!(
            "{} took {} damage ({} absorbed), killed: {}",
            target, outcome.damage.dealt, outcome.damage.absorbed, outcome.damage.killed
        );

        self.clear_attack_display(tiles);
        self.event_bus
            .publish(CombatEvent::AttackResolved(outcome.clone()));
        self.publish_phase_change(from);

        Ok(outcome)
    }

    fn cancel_attack(&mut self) -> Result<ArmedAttack> {
        let from = self.core.phase();
        let tiles = self.tiles_of(&self.core.highlighted());
        let attack = self
            .core
            .cancel_attack()
            .map_err(|e| rejected("cancel_attack", e))?;

        self.clear_attack_display(tiles);
        self.event_bus
            .publish(CombatEvent::AttackCancelled(attack.clone()));
        self.publish_phase_change(from);

        Ok(attack)
    }

    async fn move_player(&mut self, destination: HexCoord) -> Result<MoveOutcome> {
        let outcome = self
            .core
            .move_player(destination)
            .map_err(|e| rejected("move_player", e))?;
        if !outcome.activated.is_empty() {
            info!("Entering a new room woke {} enemies", outcome.activated.len());
        }

        let finished = until_game_over(
            &mut self.game_over_rx,
            self.presentation
                .move_through_path(UnitId::PLAYER, &outcome.world_path),
        )
        .await;
        if !finished {
            debug!("Player movement cut short by game over");
        }
        self.presentation
            .update_movement_points(outcome.remaining_movement);
        self.event_bus.publish(CombatEvent::UnitMoved {
            unit: UnitId::PLAYER,
            path: outcome.path.clone(),
            cost: outcome.cost,
        });

        Ok(outcome)
    }

    /// Runs the enemy turn.
    ///
    /// Each enemy acts to completion (including its movement tween) and is
    /// followed by the fixed enemy delay. The game-over signal is honored at
    /// every one of those suspension points.
    async fn end_turn(&mut self) -> Result<EnemyTurnReport> {
        let from = self.core.phase();
        let tiles = self.tiles_of(&self.core.highlighted());
        let ended = self
            .core
            .end_player_turn()
            .map_err(|e| rejected("end_turn", e))?;
        if ended.forfeited.is_some() {
            debug!("Armed attack forfeited at end of turn");
            self.clear_attack_display(tiles);
        }
        self.persist(&ended.save);
        self.publish_phase_change(from);

        let order = self.core.enemy_order();
        info!("Enemy turn started, {} enemies to act", order.len());
        self.event_bus.publish(TurnEvent::EnemyTurnStarted {
            order: order.clone(),
        });

        let mut actions = Vec::with_capacity(order.len());
        for enemy in order {
            if *self.game_over_rx.borrow() {
                break;
            }
            let report = match self.core.run_enemy_action(enemy) {
                Ok(report) => report,
                Err(error) => {
                    warn!("{} skipped its action: {}", enemy, error);
                    continue;
                }
            };
            debug!(
                "{} acted: walked {} steps, attacked: {}",
                enemy,
                report.path.len(),
                report.attack.is_some()
            );

            let finished = report.world_path.is_empty()
                || until_game_over(
                    &mut self.game_over_rx,
                    self.presentation.move_through_path(enemy, &report.world_path),
                )
                .await;
            self.event_bus
                .publish(CombatEvent::EnemyActed(report.clone()));
            let player_killed = report.player_killed;
            actions.push(report);

            if player_killed || !finished {
                break;
            }
            if !until_game_over(&mut self.game_over_rx, tokio::time::sleep(self.enemy_delay)).await
            {
                break;
            }
        }

        if self.core.phase().is_game_over() || *self.game_over_rx.borrow() {
            self.announce_game_over(TurnPhase::EnemyTurn);
            return Ok(EnemyTurnReport {
                forfeited: ended.forfeited,
                actions,
                next_turn: None,
            });
        }

        let from = self.core.phase();
        let start = self
            .core
            .finish_enemy_turn()
            .map_err(|e| rejected("finish_enemy_turn", e))?;
        if !start.shields_decayed.is_empty() {
            self.event_bus.publish(TurnEvent::ShieldsDecayed {
                units: start.shields_decayed.clone(),
            });
        }
        if !start.drawn.is_empty() {
            self.event_bus.publish(CardEvent::CardsDrawn {
                cards: start.drawn.clone(),
            });
        }
        self.presentation
            .update_movement_points(self.core.player().movement);
        info!(
            "Player turn {} started with {} action points",
            start.turn, start.action_points
        );
        self.event_bus
            .publish(TurnEvent::TurnStarted(start.clone()));
        self.publish_phase_change(from);

        Ok(EnemyTurnReport {
            forfeited: ended.forfeited,
            actions,
            next_turn: Some(start),
        })
    }

    /// Moves the core into game over once and tells everyone about it.
    fn announce_game_over(&mut self, from: TurnPhase) {
        if self.announced {
            return;
        }
        self.announced = true;

        if !self.core.phase().is_game_over()
            && let Err(error) = self.core.handle_player_death()
        {
            warn!("Failed to enter game over: {}", error);
        }
        self.game_over_tx.send_replace(true);
        self.presentation.show_game_over();

        info!("Game over on turn {}", self.core.turn());
        self.event_bus.publish(TurnEvent::PhaseChanged {
            from,
            to: TurnPhase::GameOver,
        });
        self.event_bus.publish(TurnEvent::GameOver {
            turn: self.core.turn(),
        });
    }

    fn publish_phase_change(&self, from: TurnPhase) {
        let to = self.core.phase();
        if from != to {
            info!("Phase {} -> {}", from, to);
            self.event_bus.publish(TurnEvent::PhaseChanged { from, to });
        }
    }

    fn persist(&self, save: &SaveData) {
        match self.saves.save(save) {
            Ok(()) => debug!("Persisted save snapshot"),
            Err(error) => error!("Failed to persist save snapshot: {}", error),
        }
    }

    fn clear_attack_display(&self, tiles: Vec<HexCoord>) {
        for tile in tiles {
            self.presentation.disable_highlight(tile);
        }
        self.presentation.clear_attack_info();
    }

    fn tiles_of(&self, units: &[UnitId]) -> Vec<HexCoord> {
        units
            .iter()
            .filter_map(|id| self.core.unit(*id))
            .map(|unit| unit.position)
            .collect()
    }
}

/// Logs a refused transition and wraps it for the caller.
fn rejected(action: &str, error: TurnError) -> RuntimeError {
    warn!(
        "{} rejected [{}/{}]: {}",
        action,
        error.severity().as_str(),
        error.error_code(),
        error
    );
    RuntimeError::Rejected(error)
}

/// Awaits `work` unless the run ends first. Returns `false` when cut short.
async fn until_game_over(
    game_over: &mut watch::Receiver<bool>,
    work: impl Future<Output = ()>,
) -> bool {
    tokio::select! {
        biased;
        _ = game_over_signal(game_over) => false,
        _ = work => true,
    }
}

/// Resolves once the game-over flag is set.
async fn game_over_signal(game_over: &mut watch::Receiver<bool>) {
    if game_over.wait_for(|over| *over).await.is_err() {
        // Sender gone: the flag can no longer be set.
        std::future::pending::<()>().await;
    }
}
