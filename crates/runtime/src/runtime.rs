//! High-level runtime orchestrator.
//!
//! The runtime owns the turn worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the game.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use tactics_content::ContentFactory;
use tactics_core::GameCore;

use crate::api::{NullPresentation, Presentation, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::repository::{InMemorySaveRepository, SaveRepository};
use crate::workers::{Command, TurnWorker, TurnWorkerParts};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pause after each enemy's action during the enemy turn.
    pub enemy_delay: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// How often the presentation layer is asked whether it is ready.
    pub ready_poll_interval: Duration,
    /// Polls before giving up on the presentation layer.
    pub max_ready_polls: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            enemy_delay: Duration::from_millis(500),
            event_buffer_size: 100,
            command_buffer_size: 32,
            ready_poll_interval: Duration::from_millis(100),
            max_ready_polls: 50,
        }
    }
}

/// Main runtime that drives one run of the game
///
/// Design: Runtime owns the worker task. [`RuntimeHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain; every other handle clone must already
    /// be dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    core: Option<GameCore>,
    presentation: Arc<dyn Presentation>,
    saves: Arc<dyn SaveRepository>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            core: None,
            presentation: Arc::new(NullPresentation),
            saves: Arc::new(InMemorySaveRepository::new()),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide a ready game core
    pub fn core(mut self, core: GameCore) -> Self {
        self.core = Some(core);
        self
    }

    /// Set the presentation layer (defaults to [`NullPresentation`])
    pub fn presentation(mut self, presentation: Arc<dyn Presentation>) -> Self {
        self.presentation = presentation;
        self
    }

    /// Set where save snapshots go (defaults to an in-memory repository)
    pub fn saves(mut self, saves: Arc<dyn SaveRepository>) -> Self {
        self.saves = saves;
        self
    }

    /// Build the game core for `level` from content, restoring the save
    /// repository's snapshot when there is one.
    ///
    /// Call after [`RuntimeBuilder::saves`].
    pub fn level(mut self, factory: &ContentFactory, level: &str) -> Result<Self> {
        let save = self.saves.load()?;
        if save.is_some() {
            tracing::info!("Restoring saved progress for level {}", level);
        }

        let core = factory
            .build_game(level, save)
            .map_err(|e| RuntimeError::Setup(format!("{:#}", e)))?;
        self.core = Some(core);
        Ok(self)
    }

    /// Build the runtime
    ///
    /// Waits (bounded by the config's poll budget) for the presentation layer
    /// to report ready before the worker starts.
    pub async fn build(self) -> Result<Runtime> {
        let core = self.core.ok_or(RuntimeError::MissingCore)?;
        wait_until_ready(self.presentation.as_ref(), &self.config).await?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let game_over = Arc::new(watch::channel(core.phase().is_game_over()).0);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), Arc::clone(&game_over));

        let worker = TurnWorker::new(
            core,
            command_rx,
            TurnWorkerParts {
                event_bus,
                presentation: self.presentation,
                saves: self.saves,
                game_over,
                enemy_delay: self.config.enemy_delay,
            },
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}

async fn wait_until_ready(presentation: &dyn Presentation, config: &RuntimeConfig) -> Result<()> {
    let mut polls = 0;
    while !presentation.is_ready() {
        if polls == config.max_ready_polls {
            tracing::error!("Presentation layer not ready after {} polls", polls);
            return Err(RuntimeError::NotReady { polls });
        }
        polls += 1;
        tokio::time::sleep(config.ready_poll_interval).await;
    }

    tracing::debug!("Presentation layer ready after {} polls", polls);
    Ok(())
}
