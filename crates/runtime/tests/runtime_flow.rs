use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tactics_content::ContentFactory;
use tactics_core::{
    CardData, CardEffect, CardId, CardSide, EffectKind, EnemyProfile, GameConfig, GameCore,
    HexCoord, HexGrid, HexLayout, PlayerPhase, RoomId, SaveData, TerrainCosts, TerrainKind, Tile,
    TurnError, TurnPhase, UnitClass, UnitId, WorldPosition,
};
use tactics_runtime::{
    Event, FileSaveRepository, InMemorySaveRepository, Presentation, Runtime, RuntimeConfig,
    RuntimeError, SaveRepository, Topic, TurnEvent,
};
use tempfile::TempDir;
use tokio::time::Instant;

const STRIKE: CardId = CardId(1);
const GUARD: CardId = CardId(2);
const DASH: CardId = CardId(3);

const ENEMY_DELAY: Duration = Duration::from_millis(500);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn corridor(width: i32) -> HexGrid {
    let mut grid = HexGrid::new(TerrainCosts::DEFAULT, HexLayout::DEFAULT);
    for x in 0..width {
        grid.insert(Tile::new(HexCoord::flat(x, 0), TerrainKind::Default, RoomId(0)))
            .unwrap();
    }
    grid
}

fn catalog() -> Vec<CardData> {
    vec![
        CardData::new(STRIKE, "Strike").with_left([CardEffect::attack(4, 1)]),
        CardData::new(GUARD, "Guard").with_left([CardEffect::new(EffectKind::Block, 2)]),
        CardData::new(DASH, "Dash").with_left([CardEffect::new(EffectKind::Move, 2)]),
    ]
}

/// Player at the west end of a corridor with enemies at `enemies`.
fn core_with(width: i32, enemies: &[i32], deck: &[CardId]) -> GameCore {
    let mut builder = GameCore::builder(GameConfig::default().with_initial_hand_size(deck.len() as u32))
        .grid(corridor(width))
        .player(UnitClass::Warrior, HexCoord::flat(0, 0))
        .cards(catalog())
        .deck(deck.iter().copied());
    for x in enemies {
        builder = builder.enemy(HexCoord::flat(*x, 0), 10, EnemyProfile::default());
    }
    builder.build().unwrap()
}

fn config() -> RuntimeConfig {
    RuntimeConfig {
        enemy_delay: ENEMY_DELAY,
        ready_poll_interval: Duration::from_millis(10),
        max_ready_polls: 5,
        ..RuntimeConfig::default()
    }
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[derive(Default)]
struct RecordingPresentation {
    moves: Mutex<Vec<(UnitId, usize)>>,
    highlights: Mutex<Vec<(HexCoord, bool)>>,
    attack_info: Mutex<Option<(u32, u32)>>,
    movement_points: Mutex<Vec<u32>>,
}

#[async_trait]
impl Presentation for RecordingPresentation {
    async fn move_through_path(&self, unit: UnitId, path: &[WorldPosition]) {
        self.moves.lock().unwrap().push((unit, path.len()));
    }

    fn enable_highlight(&self, tile: HexCoord) {
        self.highlights.lock().unwrap().push((tile, true));
    }

    fn disable_highlight(&self, tile: HexCoord) {
        self.highlights.lock().unwrap().push((tile, false));
    }

    fn update_movement_points(&self, points: u32) {
        self.movement_points.lock().unwrap().push(points);
    }

    fn update_attack_info(&self, damage: u32, range: u32) {
        *self.attack_info.lock().unwrap() = Some((damage, range));
    }

    fn clear_attack_info(&self) {
        *self.attack_info.lock().unwrap() = None;
    }
}

/// Every movement tween takes ten seconds.
#[derive(Default)]
struct SlowPresentation {
    game_over_shown: AtomicBool,
}

#[async_trait]
impl Presentation for SlowPresentation {
    async fn move_through_path(&self, _unit: UnitId, _path: &[WorldPosition]) {
        tokio::time::sleep(Duration::from_secs(10)).await;
    }

    fn show_game_over(&self) {
        self.game_over_shown.store(true, Ordering::SeqCst);
    }
}

/// Reports ready from the `ready_after`-th poll on.
struct LatePresentation {
    polls: AtomicU32,
    ready_after: u32,
}

#[async_trait]
impl Presentation for LatePresentation {
    fn is_ready(&self) -> bool {
        self.polls.fetch_add(1, Ordering::SeqCst) >= self.ready_after
    }

    async fn move_through_path(&self, _unit: UnitId, _path: &[WorldPosition]) {}
}

#[tokio::test(start_paused = true)]
async fn enemies_act_in_registration_order_with_delay_after_each() {
    init_tracing();
    let runtime = Runtime::builder()
        .config(config())
        .core(core_with(8, &[7, 4, 6], &[GUARD]))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);

    handle.play_card(GUARD, CardSide::Left).await.unwrap();

    let started = Instant::now();
    let report = handle.end_turn().await.unwrap();
    let elapsed = started.elapsed();

    let acted: Vec<UnitId> = report.actions.iter().map(|action| action.enemy).collect();
    assert_eq!(acted, vec![UnitId(1), UnitId(2), UnitId(3)]);
    assert!(elapsed >= ENEMY_DELAY * 3, "elapsed {elapsed:?}");
    assert!(elapsed < ENEMY_DELAY * 4, "elapsed {elapsed:?}");

    let next = report.next_turn.unwrap();
    assert_eq!(next.turn, 2);
    assert_eq!(next.action_points, 3);

    let events = drain(&mut turn_rx);
    assert_eq!(
        events,
        vec![
            Event::Turn(TurnEvent::PhaseChanged {
                from: TurnPhase::START,
                to: TurnPhase::EnemyTurn,
            }),
            Event::Turn(TurnEvent::EnemyTurnStarted {
                order: vec![UnitId(1), UnitId(2), UnitId(3)],
            }),
            Event::Turn(TurnEvent::ShieldsDecayed {
                units: vec![(UnitId::PLAYER, 2)],
            }),
            Event::Turn(TurnEvent::TurnStarted(next)),
            Event::Turn(TurnEvent::PhaseChanged {
                from: TurnPhase::EnemyTurn,
                to: TurnPhase::START,
            }),
        ]
    );
    assert_eq!(handle.status().await.unwrap().player_shield, 0);
}

#[tokio::test(start_paused = true)]
async fn rejected_transition_changes_nothing() {
    let runtime = Runtime::builder()
        .core(core_with(4, &[3], &[GUARD]))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let before = handle.status().await.unwrap();

    let error = handle.click_enemy(UnitId(1)).await.unwrap_err();
    assert_eq!(error.rejection(), Some(&TurnError::NoAttackArmed));

    let error = handle.play_card(STRIKE, CardSide::Left).await.unwrap_err();
    assert_eq!(error.rejection(), Some(&TurnError::CardNotInHand(STRIKE)));

    assert_eq!(handle.status().await.unwrap(), before);
}

#[tokio::test(start_paused = true)]
async fn armed_attack_drives_highlights_and_attack_info() {
    let presentation = Arc::new(RecordingPresentation::default());
    let runtime = Runtime::builder()
        .core(core_with(4, &[1], &[STRIKE]))
        .presentation(presentation.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let played = handle.play_card(STRIKE, CardSide::Left).await.unwrap();
    assert_eq!(played.highlighted, vec![UnitId(1)]);
    assert_eq!(*presentation.attack_info.lock().unwrap(), Some((4, 1)));
    assert_eq!(
        handle.status().await.unwrap().phase,
        TurnPhase::PlayerTurn(PlayerPhase::AwaitingAttackResolution)
    );

    let hit = handle.click_enemy(UnitId(1)).await.unwrap();
    assert_eq!(hit.damage.dealt, 4);
    assert_eq!(*presentation.attack_info.lock().unwrap(), None);
    assert_eq!(
        *presentation.highlights.lock().unwrap(),
        vec![(HexCoord::flat(1, 0), true), (HexCoord::flat(1, 0), false)]
    );

    let status = handle.status().await.unwrap();
    assert_eq!(status.phase, TurnPhase::START);
    assert_eq!(status.enemies, vec![(UnitId(1), 6)]);
}

#[tokio::test(start_paused = true)]
async fn move_waits_for_the_tween_and_updates_movement_points() {
    let presentation = Arc::new(RecordingPresentation::default());
    let runtime = Runtime::builder()
        .core(core_with(6, &[], &[DASH]))
        .presentation(presentation.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.play_card(DASH, CardSide::Left).await.unwrap();
    let moved = handle.move_player(HexCoord::flat(2, 0)).await.unwrap();

    assert_eq!(moved.path, vec![HexCoord::flat(1, 0), HexCoord::flat(2, 0)]);
    assert_eq!(*presentation.moves.lock().unwrap(), vec![(UnitId::PLAYER, 2)]);
    assert_eq!(*presentation.movement_points.lock().unwrap(), vec![2, 0]);
    assert_eq!(
        handle.status().await.unwrap().player_position,
        HexCoord::flat(2, 0)
    );
}

#[tokio::test(start_paused = true)]
async fn player_death_cancels_the_enemy_turn_in_flight() {
    let presentation = Arc::new(SlowPresentation::default());
    let runtime = Runtime::builder()
        .config(config())
        .core(core_with(8, &[4, 7], &[GUARD]))
        .presentation(presentation.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let started = Instant::now();

    let enemy_turn = tokio::spawn({
        let handle = handle.clone();
        async move { handle.end_turn().await }
    });
    tokio::time::sleep(Duration::from_secs(1)).await;
    handle.player_death().await.unwrap();

    let report = enemy_turn.await.unwrap().unwrap();
    assert!(report.ended_run());
    assert_eq!(report.actions.len(), 1);
    assert!(started.elapsed() < Duration::from_secs(10));

    assert!(handle.is_game_over());
    assert!(presentation.game_over_shown.load(Ordering::SeqCst));
    assert_eq!(handle.status().await.unwrap().phase, TurnPhase::GameOver);
    let error = handle.play_card(GUARD, CardSide::Left).await.unwrap_err();
    assert_eq!(error.rejection(), Some(&TurnError::GameOver));
}

#[tokio::test(start_paused = true)]
async fn end_turn_persists_the_snapshot() {
    let saves = Arc::new(InMemorySaveRepository::new());
    let runtime = Runtime::builder()
        .config(config())
        .core(core_with(4, &[], &[GUARD]))
        .saves(saves.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let expected = handle.snapshot().await.unwrap();
    assert!(!saves.exists());

    handle.end_turn().await.unwrap();
    assert_eq!(saves.load().unwrap(), Some(expected));
}

#[tokio::test(start_paused = true)]
async fn readiness_is_polled_until_the_presentation_reports_ready() {
    let presentation = Arc::new(LatePresentation {
        polls: AtomicU32::new(0),
        ready_after: 3,
    });
    let runtime = Runtime::builder()
        .config(config())
        .core(core_with(3, &[], &[GUARD]))
        .presentation(presentation.clone())
        .build()
        .await;
    assert!(runtime.is_ok());
    assert_eq!(presentation.polls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn readiness_gives_up_after_the_poll_budget() {
    let presentation = Arc::new(LatePresentation {
        polls: AtomicU32::new(0),
        ready_after: u32::MAX,
    });
    let result = Runtime::builder()
        .config(config())
        .core(core_with(3, &[], &[GUARD]))
        .presentation(presentation)
        .build()
        .await;
    assert!(matches!(result, Err(RuntimeError::NotReady { polls: 5 })));
}

#[tokio::test(start_paused = true)]
async fn level_setup_restores_the_saved_progress() {
    let dir = TempDir::new().unwrap();
    let saves = Arc::new(FileSaveRepository::new(dir.path()).unwrap());
    saves
        .save(&SaveData {
            current_health: 9,
            ..SaveData::default()
        })
        .unwrap();

    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let runtime = Runtime::builder()
        .saves(saves)
        .level(&ContentFactory::new(data), "crypt")
        .unwrap()
        .build()
        .await
        .unwrap();

    let status = runtime.handle().status().await.unwrap();
    assert_eq!(status.player_health, 9);
    assert_eq!(status.hand.len(), 5);
}

#[test]
fn missing_core_is_reported() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let result = runtime.block_on(Runtime::builder().build());
    assert!(matches!(result, Err(RuntimeError::MissingCore)));
}
