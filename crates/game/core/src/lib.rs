//! Deterministic rules for hex tactics combat driven by cards.
//!
//! `tactics-core` holds the hex grid and its searches, card effects, equipment,
//! combat resolution and the turn state machine. It is synchronous and does
//! no I/O; the runtime crate drives it from a single worker. All state
//! mutation flows through [`GameCore`], and supporting crates depend on the
//! types re-exported here.
pub mod card;
pub mod combat;
pub mod config;
pub mod equipment;
pub mod error;
pub mod game;
pub mod hex;
pub mod rng;
pub mod save;
pub mod search;
pub mod turn;
pub mod unit;

pub use card::{CardData, CardEffect, CardId, CardSide, CardZone, Deck, DeckError, EffectCache, EffectKind};
pub use combat::{DamageOutcome, StatusEffects, StatusRider};
pub use config::GameConfig;
pub use equipment::{
    ClassBonus, EquipmentSet, EquipmentSlot, ItemDefinition, ItemId, ItemStats, StatKind,
};
pub use error::{ErrorSeverity, GameError};
pub use game::{GameCore, GameCoreBuilder, SetupError};
pub use hex::{
    GridError, HexCoord, HexGrid, HexLayout, Occupancy, RoomId, TerrainCosts, TerrainKind, Tile,
    WorldPosition,
};
pub use save::SaveData;
pub use search::{RangeResult, compute_path, compute_range, enemies_in_range};
pub use turn::{
    ActionPoints, ArmedAttack, AttackOutcome, EndTurnOutcome, EnemyActionReport, MoveOutcome,
    PlayOutcome, PlayerPhase, TurnError, TurnPhase, TurnStart,
};
pub use unit::{CombatUnit, EnemyProfile, PropId, UnitClass, UnitFlags, UnitId, UnitKind};
