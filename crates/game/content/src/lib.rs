//! Data-driven content definitions and loaders.
//!
//! This crate turns data files into ready-to-play rules state:
//! - Game configuration (TOML)
//! - Card and item catalogs (RON)
//! - Levels: terrain, rooms, props, units and the starting deck (RON)
//!
//! All loaders deserialize tactics-core types directly through its `serde`
//! feature.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CardLoader, ConfigLoader, ContentFactory, EnemySpec, ItemLoader, LevelDefinition, LevelLoader,
    LoadResult, PlayerSpec, TileSpec,
};
