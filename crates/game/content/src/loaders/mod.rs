//! Content loaders for reading game data from files.
//!
//! TOML is used for tunables (`config.toml`); RON for catalogs and levels.

pub mod card;
pub mod config;
pub mod factory;
pub mod item;
pub mod level;

pub use card::CardLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use level::{EnemySpec, LevelDefinition, LevelLoader, PlayerSpec, TileSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
