//! Content factory for assembling a ready game from data files.

use std::path::{Path, PathBuf};

use tactics_core::{CardData, GameConfig, GameCore, ItemDefinition, SaveData};

use crate::loaders::{
    CardLoader, ConfigLoader, ItemLoader, LevelDefinition, LevelLoader, LoadResult,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// ├── items.ron
/// └── levels/
///     ├── crypt.ron
///     └── ...
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load card catalog from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<Vec<CardData>> {
        let path = self.data_dir.join("cards.ron");
        CardLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load a level from `levels/{level_name}.ron`.
    pub fn load_level(&self, level_name: &str) -> LoadResult<LevelDefinition> {
        let path = self
            .data_dir
            .join("levels")
            .join(format!("{}.ron", level_name));
        LevelLoader::load(&path)
    }

    /// Builds a ready [`GameCore`] for `level_name`, restoring `save` if given.
    pub fn build_game(&self, level_name: &str, save: Option<SaveData>) -> LoadResult<GameCore> {
        let config = self.load_config()?;
        let level = self.load_level(level_name)?;

        let mut builder = level
            .builder(config)?
            .cards(self.load_cards()?)
            .items(self.load_items()?);
        if let Some(save) = save {
            builder = builder.restore(save);
        }

        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to set up level {}: {}", level_name, e))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
