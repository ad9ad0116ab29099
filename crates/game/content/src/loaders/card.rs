//! Card catalog loader.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::CardData;

use crate::loaders::{LoadResult, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardData>,
}

/// Loader for the card catalog from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load every card definition. Fails on duplicate card ids.
    pub fn load(path: &Path) -> LoadResult<Vec<CardData>> {
        let content = read_file(path)?;
        let catalog: CardCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = catalog.cards.iter().find(|card| !seen.insert(card.id)) {
            anyhow::bail!(
                "Duplicate {} in card catalog {}",
                duplicate.id,
                path.display()
            );
        }

        Ok(catalog.cards)
    }
}
