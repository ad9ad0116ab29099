//! In-memory SaveRepository implementation for tests and local runs.

use std::sync::RwLock;

use tactics_core::SaveData;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// In-memory implementation of SaveRepository.
pub struct InMemorySaveRepository {
    save: RwLock<Option<SaveData>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            save: RwLock::new(None),
        }
    }

    /// Create with an existing save, as if a previous run had written it.
    pub fn with_save(save: SaveData) -> Self {
        Self {
            save: RwLock::new(Some(save)),
        }
    }
}

impl Default for InMemorySaveRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, data: &SaveData) -> Result<()> {
        let mut save = self
            .save
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *save = Some(data.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveData>> {
        let save = self
            .save
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(save.clone())
    }

    fn exists(&self) -> bool {
        self.save
            .read()
            .map(|save| save.is_some())
            .unwrap_or(false)
    }

    fn clear(&self) -> Result<()> {
        let mut save = self
            .save
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *save = None;
        Ok(())
    }
}
