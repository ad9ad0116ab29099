//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tactics_core::SaveData;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// File-based implementation of SaveRepository.
///
/// The snapshot lives in `save.json` under the base directory. Writes go to a
/// temp file first and are renamed into place.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    const FILE_NAME: &'static str = "save.json";

    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(Self::FILE_NAME)
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, data: &SaveData) -> Result<()> {
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec_pretty(data).map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved progress to {}", path.display());

        Ok(())
    }

    fn load(&self) -> Result<Option<SaveData>> {
        let path = self.path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let data: SaveData =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!("Loaded progress from {}", path.display());

        Ok(Some(data))
    }

    fn exists(&self) -> bool {
        self.path().exists()
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted save at {}", path.display());
        }

        Ok(())
    }
}
