//! Repository contract for the save snapshot.

use tactics_core::SaveData;

use super::Result;

/// Stores the single current save of a run.
///
/// Each `save` replaces the previous snapshot; there is no history.
pub trait SaveRepository: Send + Sync {
    fn save(&self, data: &SaveData) -> Result<()>;

    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SaveData>>;

    fn exists(&self) -> bool;

    /// Removes the save, e.g. when a run ends. Removing nothing is fine.
    fn clear(&self) -> Result<()>;
}
