//! Repository layer for the player's persistent progress.
//!
//! The turn worker writes a [`tactics_core::SaveData`] snapshot at the end of
//! every player turn; level setup reads it back. Static content (cards, items,
//! levels) is loaded by `tactics-content`, not by repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
