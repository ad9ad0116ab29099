//! Boundary to whatever renders the game.
//!
//! The turn worker pushes display state through [`Presentation`] and awaits
//! [`Presentation::move_through_path`] before it treats a move as resolved.
//! It never reads anything back except [`Presentation::is_ready`].
use async_trait::async_trait;
use tactics_core::{HexCoord, UnitId, WorldPosition};

#[async_trait]
pub trait Presentation: Send + Sync {
    /// Polled at startup until it reports `true` or the poll budget runs out.
    fn is_ready(&self) -> bool {
        true
    }

    /// Tweens `unit` through `path` and resolves once the movement finished.
    async fn move_through_path(&self, unit: UnitId, path: &[WorldPosition]);

    fn enable_highlight(&self, _tile: HexCoord) {}

    fn disable_highlight(&self, _tile: HexCoord) {}

    fn update_movement_points(&self, _points: u32) {}

    fn update_attack_info(&self, _damage: u32, _range: u32) {}

    fn clear_attack_info(&self) {}

    fn show_game_over(&self) {}
}

/// Headless presentation: always ready, movement resolves immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresentation;

#[async_trait]
impl Presentation for NullPresentation {
    async fn move_through_path(&self, _unit: UnitId, _path: &[WorldPosition]) {}
}
