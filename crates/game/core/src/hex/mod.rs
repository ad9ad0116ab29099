//! Hex coordinates and the tile index.
//!
//! - [`HexCoord`] is the offset cell address used as the key everywhere.
//! - [`HexLayout`] maps between coordinates and world-space positions.
//! - [`HexGrid`] owns the level's tiles and memoized adjacency.

pub mod coord;
pub mod grid;

pub use coord::{HexCoord, HexLayout, WorldPosition};
pub use grid::{GridError, HexGrid, Occupancy, RoomId, TerrainCosts, TerrainKind, Tile};
