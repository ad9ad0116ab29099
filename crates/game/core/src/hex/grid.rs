//! Grid index: tiles keyed by coordinate plus memoized adjacency.

use std::cell::RefCell;
use std::collections::HashMap;

use arrayvec::ArrayVec;

use super::{HexCoord, HexLayout, WorldPosition};
use crate::unit::{PropId, UnitId};

/// Room a tile belongs to. Enemies placed in a room wake up when the player
/// first steps onto any tile of that room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomId(pub u16);

/// Terrain class of a tile; drives traversal cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Default,
    Difficult,
    Road,
    Obstacle,
    Water,
}

/// Movement cost per terrain class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCosts {
    pub default: u32,
    pub difficult: u32,
    pub road: u32,
    pub water: u32,
}

impl TerrainCosts {
    pub const DEFAULT: Self = Self {
        default: 1,
        difficult: 2,
        road: 1,
        water: 2,
    };

    /// Cost of entering a tile of this terrain. Obstacles are never entered,
    /// so they have no cost.
    pub fn cost_of(&self, terrain: TerrainKind) -> Option<u32> {
        match terrain {
            TerrainKind::Default => Some(self.default),
            TerrainKind::Difficult => Some(self.difficult),
            TerrainKind::Road => Some(self.road),
            TerrainKind::Water => Some(self.water),
            TerrainKind::Obstacle => None,
        }
    }
}

impl Default for TerrainCosts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What currently stands on a tile. Each slot holds at most one occupant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    pub unit: Option<UnitId>,
    pub enemy: Option<UnitId>,
    pub prop: Option<PropId>,
}

impl Occupancy {
    pub fn is_empty(&self) -> bool {
        self.unit.is_none() && self.enemy.is_none() && self.prop.is_none()
    }
}

/// A single grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub coord: HexCoord,
    pub terrain: TerrainKind,
    pub occupancy: Occupancy,
    pub room: RoomId,
}

impl Tile {
    pub fn new(coord: HexCoord, terrain: TerrainKind, room: RoomId) -> Self {
        Self {
            coord,
            terrain,
            occupancy: Occupancy::default(),
            room,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        self.terrain == TerrainKind::Obstacle
    }

    /// Blocked for both movement and path search: obstacle terrain or any
    /// occupant.
    pub fn is_blocked(&self) -> bool {
        self.is_obstacle() || !self.occupancy.is_empty()
    }
}

/// Errors raised while placing things on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("no tile registered at {0}")]
    MissingTile(HexCoord),

    #[error("tile {0} is blocked")]
    Blocked(HexCoord),

    #[error("tile {0} is already registered")]
    DuplicateTile(HexCoord),
}

impl crate::error::GameError for GridError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        match self {
            Self::MissingTile(_) | Self::DuplicateTile(_) => crate::error::ErrorSeverity::Validation,
            Self::Blocked(_) => crate::error::ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTile(_) => "GRID_MISSING_TILE",
            Self::Blocked(_) => "GRID_BLOCKED",
            Self::DuplicateTile(_) => "GRID_DUPLICATE_TILE",
        }
    }
}

type Neighbors = ArrayVec<HexCoord, { crate::config::GameConfig::HEX_DIRECTIONS }>;

/// Finite hex grid owning every tile of the level.
///
/// Neighbor lists are resolved lazily and memoized per coordinate. Only
/// registered tiles appear as neighbors, so the grid never wraps.
#[derive(Clone, Debug, Default)]
pub struct HexGrid {
    tiles: HashMap<HexCoord, Tile>,
    neighbors: RefCell<HashMap<HexCoord, Neighbors>>,
    costs: TerrainCosts,
    layout: HexLayout,
}

impl HexGrid {
    pub fn new(costs: TerrainCosts, layout: HexLayout) -> Self {
        Self {
            tiles: HashMap::new(),
            neighbors: RefCell::new(HashMap::new()),
            costs,
            layout,
        }
    }

    /// Registers a tile. Tiles are created once at level load.
    pub fn insert(&mut self, tile: Tile) -> Result<(), GridError> {
        if self.tiles.contains_key(&tile.coord) {
            return Err(GridError::DuplicateTile(tile.coord));
        }
        self.tiles.insert(tile.coord, tile);
        // A new tile may extend any memoized list around it.
        self.neighbors.get_mut().clear();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn costs(&self) -> &TerrainCosts {
        &self.costs
    }

    pub fn coordinate_of(&self, position: WorldPosition) -> HexCoord {
        self.layout.coordinate_of(position)
    }

    pub fn world_of(&self, coord: HexCoord) -> WorldPosition {
        self.layout.world_of(coord)
    }

    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Movement cost of entering `coord`, or `None` for obstacles and
    /// unknown cells.
    pub fn cost(&self, coord: HexCoord) -> Option<u32> {
        self.tile(coord)
            .and_then(|tile| self.costs.cost_of(tile.terrain))
    }

    pub fn is_blocked(&self, coord: HexCoord) -> bool {
        self.tile(coord).is_none_or(Tile::is_blocked)
    }

    /// Registered neighbors of `coord` in direction-table order.
    pub fn neighbors_of(&self, coord: HexCoord) -> Neighbors {
        if let Some(cached) = self.neighbors.borrow().get(&coord) {
            return cached.clone();
        }

        let resolved: Neighbors = coord
            .neighbor_candidates()
            .into_iter()
            .filter(|candidate| self.tiles.contains_key(candidate))
            .collect();
        self.neighbors
            .borrow_mut()
            .insert(coord, resolved.clone());
        resolved
    }

    /// Places a friendly unit on an empty, non-obstacle tile.
    pub fn place_unit(&mut self, coord: HexCoord, unit: UnitId) -> Result<(), GridError> {
        let tile = self.open_tile_mut(coord)?;
        tile.occupancy.unit = Some(unit);
        Ok(())
    }

    /// Places an enemy on an empty, non-obstacle tile.
    pub fn place_enemy(&mut self, coord: HexCoord, enemy: UnitId) -> Result<(), GridError> {
        let tile = self.open_tile_mut(coord)?;
        tile.occupancy.enemy = Some(enemy);
        Ok(())
    }

    /// Places a non-unit object on an empty, non-obstacle tile.
    pub fn place_prop(&mut self, coord: HexCoord, prop: PropId) -> Result<(), GridError> {
        let tile = self.open_tile_mut(coord)?;
        tile.occupancy.prop = Some(prop);
        Ok(())
    }

    /// Clears whichever unit slot holds `unit` on `coord`.
    pub fn vacate(&mut self, coord: HexCoord, unit: UnitId) {
        if let Some(tile) = self.tiles.get_mut(&coord) {
            if tile.occupancy.unit == Some(unit) {
                tile.occupancy.unit = None;
            }
            if tile.occupancy.enemy == Some(unit) {
                tile.occupancy.enemy = None;
            }
        }
    }

    fn open_tile_mut(&mut self, coord: HexCoord) -> Result<&mut Tile, GridError> {
        let tile = self
            .tiles
            .get_mut(&coord)
            .ok_or(GridError::MissingTile(coord))?;
        if tile.is_blocked() {
            return Err(GridError::Blocked(coord));
        }
        Ok(tile)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Rectangular grid of `Default` tiles, all in room 0.
    pub(crate) fn open_grid(width: i32, height: i32) -> HexGrid {
        let mut grid = HexGrid::new(TerrainCosts::DEFAULT, HexLayout::DEFAULT);
        for z in 0..height {
            for x in 0..width {
                let coord = HexCoord::flat(x, z);
                grid.insert(Tile::new(coord, TerrainKind::Default, RoomId(0)))
                    .unwrap();
            }
        }
        grid
    }

    #[test]
    fn neighbors_stop_at_grid_edge() {
        let grid = open_grid(3, 3);
        assert_eq!(grid.neighbors_of(HexCoord::flat(1, 1)).len(), 6);
        assert!(grid.neighbors_of(HexCoord::flat(0, 0)).len() < 6);
        assert!(
            grid.neighbors_of(HexCoord::flat(0, 0))
                .iter()
                .all(|coord| grid.tile(*coord).is_some())
        );
    }

    #[test]
    fn neighbor_lists_are_memoized() {
        let grid = open_grid(3, 3);
        let first = grid.neighbors_of(HexCoord::flat(1, 1));
        assert!(grid.neighbors.borrow().contains_key(&HexCoord::flat(1, 1)));
        assert_eq!(grid.neighbors_of(HexCoord::flat(1, 1)), first);
    }

    #[test]
    fn missing_tile_lookup_returns_none() {
        let grid = open_grid(2, 2);
        assert!(grid.tile(HexCoord::flat(5, 5)).is_none());
        assert!(grid.is_blocked(HexCoord::flat(5, 5)));
    }

    #[test]
    fn occupancy_blocks_tile() {
        let mut grid = open_grid(2, 2);
        let coord = HexCoord::flat(1, 0);
        grid.place_enemy(coord, UnitId(7)).unwrap();
        assert!(grid.is_blocked(coord));
        assert_eq!(grid.place_unit(coord, UnitId(1)), Err(GridError::Blocked(coord)));

        grid.vacate(coord, UnitId(7));
        assert!(!grid.is_blocked(coord));
    }

    #[test]
    fn obstacles_have_no_cost() {
        let mut grid = HexGrid::default();
        let coord = HexCoord::flat(0, 0);
        grid.insert(Tile::new(coord, TerrainKind::Obstacle, RoomId(0)))
            .unwrap();
        assert_eq!(grid.cost(coord), None);
        assert!(grid.is_blocked(coord));
    }

    #[test]
    fn duplicate_tiles_are_rejected() {
        let mut grid = open_grid(1, 1);
        let result = grid.insert(Tile::new(HexCoord::ORIGIN, TerrainKind::Road, RoomId(0)));
        assert_eq!(result, Err(GridError::DuplicateTile(HexCoord::ORIGIN)));
    }
}
