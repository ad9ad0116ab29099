//! Level loader.
//!
//! A level file describes the terrain, the rooms, what stands where and the
//! deck the player starts with. Every cell inside `dimensions` is a `Default`
//! tile in room 0 unless a `tiles` entry overrides it; entries outside the
//! rectangle add extra cells.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{
    CardId, EnemyProfile, GameConfig, GameCore, GameCoreBuilder, HexCoord, HexGrid, ItemId,
    PropId, RoomId, TerrainKind, Tile, UnitClass,
};

use crate::loaders::{LoadResult, read_file};

/// Terrain override for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub x: i32,
    pub z: i32,
    #[serde(default)]
    pub terrain: TerrainKind,
    #[serde(default)]
    pub room: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    #[serde(default)]
    pub class: UnitClass,
    pub position: (i32, i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub position: (i32, i32),
    pub health: u32,
    #[serde(default)]
    pub profile: EnemyProfile,
}

/// Level data structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Width and height of the default-filled rectangle.
    pub dimensions: (i32, i32),
    #[serde(default)]
    pub tiles: Vec<TileSpec>,
    /// Cells holding a non-unit object.
    #[serde(default)]
    pub props: Vec<(i32, i32)>,
    pub player: PlayerSpec,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    /// Card ids of the starting deck; repeat an id for copies.
    #[serde(default)]
    pub deck: Vec<u32>,
    /// Item ids equipped when no save is restored.
    #[serde(default)]
    pub equipped: Vec<u32>,
    #[serde(default)]
    pub seed: u64,
}

impl LevelDefinition {
    /// Builds the level's tiles with props already placed.
    pub fn build_grid(&self, config: &GameConfig) -> LoadResult<HexGrid> {
        let (width, height) = self.dimensions;
        let mut cells: BTreeMap<HexCoord, Tile> = BTreeMap::new();
        for z in 0..height {
            for x in 0..width {
                let coord = HexCoord::flat(x, z);
                cells.insert(coord, Tile::new(coord, TerrainKind::Default, RoomId(0)));
            }
        }
        for spec in &self.tiles {
            let coord = HexCoord::flat(spec.x, spec.z);
            cells.insert(coord, Tile::new(coord, spec.terrain, RoomId(spec.room)));
        }

        let mut grid = HexGrid::new(config.terrain_costs, config.layout);
        for tile in cells.into_values() {
            grid.insert(tile)?;
        }
        for (index, (x, z)) in self.props.iter().enumerate() {
            grid.place_prop(HexCoord::flat(*x, *z), PropId(index as u32))
                .map_err(|e| anyhow::anyhow!("Failed to place prop at ({x}, {z}): {e}"))?;
        }

        Ok(grid)
    }

    /// Starts a [`GameCore`] builder populated with this level.
    ///
    /// Card and item catalogs still have to be supplied by the caller.
    pub fn builder(&self, config: GameConfig) -> LoadResult<GameCoreBuilder> {
        let grid = self.build_grid(&config)?;
        let (px, pz) = self.player.position;

        let mut builder = GameCore::builder(config)
            .grid(grid)
            .player(self.player.class, HexCoord::flat(px, pz))
            .deck(self.deck.iter().copied().map(CardId))
            .seed(self.seed);
        for enemy in &self.enemies {
            let (x, z) = enemy.position;
            builder = builder.enemy(HexCoord::flat(x, z), enemy.health, enemy.profile);
        }
        for item in &self.equipped {
            builder = builder.equip(ItemId(*item));
        }

        Ok(builder)
    }
}

/// Loader for level files.
pub struct LevelLoader;

impl LevelLoader {
    pub fn load(path: &Path) -> LoadResult<LevelDefinition> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<LevelDefinition> {
        let level: LevelDefinition = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"(
        dimensions: (4, 2),
        tiles: [
            (x: 1, z: 0, terrain: Obstacle),
            (x: 4, z: 1, room: 2),
        ],
        props: [(2, 1)],
        player: (class: Rogue, position: (0, 0)),
        enemies: [(position: (3, 0), health: 6)],
        deck: [1, 1, 2],
    )"#;

    #[test]
    fn parses_level_with_defaults() {
        let level = LevelLoader::parse(LEVEL).unwrap();
        assert_eq!(level.dimensions, (4, 2));
        assert_eq!(level.enemies[0].profile, EnemyProfile::default());
        assert_eq!(level.player.class, UnitClass::Rogue);
        assert!(level.equipped.is_empty());
    }

    #[test]
    fn grid_applies_overrides_and_props() {
        let level = LevelLoader::parse(LEVEL).unwrap();
        let grid = level.build_grid(&GameConfig::default()).unwrap();

        assert_eq!(grid.len(), 9);
        assert!(grid.tile(HexCoord::flat(1, 0)).unwrap().is_obstacle());
        assert_eq!(grid.tile(HexCoord::flat(4, 1)).unwrap().room, RoomId(2));
        assert!(grid.is_blocked(HexCoord::flat(2, 1)));
    }

    #[test]
    fn prop_on_obstacle_is_rejected() {
        let mut level = LevelLoader::parse(LEVEL).unwrap();
        level.props.push((1, 0));
        assert!(level.build_grid(&GameConfig::default()).is_err());
    }
}
