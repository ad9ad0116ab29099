//! Attack targeting: which enemies sit within a hop radius.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::hex::{HexCoord, HexGrid};
use crate::unit::UnitId;

/// Enemies standing within `range` hops of `origin`.
///
/// The walk starts with the origin counted as ring 1 and keeps expanding while
/// the current ring is below `range + 1`, so the deepest ring admitted is at
/// hop distance `range`. Terrain and occupants do not stop the walk; only
/// registered tiles are traversed. The origin tile itself is never reported.
///
/// `is_active` filters out enemies that may not be targeted (dead, or still
/// asleep in an unvisited room).
pub fn enemies_in_range(
    grid: &HexGrid,
    origin: HexCoord,
    range: u32,
    is_active: impl Fn(UnitId) -> bool,
) -> HashSet<UnitId> {
    let mut found = HashSet::new();
    if grid.tile(origin).is_none() {
        return found;
    }

    let mut rings: HashMap<HexCoord, u32> = HashMap::from([(origin, 1)]);
    let mut frontier = VecDeque::from([origin]);

    while let Some(current) = frontier.pop_front() {
        let ring = rings[&current];
        if ring >= range + 1 {
            continue;
        }

        for neighbor in grid.neighbors_of(current) {
            if rings.contains_key(&neighbor) {
                continue;
            }
            rings.insert(neighbor, ring + 1);
            frontier.push_back(neighbor);

            if let Some(enemy) = grid.tile(neighbor).and_then(|tile| tile.occupancy.enemy)
                && is_active(enemy)
            {
                found.insert(enemy);
            }
        }
    }

    found
}
