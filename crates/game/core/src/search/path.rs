//! Unit-cost path search used by enemy movement.

use std::collections::{HashMap, VecDeque};

use crate::hex::{HexCoord, HexGrid};

/// Breadth-first path from `origin` toward `goal` with every step costing 1.
///
/// The search stops as soon as `goal` is dequeued. Blocked tiles are never
/// entered, which includes a goal tile that is itself occupied.
///
/// When the goal is never reached the path leads to the visited cell closest
/// to the goal by hex distance instead (first one visited on ties). Callers
/// therefore receive "as close as possible" rather than a failure. This
/// substitution is kept for compatibility with existing enemy behavior and may
/// be surprising for other uses.
///
/// Returns `None` when `origin` has no tile. The returned path excludes the
/// origin and may be empty when no visited cell is closer than the origin.
pub fn compute_path(grid: &HexGrid, origin: HexCoord, goal: HexCoord) -> Option<Vec<HexCoord>> {
    grid.tile(origin)?;

    let mut predecessors: HashMap<HexCoord, Option<HexCoord>> = HashMap::from([(origin, None)]);
    let mut visit_order = vec![origin];
    let mut frontier = VecDeque::from([origin]);
    let mut reached_goal = false;

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            reached_goal = true;
            break;
        }

        for neighbor in grid.neighbors_of(current) {
            if predecessors.contains_key(&neighbor) || grid.is_blocked(neighbor) {
                continue;
            }
            predecessors.insert(neighbor, Some(current));
            visit_order.push(neighbor);
            frontier.push_back(neighbor);
        }
    }

    let target = if reached_goal {
        goal
    } else {
        visit_order
            .iter()
            .copied()
            .min_by_key(|coord| coord.distance(goal))
            .unwrap_or(origin)
    };

    let mut path = Vec::new();
    let mut current = target;
    while let Some(Some(previous)) = predecessors.get(&current) {
        path.push(current);
        current = *previous;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::grid::tests::open_grid;
    use crate::hex::TerrainKind;
    use crate::unit::UnitId;

    #[test]
    fn finds_shortest_path_to_open_goal() {
        let grid = open_grid(5, 5);
        let origin = HexCoord::flat(0, 0);
        let goal = HexCoord::flat(4, 0);

        let path = compute_path(&grid, origin, goal).unwrap();
        assert_eq!(path.len() as u32, origin.distance(goal));
        assert_eq!(path.last(), Some(&goal));
    }

    #[test]
    fn occupied_goal_falls_back_to_adjacent_cell() {
        let mut grid = open_grid(5, 1);
        let goal = HexCoord::flat(4, 0);
        grid.place_unit(goal, UnitId::PLAYER).unwrap();

        let path = compute_path(&grid, HexCoord::flat(0, 0), goal).unwrap();
        assert_eq!(path.last(), Some(&HexCoord::flat(3, 0)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn walled_off_goal_returns_closest_visited() {
        let mut grid = open_grid(5, 1);
        grid.tile_mut(HexCoord::flat(2, 0)).unwrap().terrain = TerrainKind::Obstacle;

        let path = compute_path(&grid, HexCoord::flat(0, 0), HexCoord::flat(4, 0)).unwrap();
        assert_eq!(path, vec![HexCoord::flat(1, 0)]);
    }

    #[test]
    fn already_adjacent_returns_empty_path() {
        let mut grid = open_grid(2, 1);
        grid.place_unit(HexCoord::flat(1, 0), UnitId::PLAYER).unwrap();

        let path = compute_path(&grid, HexCoord::flat(0, 0), HexCoord::flat(1, 0)).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn missing_origin_returns_none() {
        let grid = open_grid(2, 2);
        assert_eq!(compute_path(&grid, HexCoord::flat(8, 8), HexCoord::ORIGIN), None);
    }
}
