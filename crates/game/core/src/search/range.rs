//! Movement range under a point budget.

use std::collections::{HashMap, VecDeque};

use crate::hex::{HexCoord, HexGrid};

/// Output of one [`compute_range`] run.
///
/// Maps every reached coordinate to its predecessor on the cheapest route
/// found. The origin is stored with no predecessor so paths can be rebuilt,
/// but it is not part of [`RangeResult::reachable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeResult {
    origin: HexCoord,
    budget: u32,
    predecessors: HashMap<HexCoord, Option<HexCoord>>,
    costs: HashMap<HexCoord, u32>,
}

impl RangeResult {
    pub fn origin(&self) -> HexCoord {
        self.origin
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// True for any reached coordinate other than the origin.
    pub fn contains(&self, coord: HexCoord) -> bool {
        coord != self.origin && self.predecessors.contains_key(&coord)
    }

    /// Reached coordinates, origin excluded. Order is unspecified.
    pub fn reachable(&self) -> impl Iterator<Item = HexCoord> + '_ {
        let origin = self.origin;
        self.predecessors
            .keys()
            .copied()
            .filter(move |coord| *coord != origin)
    }

    pub fn len(&self) -> usize {
        self.predecessors.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cheapest cumulative cost found for `coord`.
    pub fn cost_to(&self, coord: HexCoord) -> Option<u32> {
        self.costs.get(&coord).copied()
    }

    /// Path from the cell after the origin up to `destination`.
    ///
    /// Empty when `destination` was not reached (or is the origin).
    pub fn path_to(&self, destination: HexCoord) -> Vec<HexCoord> {
        if !self.contains(destination) {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = destination;
        while let Some(Some(previous)) = self.predecessors.get(&current) {
            path.push(current);
            current = *previous;
        }
        path.reverse();
        path
    }
}

/// Computes every cell reachable from `origin` whose cheapest route costs at
/// most `budget`.
///
/// Cells are expanded in FIFO order. A cell is admitted the first time any
/// route within budget reaches it; when a strictly cheaper route shows up
/// later its cost and predecessor are replaced and it is queued again so the
/// saving propagates. Equal-cost routes keep the first predecessor found.
/// Obstacles and occupied tiles are never entered. An origin with no tile
/// yields an empty result.
pub fn compute_range(grid: &HexGrid, origin: HexCoord, budget: u32) -> RangeResult {
    let mut result = RangeResult {
        origin,
        budget,
        predecessors: HashMap::new(),
        costs: HashMap::new(),
    };
    if grid.tile(origin).is_none() {
        return result;
    }

    result.predecessors.insert(origin, None);
    result.costs.insert(origin, 0);

    let mut frontier = VecDeque::from([origin]);
    while let Some(current) = frontier.pop_front() {
        let current_cost = result.costs[&current];

        for neighbor in grid.neighbors_of(current) {
            if grid.is_blocked(neighbor) {
                continue;
            }
            let Some(step) = grid.cost(neighbor) else {
                continue;
            };
            let new_cost = current_cost + step;
            if new_cost > budget {
                continue;
            }

            match result.costs.get(&neighbor) {
                None => {
                    result.predecessors.insert(neighbor, Some(current));
                    result.costs.insert(neighbor, new_cost);
                    frontier.push_back(neighbor);
                }
                Some(&known) if new_cost < known => {
                    result.predecessors.insert(neighbor, Some(current));
                    result.costs.insert(neighbor, new_cost);
                    frontier.push_back(neighbor);
                }
                Some(_) => {}
            }
        }
    }

    result
}
