//! Reachability probing over the unit-occupancy grid.
//!
//! The engine only ever asks one question of a pathfinder: can this
//! unit reach that cell? Repositioning uses it to validate a candidate
//! parking cell before committing to a move. Hosts with a real motion
//! planner can supply their own implementation through the
//! [`Pathfinder`] trait.

use std::collections::VecDeque;

use crate::snapshot::{GridPos, WorldSnapshot};

/// Reachability oracle consumed by repositioning.
pub trait Pathfinder {
    /// True if a unit standing at `from` can reach `to`.
    fn reachable(&self, from: GridPos, to: GridPos, snapshot: &WorldSnapshot) -> bool;
}

/// Direction offsets for 4-directional movement.
///
/// Fixed order keeps the search deterministic.
const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // East
    (0, 1),  // South
    (-1, 0), // West
    (0, -1), // North
];

/// Breadth-first reachability over the snapshot's occupancy grid.
///
/// Cells holding any unit other than the probing one are blocked.
/// A probe is at worst linear in the number of cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPathfinder;

impl GridPathfinder {
    /// Create a new grid pathfinder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Pathfinder for GridPathfinder {
    fn reachable(&self, from: GridPos, to: GridPos, snapshot: &WorldSnapshot) -> bool {
        if !snapshot.in_bounds(from) || !snapshot.in_bounds(to) {
            return false;
        }
        if from == to {
            return true;
        }
        // The destination itself must be free to park on.
        if snapshot.occupied(to) {
            return false;
        }

        let width = snapshot.width as usize;
        let index = |p: GridPos| (p.y as usize) * width + (p.x as usize);

        let mut blocked = vec![false; width * snapshot.height as usize];
        for unit in snapshot.units() {
            if snapshot.in_bounds(unit.pos) && unit.pos != from {
                blocked[index(unit.pos)] = true;
            }
        }

        let mut visited = vec![false; blocked.len()];
        let mut queue = VecDeque::new();
        visited[index(from)] = true;
        queue.push_back(from);

        while let Some(cell) = queue.pop_front() {
            for &(dx, dy) in &DIRECTIONS {
                let next = GridPos::new(cell.x + dx, cell.y + dy);
                if !snapshot.in_bounds(next) {
                    continue;
                }
                let i = index(next);
                if visited[i] || blocked[i] {
                    continue;
                }
                if next == to {
                    return true;
                }
                visited[i] = true;
                queue.push_back(next);
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitTypeId;
    use crate::snapshot::{Owner, PlayerId, Unit};

    fn blocker(id: u64, x: i32, y: i32) -> Unit {
        Unit::new(
            id,
            UnitTypeId::new(0),
            Owner::Player(PlayerId(1)),
            GridPos::new(x, y),
        )
    }

    #[test]
    fn test_open_grid_is_reachable() {
        let snap = WorldSnapshot::new(8, 8);
        let pf = GridPathfinder::new();
        assert!(pf.reachable(GridPos::new(0, 0), GridPos::new(7, 7), &snap));
    }

    #[test]
    fn test_wall_blocks_path() {
        let mut snap = WorldSnapshot::new(5, 5);
        for y in 0..5 {
            snap.push_unit(blocker(10 + y as u64, 2, y));
        }
        let pf = GridPathfinder::new();
        assert!(!pf.reachable(GridPos::new(0, 2), GridPos::new(4, 2), &snap));
    }

    #[test]
    fn test_gap_in_wall_is_passable() {
        let mut snap = WorldSnapshot::new(5, 5);
        for y in 0..5 {
            if y != 3 {
                snap.push_unit(blocker(10 + y as u64, 2, y));
            }
        }
        let pf = GridPathfinder::new();
        assert!(pf.reachable(GridPos::new(0, 2), GridPos::new(4, 2), &snap));
    }

    #[test]
    fn test_occupied_destination_is_unreachable() {
        let mut snap = WorldSnapshot::new(5, 5);
        snap.push_unit(blocker(10, 4, 4));
        let pf = GridPathfinder::new();
        assert!(!pf.reachable(GridPos::new(0, 0), GridPos::new(4, 4), &snap));
    }

    #[test]
    fn test_own_cell_does_not_block() {
        let mut snap = WorldSnapshot::new(5, 5);
        // The probing unit stands at the start cell; it must not wall
        // itself in.
        snap.push_unit(blocker(10, 0, 0));
        let pf = GridPathfinder::new();
        assert!(pf.reachable(GridPos::new(0, 0), GridPos::new(3, 3), &snap));
    }

    #[test]
    fn test_out_of_bounds_destination() {
        let snap = WorldSnapshot::new(5, 5);
        let pf = GridPathfinder::new();
        assert!(!pf.reachable(GridPos::new(0, 0), GridPos::new(5, 0), &snap));
        assert!(!pf.reachable(GridPos::new(0, 0), GridPos::new(0, -1), &snap));
    }
}
