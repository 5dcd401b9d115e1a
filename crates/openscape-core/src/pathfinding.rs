//! Breadth-first grid pathfinding.
//!
//! Movement is 4-directional and unweighted, so BFS yields a shortest path.
//! Among equally short paths the one found first wins, which follows the
//! neighbour order of [`CARDINAL_OFFSETS`] (up, down, left, right).

use std::collections::{HashMap, VecDeque};

use crate::entity::{Npc, Resource};
use crate::geometry::{is_blocked, Tile, CARDINAL_OFFSETS};
use crate::terrain::Terrain;

/// Finds a shortest walk from `start` to `goal`.
///
/// The returned steps exclude `start` and end on `goal`. The result is empty
/// when `start == goal`, when `goal` is unreachable, and when the search
/// dequeues more than `iteration_limit` tiles. Callers tell "already there"
/// apart from "unreachable" with a distance check.
///
/// # Arguments
///
/// * `start` - Current tile of the walker (never itself checked for blocking)
/// * `goal` - Destination tile
/// * `terrain` - Static terrain grid
/// * `resources` - Resources that may block tiles
/// * `npcs` - Npcs that may block tiles
/// * `iteration_limit` - Maximum number of dequeued tiles
///
/// # Example
///
/// ```
/// use openscape_core::geometry::Tile;
/// use openscape_core::pathfinding::find_path;
/// use openscape_core::terrain::Terrain;
///
/// let terrain = Terrain::open(10, 10);
/// let path = find_path(Tile::new(0, 0), Tile::new(2, 1), &terrain, &[], &[], 2000);
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.last(), Some(&Tile::new(2, 1)));
/// ```
#[must_use]
pub fn find_path(
    start: Tile,
    goal: Tile,
    terrain: &Terrain,
    resources: &[Resource],
    npcs: &[Npc],
    iteration_limit: usize,
) -> Vec<Tile> {
    if start == goal {
        return Vec::new();
    }

    let mut queue = VecDeque::from([start]);
    let mut came_from: HashMap<Tile, Tile> = HashMap::new();
    came_from.insert(start, start);
    let mut iterations = 0;

    while let Some(current) = queue.pop_front() {
        iterations += 1;
        if iterations > iteration_limit {
            tracing::trace!(?start, ?goal, iteration_limit, "path search exhausted");
            return Vec::new();
        }

        if current == goal {
            return reconstruct(&came_from, start, goal);
        }

        for offset in CARDINAL_OFFSETS {
            let next = current + offset;
            if came_from.contains_key(&next) || is_blocked(next, terrain, resources, npcs) {
                continue;
            }
            came_from.insert(next, current);
            queue.push_back(next);
        }
    }

    Vec::new()
}

fn reconstruct(came_from: &HashMap<Tile, Tile>, start: Tile, goal: Tile) -> Vec<Tile> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityId, ResourceKind};
    use crate::geometry::distance;
    use crate::terrain::TileKind;

    const LIMIT: usize = 2000;

    mod path_tests {
        use super::*;

        #[test]
        fn start_equals_goal_is_empty() {
            let terrain = Terrain::open(5, 5);
            assert!(find_path(Tile::new(2, 2), Tile::new(2, 2), &terrain, &[], &[], LIMIT).is_empty());
        }

        #[test]
        fn open_grid_path_has_manhattan_length() {
            let terrain = Terrain::open(20, 20);
            let start = Tile::new(1, 2);
            let goal = Tile::new(15, 9);
            let path = find_path(start, goal, &terrain, &[], &[], LIMIT);
            assert_eq!(path.len(), distance(start, goal) as usize);
            assert_eq!(path.last(), Some(&goal));
            assert!(!path.contains(&start));
        }

        #[test]
        fn steps_are_adjacent() {
            let terrain = Terrain::open(10, 10);
            let start = Tile::new(0, 0);
            let path = find_path(start, Tile::new(6, 4), &terrain, &[], &[], LIMIT);
            let mut previous = start;
            for step in path {
                assert_eq!(distance(previous, step), 1);
                previous = step;
            }
        }

        #[test]
        fn ties_break_vertical_first() {
            let terrain = Terrain::open(5, 5);
            let path = find_path(Tile::new(1, 1), Tile::new(2, 2), &terrain, &[], &[], LIMIT);
            assert_eq!(path, vec![Tile::new(1, 2), Tile::new(2, 2)]);
        }

        #[test]
        fn walks_around_a_wall() {
            let mut terrain = Terrain::open(5, 5);
            for y in 0..4 {
                terrain = terrain.with_tile(Tile::new(2, y), TileKind::Wall);
            }
            let path = find_path(Tile::new(0, 0), Tile::new(4, 0), &terrain, &[], &[], LIMIT);
            assert_eq!(path.len(), 12);
            assert!(path.contains(&Tile::new(2, 4)));
        }
    }

    mod unreachable_tests {
        use super::*;

        #[test]
        fn enclosed_goal_is_empty() {
            let terrain = Terrain::open(7, 7);
            let goal = Tile::new(3, 3);
            let rocks: Vec<_> = CARDINAL_OFFSETS
                .iter()
                .enumerate()
                .map(|(i, &o)| Resource::new(EntityId::new(i as u64 + 1), ResourceKind::Rock, goal + o))
                .collect();
            assert!(find_path(Tile::new(0, 0), goal, &terrain, &rocks, &[], LIMIT).is_empty());
        }

        #[test]
        fn blocked_goal_is_empty() {
            let terrain = Terrain::open(5, 5).with_tile(Tile::new(4, 4), TileKind::Wall);
            assert!(find_path(Tile::new(0, 0), Tile::new(4, 4), &terrain, &[], &[], LIMIT).is_empty());
        }

        #[test]
        fn out_of_bounds_goal_is_empty() {
            let terrain = Terrain::open(5, 5);
            assert!(find_path(Tile::new(0, 0), Tile::new(9, 9), &terrain, &[], &[], LIMIT).is_empty());
        }

        #[test]
        fn iteration_limit_gives_up() {
            let terrain = Terrain::open(50, 50);
            assert!(find_path(Tile::new(0, 0), Tile::new(40, 40), &terrain, &[], &[], 10).is_empty());
        }

        #[test]
        fn depleted_resources_are_walkable() {
            let terrain = Terrain::open(3, 1);
            let mut tree = Resource::new(EntityId::new(1), ResourceKind::Tree, Tile::new(1, 0));
            assert!(find_path(Tile::new(0, 0), Tile::new(2, 0), &terrain, &[tree.clone()], &[], LIMIT).is_empty());
            tree.deplete(10);
            assert_eq!(
                find_path(Tile::new(0, 0), Tile::new(2, 0), &terrain, &[tree], &[], LIMIT).len(),
                2
            );
        }
    }
}
