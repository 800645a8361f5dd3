//! Frontier search turning a destination into a waypoint stack.

use std::collections::HashMap;

use glam::Vec2;

use crate::error::NavError;
use crate::frontier::PriorityFrontier;
use crate::graph::{TileGraph, TilePos};

/// How a creature traverses the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locomotion {
    /// Bound to walkable tiles.
    Walking,
    /// Ignores walkability; only grid bounds constrain the search.
    Flying,
}

/// Resolve a waypoint path from `start` to `goal`.
///
/// Waypoints come back ordered for stack consumption: the *last* element is
/// the first waypoint, so `Vec::pop` walks the path start to goal. An empty
/// Vec means start and goal already share a tile. Unreachable goals yield
/// [`NavError::NoPath`].
pub fn find_path(
    graph: &dyn TileGraph,
    start: Vec2,
    goal: Vec2,
    locomotion: Locomotion,
) -> Result<Vec<Vec2>, NavError> {
    let tile_size = graph.tile_size();
    let start_tile = TilePos::from_world(start, tile_size);
    let goal_tile = TilePos::from_world(goal, tile_size);

    if start_tile == goal_tile {
        return Ok(Vec::new());
    }
    if !traversable(graph, goal_tile, locomotion) {
        return Err(NavError::NoPath {
            from: start_tile,
            to: goal_tile,
        });
    }

    let mut frontier = PriorityFrontier::new();
    let mut best_cost: HashMap<TilePos, f32> = HashMap::new();
    let mut came_from: HashMap<TilePos, TilePos> = HashMap::new();

    best_cost.insert(start_tile, 0.0);
    frontier.insert(start_tile, heuristic(start_tile, goal_tile));

    while let Ok(tile) = frontier.extract_min() {
        if tile == goal_tile {
            return Ok(reconstruct(&came_from, start_tile, goal_tile, tile_size));
        }
        let Some(&tile_cost) = best_cost.get(&tile) else {
            continue;
        };
        for next in tile.neighbors() {
            if !traversable(graph, next, locomotion) {
                continue;
            }
            let tentative = tile_cost + graph.cost(next);
            let improved = best_cost.get(&next).map_or(true, |&c| tentative < c);
            if improved {
                best_cost.insert(next, tentative);
                came_from.insert(next, tile);
                frontier.insert(next, tentative + heuristic(next, goal_tile));
            }
        }
    }

    Err(NavError::NoPath {
        from: start_tile,
        to: goal_tile,
    })
}

fn traversable(graph: &dyn TileGraph, tile: TilePos, locomotion: Locomotion) -> bool {
    match locomotion {
        Locomotion::Walking => graph.is_walkable(tile),
        Locomotion::Flying => graph.in_bounds(tile),
    }
}

fn heuristic(tile: TilePos, goal: TilePos) -> f32 {
    tile.manhattan(goal) as f32
}

/// Walk recorded predecessors goal-to-start. The resulting Vec ends with the
/// tile adjacent to the start, which is exactly the stack-top ordering the
/// waypoint consumer expects.
fn reconstruct(
    came_from: &HashMap<TilePos, TilePos>,
    start: TilePos,
    goal: TilePos,
    tile_size: f32,
) -> Vec<Vec2> {
    let mut waypoints = Vec::new();
    let mut current = goal;
    while current != start {
        waypoints.push(current.center(tile_size));
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => break,
        }
    }
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GridGraph;

    fn open_grid() -> GridGraph {
        GridGraph::new(10, 10)
    }

    #[test]
    fn same_tile_yields_empty_path() {
        let grid = open_grid();
        let path = find_path(
            &grid,
            Vec2::new(2.2, 2.2),
            Vec2::new(2.8, 2.8),
            Locomotion::Walking,
        )
        .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn adjacent_tile_yields_single_waypoint() {
        let grid = open_grid();
        let path = find_path(
            &grid,
            Vec2::new(2.5, 2.5),
            Vec2::new(3.5, 2.5),
            Locomotion::Walking,
        )
        .unwrap();
        assert_eq!(path, vec![Vec2::new(3.5, 2.5)]);
    }

    #[test]
    fn pops_consume_start_to_goal() {
        let grid = open_grid();
        let start = Vec2::new(0.5, 0.5);
        let mut path = find_path(&grid, start, Vec2::new(4.5, 0.5), Locomotion::Walking).unwrap();
        assert_eq!(path.len(), 4);

        // Each pop must move monotonically away from the start.
        let mut last_dist = 0.0;
        while let Some(wp) = path.pop() {
            let dist = start.distance(wp);
            assert!(dist > last_dist);
            last_dist = dist;
        }
    }

    #[test]
    fn detours_around_walls() {
        let mut grid = open_grid();
        // Vertical wall at x=5 with a gap at y=9.
        grid.block_rect(5, 0, 5, 8);

        let path = find_path(
            &grid,
            Vec2::new(2.5, 2.5),
            Vec2::new(8.5, 2.5),
            Locomotion::Walking,
        )
        .unwrap();

        assert!(!path.is_empty());
        // The detour must route through the gap row.
        assert!(path.iter().any(|wp| wp.y > 8.0));
        for wp in &path {
            let tile = TilePos::from_world(*wp, 1.0);
            assert!(grid.is_walkable(tile), "path crosses blocked tile {tile:?}");
        }
    }

    #[test]
    fn isolated_goal_is_no_path() {
        let mut grid = open_grid();
        // Ring of blocked tiles around the goal at (7,7); the goal itself
        // stays walkable.
        grid.block_rect(6, 6, 8, 6);
        grid.block_rect(6, 8, 8, 8);
        grid.block(TilePos::new(6, 7));
        grid.block(TilePos::new(8, 7));

        let result = find_path(
            &grid,
            Vec2::new(0.5, 0.5),
            Vec2::new(7.5, 7.5),
            Locomotion::Walking,
        );
        assert!(matches!(result, Err(NavError::NoPath { .. })));
    }

    #[test]
    fn flying_crosses_blocked_tiles() {
        let mut grid = open_grid();
        grid.block_rect(5, 0, 5, 9);

        let walk = find_path(
            &grid,
            Vec2::new(2.5, 2.5),
            Vec2::new(8.5, 2.5),
            Locomotion::Walking,
        );
        assert!(matches!(walk, Err(NavError::NoPath { .. })));

        let fly = find_path(
            &grid,
            Vec2::new(2.5, 2.5),
            Vec2::new(8.5, 2.5),
            Locomotion::Flying,
        )
        .unwrap();
        assert_eq!(fly.len(), 6);
    }

    #[test]
    fn goal_outside_bounds_is_no_path() {
        let grid = open_grid();
        let result = find_path(
            &grid,
            Vec2::new(2.5, 2.5),
            Vec2::new(42.5, 2.5),
            Locomotion::Flying,
        );
        assert!(matches!(result, Err(NavError::NoPath { .. })));
    }
}
