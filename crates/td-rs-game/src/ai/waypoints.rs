//! Destination and waypoint stack policy.

use glam::Vec2;
use td_rs_nav::graph::TileGraph;
use td_rs_nav::path::{find_path, Locomotion};
use tracing::debug;

/// What the per-tick waypoint pass consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Nothing consumed this tick.
    None,
    /// One or more waypoints were consumed; more remain.
    Waypoint,
    /// The active destination was fully consumed.
    Destination,
}

/// Make sure a creature with a pending destination has waypoints cached.
///
/// An empty destination stack leaves the cache empty (idle). An unreachable
/// or already-satisfied destination is popped; the behavior layer observes
/// the emptiness on a later update and may schedule a new one.
pub fn refresh(
    graph: &dyn TileGraph,
    position: Vec2,
    locomotion: Locomotion,
    destinations: &mut Vec<Vec2>,
    waypoints: &mut Vec<Vec2>,
) {
    if !waypoints.is_empty() {
        return;
    }
    let Some(&goal) = destinations.last() else {
        return;
    };
    match find_path(graph, position, goal, locomotion) {
        Ok(path) if !path.is_empty() => *waypoints = path,
        Ok(_) => {
            // Already on the goal tile; nothing left to walk.
            destinations.pop();
        }
        Err(err) => {
            debug!("dropping unreachable destination {goal:?}: {err}");
            destinations.pop();
        }
    }
}

/// Consume reached waypoints. The "reached" test is inclusive of the
/// tolerance radius. Consuming the last waypoint also pops the active
/// destination.
pub fn advance(
    position: Vec2,
    tolerance: f32,
    destinations: &mut Vec<Vec2>,
    waypoints: &mut Vec<Vec2>,
) -> Arrival {
    let mut consumed = false;
    while let Some(&next) = waypoints.last() {
        if position.distance(next) > tolerance {
            break;
        }
        waypoints.pop();
        consumed = true;
    }
    if !consumed {
        return Arrival::None;
    }
    if waypoints.is_empty() {
        destinations.pop();
        return Arrival::Destination;
    }
    Arrival::Waypoint
}
