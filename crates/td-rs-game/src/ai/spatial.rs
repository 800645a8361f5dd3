//! Spatial hash grid for neighbor queries during the AI tick.

use std::collections::HashMap;

use glam::Vec2;

/// Cell size in world units.
const CELL_SIZE: f32 = 8.0;

/// An actor entry in the spatial grid.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub actor_id: u64,
    pub position: Vec2,
    pub kind: String,
}

/// A spatial hash grid for O(1) cell lookup of nearby actors. Rebuilt from a
/// snapshot at the start of every tick, so queries always observe
/// start-of-tick state.
#[derive(Debug, Default)]
pub struct SpatialGrid {
    cells: HashMap<(i32, i32), Vec<SpatialEntry>>,
}

impl SpatialGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry into the grid.
    pub fn insert(&mut self, entry: SpatialEntry) {
        let key = cell_key(entry.position);
        self.cells.entry(key).or_default().push(entry);
    }

    /// Positions of actors of any listed kind within `radius`, excluding
    /// `exclude`. An empty kind list yields no matches.
    pub fn query_kinds_within(
        &self,
        pos: Vec2,
        radius: f32,
        kinds: &[String],
        exclude: u64,
    ) -> Vec<Vec2> {
        if kinds.is_empty() || radius <= 0.0 {
            return Vec::new();
        }
        let radius_sq = radius * radius;
        let reach = (radius / CELL_SIZE).ceil() as i32;
        let (cx, cy) = cell_key(pos);

        let mut matches = Vec::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let Some(entries) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for entry in entries {
                    if entry.actor_id == exclude {
                        continue;
                    }
                    if !kinds.iter().any(|k| *k == entry.kind) {
                        continue;
                    }
                    if pos.distance_squared(entry.position) <= radius_sq {
                        matches.push(entry.position);
                    }
                }
            }
        }
        matches
    }

    /// Nearest actor of any listed kind within `radius`, excluding `exclude`.
    pub fn nearest_of_kinds(
        &self,
        pos: Vec2,
        radius: f32,
        kinds: &[String],
        exclude: u64,
    ) -> Option<(u64, Vec2)> {
        let radius_sq = radius * radius;
        let reach = (radius / CELL_SIZE).ceil() as i32;
        let (cx, cy) = cell_key(pos);

        let mut best: Option<(u64, Vec2, f32)> = None;
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let Some(entries) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for entry in entries {
                    if entry.actor_id == exclude {
                        continue;
                    }
                    if !kinds.iter().any(|k| *k == entry.kind) {
                        continue;
                    }
                    let dist_sq = pos.distance_squared(entry.position);
                    if dist_sq > radius_sq {
                        continue;
                    }
                    if best.map(|(_, _, b)| dist_sq < b).unwrap_or(true) {
                        best = Some((entry.actor_id, entry.position, dist_sq));
                    }
                }
            }
        }
        best.map(|(id, p, _)| (id, p))
    }
}

fn cell_key(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / CELL_SIZE).floor() as i32,
        (pos.y / CELL_SIZE).floor() as i32,
    )
}
