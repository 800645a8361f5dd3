//! Tile graph interface and a simple grid-backed implementation.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

/// Integer tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing a world position.
    pub fn from_world(pos: Vec2, tile_size: f32) -> Self {
        Self {
            x: (pos.x / tile_size).floor() as i32,
            y: (pos.y / tile_size).floor() as i32,
        }
    }

    /// World position of this tile's center.
    pub fn center(&self, tile_size: f32) -> Vec2 {
        Vec2::new(
            (self.x as f32 + 0.5) * tile_size,
            (self.y as f32 + 0.5) * tile_size,
        )
    }

    /// 4-way neighbors.
    pub fn neighbors(&self) -> [TilePos; 4] {
        [
            Self::new(self.x + 1, self.y),
            Self::new(self.x - 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x, self.y - 1),
        ]
    }

    /// Manhattan distance to another tile.
    pub fn manhattan(&self, other: TilePos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// World tile data consumed by the path search and steering.
///
/// The concrete storage lives outside the engine; [`GridGraph`] below is a
/// minimal in-memory implementation for tests and headless runs.
pub trait TileGraph {
    /// Whether the tile exists at all. Bounds the search for flyers.
    fn in_bounds(&self, tile: TilePos) -> bool;

    /// Whether ground units can enter the tile.
    fn is_walkable(&self, tile: TilePos) -> bool;

    /// Traversal cost for entering the tile.
    fn cost(&self, _tile: TilePos) -> f32 {
        1.0
    }

    /// Ambient heading bias nudging actors crossing the tile.
    fn heading_bias(&self, _tile: TilePos) -> Vec2 {
        Vec2::ZERO
    }

    /// Edge length of one tile in world units.
    fn tile_size(&self) -> f32 {
        1.0
    }
}

/// Rectangular grid with a blocked-tile set and optional per-tile bias.
#[derive(Debug, Default)]
pub struct GridGraph {
    width: i32,
    height: i32,
    blocked: HashSet<TilePos>,
    bias: HashMap<TilePos, Vec2>,
}

impl GridGraph {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blocked: HashSet::new(),
            bias: HashMap::new(),
        }
    }

    /// Mark a tile as impassable for ground units.
    pub fn block(&mut self, tile: TilePos) {
        self.blocked.insert(tile);
    }

    /// Block every tile in the inclusive rectangle.
    pub fn block_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for x in x0..=x1 {
            for y in y0..=y1 {
                self.blocked.insert(TilePos::new(x, y));
            }
        }
    }

    /// Set the ambient heading bias for a tile.
    pub fn set_bias(&mut self, tile: TilePos, bias: Vec2) {
        self.bias.insert(tile, bias);
    }
}

impl TileGraph for GridGraph {
    fn in_bounds(&self, tile: TilePos) -> bool {
        tile.x >= 0 && tile.x < self.width && tile.y >= 0 && tile.y < self.height
    }

    fn is_walkable(&self, tile: TilePos) -> bool {
        self.in_bounds(tile) && !self.blocked.contains(&tile)
    }

    fn heading_bias(&self, tile: TilePos) -> Vec2 {
        self.bias.get(&tile).copied().unwrap_or(Vec2::ZERO)
    }
}
