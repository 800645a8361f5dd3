//! Stockpile arithmetic: capped, never-negative resource bundles.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Four-axis resource bundle.
///
/// Every operation keeps all fields non-negative; capping and subtraction
/// report the overflow or deficit in a second bundle instead of failing, so
/// the arithmetic forms a closed algebra with no error path.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stockpile {
    pub wood: f32,
    pub stone: f32,
    pub iron: f32,
    pub food: f32,
}

impl Stockpile {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(wood: f32, stone: f32, iron: f32, food: f32) -> Self {
        Self {
            wood,
            stone,
            iron,
            food,
        }
    }

    /// Component-wise sum.
    pub fn add(self, other: Self) -> Self {
        Self {
            wood: self.wood + other.wood,
            stone: self.stone + other.stone,
            iron: self.iron + other.iron,
            food: self.food + other.food,
        }
    }

    /// Component-wise scale.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            wood: self.wood * factor,
            stone: self.stone * factor,
            iron: self.iron * factor,
            food: self.food * factor,
        }
    }

    /// Clamp each field to `[0, limit.field]`. The second bundle receives
    /// exactly the overflow removed from the first.
    pub fn cap(self, limit: Self) -> (Self, Self) {
        let (wood, wood_over) = cap_axis(self.wood, limit.wood);
        let (stone, stone_over) = cap_axis(self.stone, limit.stone);
        let (iron, iron_over) = cap_axis(self.iron, limit.iron);
        let (food, food_over) = cap_axis(self.food, limit.food);
        (
            Self::new(wood, stone, iron, food),
            Self::new(wood_over, stone_over, iron_over, food_over),
        )
    }

    /// Subtract, flooring each field at zero. The second bundle receives the
    /// per-field deficit that could not be paid.
    pub fn subtract(self, cost: Self) -> (Self, Self) {
        let (wood, wood_short) = subtract_axis(self.wood, cost.wood);
        let (stone, stone_short) = subtract_axis(self.stone, cost.stone);
        let (iron, iron_short) = subtract_axis(self.iron, cost.iron);
        let (food, food_short) = subtract_axis(self.food, cost.food);
        (
            Self::new(wood, stone, iron, food),
            Self::new(wood_short, stone_short, iron_short, food_short),
        )
    }

    /// Whether every field covers the cost.
    pub fn covers(&self, cost: &Self) -> bool {
        self.wood >= cost.wood
            && self.stone >= cost.stone
            && self.iron >= cost.iron
            && self.food >= cost.food
    }
}

fn cap_axis(value: f32, limit: f32) -> (f32, f32) {
    let capped = value.clamp(0.0, limit.max(0.0));
    (capped, (value - capped).max(0.0))
}

fn subtract_axis(value: f32, cost: f32) -> (f32, f32) {
    let remaining = (value - cost).max(0.0);
    let deficit = (cost - value).max(0.0);
    (remaining, deficit)
}
