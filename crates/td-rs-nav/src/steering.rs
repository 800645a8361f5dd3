//! Per-tick steering math: avoidance, attraction, blending, and heading
//! smoothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::graph::{TileGraph, TilePos};

/// Floor applied to distances before any division.
pub const MIN_DISTANCE: f32 = 0.05;

/// Tunable steering weights and radii for one creature kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteeringProfile {
    /// Radius within which matching actors repel.
    pub avoid_radius: f32,
    pub avoid_weight: f32,
    /// Radius within which matching actors attract.
    pub attract_radius: f32,
    pub attract_weight: f32,
    /// Heading interpolation factor per tick, in (0, 1].
    pub turn_rate: f32,
}

impl Default for SteeringProfile {
    fn default() -> Self {
        Self {
            avoid_radius: 3.0,
            avoid_weight: 1.5,
            attract_radius: 6.0,
            attract_weight: 0.5,
            turn_rate: 0.2,
        }
    }
}

fn normalize_or_zero(v: Vec2) -> Vec2 {
    if v.length_squared() > 1e-8 {
        v.normalize()
    } else {
        Vec2::ZERO
    }
}

/// Accumulated push away from each neighbor, closer neighbors contributing
/// more strongly. No matching neighbors yields the zero vector.
pub fn steer_away(pos: Vec2, neighbors: &[Vec2]) -> Vec2 {
    let mut sum = Vec2::ZERO;
    for &neighbor in neighbors {
        let offset = pos - neighbor;
        let dist = offset.length().max(MIN_DISTANCE);
        // Unit direction scaled by 1/dist.
        sum += offset / (dist * dist);
    }
    normalize_or_zero(sum)
}

/// Accumulated pull toward each neighbor, closer neighbors contributing more
/// strongly. No matching neighbors yields the zero vector.
pub fn steer_towards(pos: Vec2, neighbors: &[Vec2]) -> Vec2 {
    let mut sum = Vec2::ZERO;
    for &neighbor in neighbors {
        let offset = neighbor - pos;
        let dist = offset.length().max(MIN_DISTANCE);
        sum += offset / (dist * dist);
    }
    normalize_or_zero(sum)
}

/// Unweighted sum of two steering influences.
pub fn combine(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

/// Weighted sum of two steering influences, letting callers bias one over
/// the other (avoidance usually dominates attraction).
pub fn combine_weighted(a: Vec2, weight_a: f32, b: Vec2, weight_b: f32) -> Vec2 {
    a * weight_a + b * weight_b
}

/// First-order smoothing of the visible heading toward a target heading, so
/// creatures turn instead of snapping. The result is capped at unit length;
/// a zero target lets the heading decay smoothly to a stop.
pub fn lerp_heading(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    let factor = factor.clamp(0.0, 1.0);
    let next = current + (target - current) * factor;
    if next.length_squared() > 1.0 {
        next.normalize()
    } else {
        next
    }
}

/// Ambient heading bias from the tile under `pos`, scaled inversely by the
/// distance to the tile center so terrain nudges rather than shoves.
pub fn ambient_bias(graph: &dyn TileGraph, pos: Vec2) -> Vec2 {
    let tile = TilePos::from_world(pos, graph.tile_size());
    let bias = graph.heading_bias(tile);
    if bias == Vec2::ZERO {
        return Vec2::ZERO;
    }
    let dist = pos.distance(tile.center(graph.tile_size())).max(MIN_DISTANCE);
    bias / dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GridGraph;

    #[test]
    fn steer_away_empty_is_zero() {
        assert_eq!(steer_away(Vec2::new(5.0, 5.0), &[]), Vec2::ZERO);
    }

    #[test]
    fn steer_away_points_away_from_neighbor() {
        let out = steer_away(Vec2::new(5.0, 5.0), &[Vec2::new(7.0, 5.0)]);
        assert!(out.x < 0.0);
        assert!(out.y.abs() < 1e-6);
        assert!((out.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn steer_away_closer_neighbor_dominates() {
        let out = steer_away(
            Vec2::new(5.0, 5.0),
            &[Vec2::new(5.5, 5.0), Vec2::new(5.0, 9.0)],
        );
        // The neighbor half a unit to the right outweighs the one four units
        // up, so the push is mostly leftward.
        assert!(out.x < 0.0);
        assert!(out.x.abs() > out.y.abs());
    }

    #[test]
    fn steer_away_coincident_neighbor_is_finite() {
        let out = steer_away(Vec2::new(5.0, 5.0), &[Vec2::new(5.0, 5.0)]);
        assert!(out.x.is_finite() && out.y.is_finite());
    }

    #[test]
    fn steer_towards_points_at_neighbor() {
        let out = steer_towards(Vec2::new(0.0, 0.0), &[Vec2::new(0.0, 3.0)]);
        assert!(out.y > 0.99);
    }

    #[test]
    fn combine_weighted_biases_first_influence() {
        let out = combine_weighted(Vec2::new(1.0, 0.0), 2.0, Vec2::new(-1.0, 0.0), 0.5);
        assert!(out.x > 0.0);
    }

    #[test]
    fn lerp_heading_turns_gradually() {
        let current = Vec2::new(1.0, 0.0);
        let target = Vec2::new(0.0, 1.0);
        let out = lerp_heading(current, target, 0.25);
        // Part way between the two, not snapped to either.
        assert!(out.x > 0.0 && out.y > 0.0);
        assert!(out.x > out.y);
        assert!(out.length() <= 1.0 + 1e-5);
    }

    #[test]
    fn lerp_heading_full_factor_snaps_to_target() {
        let out = lerp_heading(Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0), 1.0);
        assert!((out - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn lerp_heading_decays_without_a_target() {
        let mut heading = Vec2::new(1.0, 0.0);
        for _ in 0..40 {
            heading = lerp_heading(heading, Vec2::ZERO, 0.2);
        }
        assert!(heading.length() < 0.01);
    }

    #[test]
    fn lerp_heading_caps_overlong_targets() {
        let out = lerp_heading(Vec2::new(1.0, 0.0), Vec2::new(4.0, 0.0), 1.0);
        assert!((out.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ambient_bias_scales_inversely_with_center_distance() {
        let mut grid = GridGraph::new(4, 4);
        grid.set_bias(TilePos::new(1, 1), Vec2::new(1.0, 0.0));

        let near = ambient_bias(&grid, Vec2::new(1.4, 1.5));
        let far = ambient_bias(&grid, Vec2::new(1.05, 1.05));
        assert!(near.length() > far.length());
        assert_eq!(ambient_bias(&grid, Vec2::new(3.5, 3.5)), Vec2::ZERO);
    }
}
