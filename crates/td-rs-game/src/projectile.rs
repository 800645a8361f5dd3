//! Bolt flight and hit detection.

use glam::Vec2;

/// Configuration for a bolt type.
#[derive(Debug, Clone, Copy)]
pub struct BoltConfig {
    /// Flight speed in units/tick.
    pub speed: f32,
    /// Ticks before an airborne bolt despawns.
    pub max_age: u32,
    /// Hit detection radius.
    pub hit_radius: f32,
}

/// Configuration for golem bolts.
pub fn standard_bolt() -> BoltConfig {
    BoltConfig {
        speed: 0.6,
        max_age: 120,
        hit_radius: 0.5,
    }
}

/// Velocity for a bolt launched from `from` toward `at` at the given speed.
pub fn launch_velocity(from: Vec2, at: Vec2, speed: f32) -> Vec2 {
    let offset = at - from;
    let dist = offset.length();
    if dist < 1e-4 {
        return Vec2::ZERO;
    }
    offset / dist * speed
}

/// Advance one tick of straight-line flight.
pub fn step_bolt(pos: Vec2, velocity: Vec2) -> Vec2 {
    pos + velocity
}

/// First candidate within `hit_radius` of `pos`, skipping the shooter.
/// Candidates are `(actor_id, position)` and must already be filtered to
/// hittable targets (opposite allegiance, ignore sets honored).
pub fn check_hit(
    pos: Vec2,
    candidates: &[(u64, Vec2)],
    shooter: u64,
    hit_radius: f32,
) -> Option<u64> {
    let radius_sq = hit_radius * hit_radius;
    for &(actor_id, candidate) in candidates {
        if actor_id == shooter {
            continue;
        }
        if pos.distance_squared(candidate) <= radius_sq {
            return Some(actor_id);
        }
    }
    None
}
