//! Creature AI: the behavior contract, per-kind brains, neighbor queries,
//! waypoint bookkeeping, and the per-tick systems that drive them.

pub mod behavior;
pub mod behaviors;
pub mod brain;
pub mod creature_behaviors;
pub mod spatial;
pub mod system;
pub mod waypoints;
