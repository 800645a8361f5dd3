//! Creature locomotion and behavior engine: ECS world, per-kind AI,
//! lifecycle, spawning, and the bolt/economy plumbing around them.

pub mod ai;
pub mod components;
pub mod creature_registry;
pub mod error;
pub mod game_world;
pub mod persistence;
pub mod projectile;
pub mod resources;
pub mod spawner;
pub mod stats;
