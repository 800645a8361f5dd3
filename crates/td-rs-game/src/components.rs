//! ECS components for creatures and bolts.

use bevy_ecs::prelude::*;
use glam::Vec2;
use td_rs_nav::path::Locomotion;
use td_rs_nav::steering::SteeringProfile;

/// Stable engine-wide handle for an actor, independent of ECS generation.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

/// World position.
#[derive(Component, Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Smoothed facing/travel direction. Derived runtime state; never persisted.
#[derive(Component, Debug, Clone, Copy)]
pub struct Heading(pub Vec2);

/// Health points. `current` clamps at zero, and zero is terminal.
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Health regained per tick while alive.
#[derive(Component, Debug, Clone, Copy)]
pub struct Regeneration(pub f32);

/// Movement speed in world units per tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct MovementSpeed(pub f32);

/// Inclusive radius for "reached" tests against waypoints and destinations.
#[derive(Component, Debug, Clone, Copy)]
pub struct ReachTolerance(pub f32);

/// Namespaced creature kind, e.g. `"td:raider"`.
#[derive(Component, Debug, Clone)]
pub struct CreatureKind(pub String);

/// Which side an actor fights for. Bolts only hurt the opposite side.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allegiance {
    Friendly,
    Hostile,
}

/// How the creature traverses the tile grid.
#[derive(Component, Debug, Clone, Copy)]
pub struct Mobility(pub Locomotion);

/// Steering weights for this creature.
#[derive(Component, Debug, Clone, Copy)]
pub struct Steering(pub SteeringProfile);

/// Kinds this creature steers away from and toward.
#[derive(Component, Debug, Clone, Default)]
pub struct SteeringTargets {
    pub avoid: Vec<String>,
    pub attract: Vec<String>,
}

/// Coarse destinations pushed by the behavior layer. LIFO: the last pushed
/// destination is the one currently being resolved.
#[derive(Component, Debug, Clone, Default)]
pub struct TargetDestinations(pub Vec<Vec2>);

/// Fine-grained path toward the top destination. A cache only — always
/// re-derivable by re-running the path search. Top of stack = next waypoint.
#[derive(Component, Debug, Clone, Default)]
pub struct Waypoints(pub Vec<Vec2>);

/// Spawner that produced this creature, if any. Weak reference by id.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnOrigin(pub Option<u64>);

/// Actors whose bolts pass through this creature.
#[derive(Component, Debug, Clone, Default)]
pub struct CollisionIgnore(pub Vec<u64>);

/// Marker: this entity is a creature.
#[derive(Component, Debug)]
pub struct Creature;

/// Marker: the death transition has fired. Guards against double-triggering.
#[derive(Component, Debug)]
pub struct Dying;

/// Marker: pending removal at end-of-tick cleanup.
#[derive(Component, Debug)]
pub struct Dead;

/// A bolt in flight.
#[derive(Component, Debug, Clone)]
pub struct Bolt {
    pub shooter: u64,
    pub allegiance: Allegiance,
    pub damage: f32,
    pub velocity: Vec2,
    pub ticks_left: u32,
}
