//! Creature state records for save/restore.

use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use td_rs_nav::steering::SteeringProfile;

use crate::ai::brain::Brain;
use crate::ai::creature_behaviors;
use crate::components::*;
use crate::creature_registry::CreatureRegistry;
use crate::error::GameError;
use crate::game_world::{self, ActorIdAllocator};

/// Persistable creature state.
///
/// Derived runtime fields (heading, draw state) are deliberately absent; the
/// behavior implementation is referenced by kind and rebuilt on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub actor_id: u64,
    pub kind: String,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub regeneration: f32,
    pub speed: f32,
    pub reach_tolerance: f32,
    pub destinations: Vec<Vec2>,
    pub waypoints: Vec<Vec2>,
    pub spawn_origin: Option<u64>,
    pub collision_ignore: Vec<u64>,
    pub steering: SteeringProfile,
}

/// Capture a creature's persistable state.
pub fn snapshot_creature(world: &mut World, actor_id: u64) -> Option<CreatureRecord> {
    let entity = game_world::find_actor(world, actor_id)?;
    let health = *world.get::<Health>(entity)?;
    Some(CreatureRecord {
        actor_id,
        kind: world.get::<CreatureKind>(entity)?.0.clone(),
        position: world.get::<Position>(entity)?.0,
        health: health.current,
        max_health: health.max,
        regeneration: world.get::<Regeneration>(entity)?.0,
        speed: world.get::<MovementSpeed>(entity)?.0,
        reach_tolerance: world.get::<ReachTolerance>(entity)?.0,
        destinations: world.get::<TargetDestinations>(entity)?.0.clone(),
        waypoints: world.get::<Waypoints>(entity)?.0.clone(),
        spawn_origin: world.get::<SpawnOrigin>(entity)?.0,
        collision_ignore: world.get::<CollisionIgnore>(entity)?.0.clone(),
        steering: world.get::<Steering>(entity)?.0,
    })
}

/// Rebuild a creature from a record. The brain comes back fresh from the
/// kind table and the heading resets; both are runtime state.
pub fn restore_creature(
    world: &mut World,
    registry: &CreatureRegistry,
    record: &CreatureRecord,
) -> Result<(), GameError> {
    let def = registry
        .get(&record.kind)
        .ok_or_else(|| GameError::UnknownCreature(record.kind.clone()))?;

    world
        .resource_mut::<ActorIdAllocator>()
        .reserve_through(record.actor_id);

    let mut brain = creature_behaviors::create_brain(&record.kind);
    brain.initialize();

    world.spawn((
        (
            ActorId(record.actor_id),
            CreatureKind(record.kind.clone()),
            def.allegiance,
            Creature,
            SpawnOrigin(record.spawn_origin),
            CollisionIgnore(record.collision_ignore.clone()),
        ),
        (
            Health {
                current: record.health,
                max: record.max_health,
            },
            Regeneration(record.regeneration),
        ),
        (
            Position(record.position),
            Heading(Vec2::ZERO),
            MovementSpeed(record.speed),
            ReachTolerance(record.reach_tolerance),
            Mobility(def.locomotion),
            Steering(record.steering),
            SteeringTargets {
                avoid: def.avoid_kinds.clone(),
                attract: def.attract_kinds.clone(),
            },
            TargetDestinations(record.destinations.clone()),
            Waypoints(record.waypoints.clone()),
        ),
        Brain(brain),
    ));

    Ok(())
}
