//! Per-tick movement/steering and behavior systems.
//!
//! Both systems snapshot creature state before mutating anything, so every
//! creature steers and decides against start-of-tick state regardless of
//! iteration order.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::rngs::StdRng;
use td_rs_nav::graph::TileGraph;
use td_rs_nav::steering;

use crate::components::*;
use crate::creature_registry::CreatureRegistry;
use crate::game_world::{self, GameEvent, OutgoingEvents, TickCounter, WorldBounds};
use crate::projectile;
use crate::stats::{StatKind, Statistics};

use super::behavior::{ActorSnapshot, BehaviorContext, BehaviorOutput};
use super::brain::Brain;
use super::spatial::{SpatialEntry, SpatialGrid};
use super::waypoints::{self, Arrival};

/// Snapshot all live creatures.
fn actor_snapshots(world: &mut World) -> Vec<ActorSnapshot> {
    let mut q = world.query_filtered::<(&ActorId, &Position, &CreatureKind), (
        With<Creature>,
        Without<Dead>,
    )>();
    q.iter(world)
        .map(|(id, pos, kind)| ActorSnapshot {
            actor_id: id.0,
            kind: kind.0.clone(),
            position: pos.0,
        })
        .collect()
}

fn build_grid(actors: &[ActorSnapshot]) -> SpatialGrid {
    let mut grid = SpatialGrid::new();
    for actor in actors {
        grid.insert(SpatialEntry {
            actor_id: actor.actor_id,
            position: actor.position,
            kind: actor.kind.clone(),
        });
    }
    grid
}

/// Movement pass: waypoint upkeep, steering blend, heading smoothing,
/// position advance, arrival pops, and the out-of-bounds check.
pub fn system_movement_tick(world: &mut World, graph: &dyn TileGraph, registry: &CreatureRegistry) {
    let actors = actor_snapshots(world);
    let grid = build_grid(&actors);
    let bounds = *world.resource::<WorldBounds>();

    let mut reached: Vec<Entity> = Vec::new();
    let mut out_of_bounds: Vec<(Entity, f32)> = Vec::new();

    let mut q = world.query_filtered::<(
        Entity,
        &ActorId,
        &mut Position,
        &mut Heading,
        &mut TargetDestinations,
        &mut Waypoints,
        &MovementSpeed,
        &ReachTolerance,
        &Mobility,
        &Steering,
        &SteeringTargets,
        &Health,
    ), (With<Creature>, Without<Dead>, Without<Dying>)>();

    for (entity, id, mut pos, mut heading, mut dests, mut wps, speed, tol, mobility, profile, targets, health) in
        q.iter_mut(world)
    {
        waypoints::refresh(graph, pos.0, mobility.0, &mut dests.0, &mut wps.0);

        // Desired heading: toward the next waypoint, or none while idle.
        let desired = match wps.0.last() {
            Some(&wp) => {
                let offset = wp - pos.0;
                if offset.length_squared() > 1e-8 {
                    offset.normalize()
                } else {
                    Vec2::ZERO
                }
            }
            None => Vec2::ZERO,
        };

        let profile = profile.0;
        let avoid_neighbors =
            grid.query_kinds_within(pos.0, profile.avoid_radius, &targets.avoid, id.0);
        let attract_neighbors =
            grid.query_kinds_within(pos.0, profile.attract_radius, &targets.attract, id.0);
        let forces = steering::combine_weighted(
            steering::steer_away(pos.0, &avoid_neighbors),
            profile.avoid_weight,
            steering::steer_towards(pos.0, &attract_neighbors),
            profile.attract_weight,
        );
        let blended = steering::combine(
            steering::combine(desired, forces),
            steering::ambient_bias(graph, pos.0),
        );

        heading.0 = steering::lerp_heading(heading.0, blended, profile.turn_rate);
        pos.0 += heading.0 * speed.0;

        if waypoints::advance(pos.0, tol.0, &mut dests.0, &mut wps.0) == Arrival::Destination {
            reached.push(entity);
        }
        if !bounds.contains(pos.0) {
            out_of_bounds.push((entity, health.max));
        }
    }

    // Destination arrivals: notify the brain and apply its follow-up.
    let current_tick = world.resource::<TickCounter>().0;
    for entity in reached {
        let Some(view) = creature_view(world, entity) else {
            continue;
        };
        world
            .resource_mut::<OutgoingEvents>()
            .events
            .push(GameEvent::DestinationReached {
                actor_id: view.actor_id,
                position: view.position,
            });
        let ctx = BehaviorContext {
            actor_id: view.actor_id,
            kind: &view.kind,
            position: view.position,
            current_tick,
            destinations: &view.destinations,
            actors: &actors,
        };
        let Some(mut brain) = world.get_mut::<Brain>(entity) else {
            continue;
        };
        let output = brain.0.on_reached_destination(&ctx);
        apply_behavior_output(world, entity, output, registry);
    }

    // Leaving the world is instant full-health damage.
    for (entity, max_health) in out_of_bounds {
        game_world::apply_damage_with(world, entity, max_health, registry);
    }
}

/// AI pass: one `update` per living creature, after movement has resolved.
pub fn system_behavior_tick(world: &mut World, registry: &CreatureRegistry, rng: &mut StdRng) {
    let actors = actor_snapshots(world);
    let current_tick = world.resource::<TickCounter>().0;

    let targets: Vec<(Entity, u64, String, Vec2, Vec<Vec2>)> = {
        let mut q = world.query_filtered::<(
            Entity,
            &ActorId,
            &CreatureKind,
            &Position,
            &TargetDestinations,
        ), (With<Creature>, With<Brain>, Without<Dead>, Without<Dying>)>();
        q.iter(world)
            .map(|(entity, id, kind, pos, dests)| {
                (entity, id.0, kind.0.clone(), pos.0, dests.0.clone())
            })
            .collect()
    };

    // Evaluate every brain against the snapshot, then apply outputs.
    let mut pending: Vec<(Entity, BehaviorOutput)> = Vec::new();
    for (entity, actor_id, kind, position, destinations) in &targets {
        let ctx = BehaviorContext {
            actor_id: *actor_id,
            kind,
            position: *position,
            current_tick,
            destinations,
            actors: &actors,
        };
        let Some(mut brain) = world.get_mut::<Brain>(*entity) else {
            continue;
        };
        let output = brain.0.update(&ctx, rng);
        pending.push((*entity, output));
    }

    for (entity, output) in pending {
        apply_behavior_output(world, entity, output, registry);
    }
}

struct CreatureView {
    actor_id: u64,
    kind: String,
    position: Vec2,
    destinations: Vec<Vec2>,
}

fn creature_view(world: &mut World, entity: Entity) -> Option<CreatureView> {
    Some(CreatureView {
        actor_id: world.get::<ActorId>(entity)?.0,
        kind: world.get::<CreatureKind>(entity)?.0.clone(),
        position: world.get::<Position>(entity)?.0,
        destinations: world.get::<TargetDestinations>(entity)?.0.clone(),
    })
}

fn apply_behavior_output(
    world: &mut World,
    entity: Entity,
    output: BehaviorOutput,
    registry: &CreatureRegistry,
) {
    if let Some(dest) = output.push_destination {
        if let Some(mut dests) = world.get_mut::<TargetDestinations>(entity) {
            dests.0.push(dest);
        }
        // The cached waypoints belong to the previous top destination.
        if let Some(mut wps) = world.get_mut::<Waypoints>(entity) {
            wps.0.clear();
        }
    }
    if let Some(at) = output.fire_at {
        launch_bolt(world, entity, at, registry);
    }
}

fn launch_bolt(world: &mut World, entity: Entity, at: Vec2, registry: &CreatureRegistry) {
    let Some(view) = creature_view(world, entity) else {
        return;
    };
    let Some(&allegiance) = world.get::<Allegiance>(entity) else {
        return;
    };
    let Some(bolt) = registry.get(&view.kind).and_then(|d| d.bolt) else {
        return;
    };
    let config = projectile::standard_bolt();
    let velocity = projectile::launch_velocity(view.position, at, bolt.speed);
    if velocity == Vec2::ZERO {
        return;
    }
    world.spawn((
        Position(view.position),
        Bolt {
            shooter: view.actor_id,
            allegiance,
            damage: bolt.damage,
            velocity,
            ticks_left: config.max_age,
        },
    ));
    world
        .resource_mut::<Statistics>()
        .add_value(StatKind::BoltsFired, 1.0);
}
