//! Spawn origins: capacity-tracked creature sources.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::creature_registry::CreatureRegistry;
use crate::game_world::{self, TickCounter};
use crate::resources::Stockpile;

/// One spawn origin placed in the world.
#[derive(Debug, Clone)]
pub struct Spawner {
    pub id: u64,
    pub kind: String,
    pub position: Vec2,
    /// Maximum live creatures attributed to this spawner.
    pub capacity: u32,
    /// Ticks between spawn attempts.
    pub interval: u64,
    /// Live creatures currently attributed to this spawner.
    pub alive: u32,
}

impl Spawner {
    pub fn new(id: u64, kind: impl Into<String>, position: Vec2, capacity: u32, interval: u64) -> Self {
        Self {
            id,
            kind: kind.into(),
            position,
            capacity,
            interval: interval.max(1),
            alive: 0,
        }
    }
}

/// Registry of spawn origins, addressed by id. Creatures hold their origin
/// as a plain id, never as an owning reference.
#[derive(Resource, Debug, Default)]
pub struct SpawnerRegistry {
    spawners: Vec<Spawner>,
}

impl SpawnerRegistry {
    pub fn add(&mut self, spawner: Spawner) {
        self.spawners.push(spawner);
    }

    pub fn get(&self, id: u64) -> Option<&Spawner> {
        self.spawners.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Spawner> {
        self.spawners.iter_mut().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[Spawner] {
        &self.spawners
    }

    /// Free the slot held by a creature of this origin.
    pub fn notify_creature_died(&mut self, origin: u64) {
        if let Some(spawner) = self.get_mut(origin) {
            spawner.alive = spawner.alive.saturating_sub(1);
        }
    }
}

/// Periodic spawn pass: every spawner below capacity produces one creature
/// on its interval. Friendly kinds are paid for from the stockpile; a pile
/// that cannot cover the cost skips the spawn and keeps its funds.
pub fn system_spawn_tick(world: &mut World, registry: &CreatureRegistry, rng: &mut StdRng) {
    let tick = world.resource::<TickCounter>().0;
    if tick == 0 {
        return;
    }

    let due: Vec<(u64, String, Vec2)> = world
        .resource::<SpawnerRegistry>()
        .all()
        .iter()
        .filter(|s| s.alive < s.capacity && tick % s.interval == 0)
        .map(|s| (s.id, s.kind.clone(), s.position))
        .collect();

    for (spawner_id, kind, position) in due {
        let Some(def) = registry.get(&kind) else {
            debug!("spawner {spawner_id} references unknown kind {kind}");
            continue;
        };

        if let Some(cost) = def.cost {
            let pile = *world.resource::<Stockpile>();
            if !pile.covers(&cost) {
                debug!("spawner {spawner_id}: stockpile cannot cover {kind}");
                continue;
            }
            let (remaining, _) = pile.subtract(cost);
            *world.resource_mut::<Stockpile>() = remaining;
        }

        // Scatter spawns slightly so stacked creatures separate.
        let offset = Vec2::new(rng.gen_range(-0.5..=0.5), rng.gen_range(-0.5..=0.5));
        match game_world::spawn_creature_at(
            world,
            registry,
            rng,
            &kind,
            position + offset,
            Some(spawner_id),
        ) {
            Ok(_) => {
                if let Some(spawner) = world.resource_mut::<SpawnerRegistry>().get_mut(spawner_id) {
                    spawner.alive += 1;
                }
            }
            Err(err) => debug!("spawner {spawner_id} failed: {err}"),
        }
    }
}
