//! Simulation statistics sink.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;

/// Counter categories reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    EnemiesSlain,
    MinionsLost,
    BoltsFired,
    CreaturesSpawned,
}

/// Accumulating sink for kill counters and other tallies.
#[derive(Resource, Debug, Default)]
pub struct Statistics {
    totals: HashMap<StatKind, f64>,
}

impl Statistics {
    pub fn add_value(&mut self, kind: StatKind, amount: f64) {
        *self.totals.entry(kind).or_insert(0.0) += amount;
    }

    pub fn value(&self, kind: StatKind) -> f64 {
        self.totals.get(&kind).copied().unwrap_or(0.0)
    }
}
