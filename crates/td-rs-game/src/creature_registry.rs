//! Creature kind definitions and base attributes.
//!
//! The registry is the difficulty/attribute table: spawning reads base stats
//! from it, and collaborators can query single attributes by name.

use td_rs_nav::path::Locomotion;
use td_rs_nav::steering::SteeringProfile;

use crate::components::Allegiance;
use crate::resources::Stockpile;

/// Bolt stats for ranged kinds.
#[derive(Debug, Clone, Copy)]
pub struct BoltSpec {
    pub damage: f32,
    pub speed: f32,
}

/// Definition of a creature kind.
#[derive(Debug, Clone)]
pub struct CreatureDefinition {
    /// Namespaced identifier, e.g. `"td:raider"`.
    pub type_id: String,
    /// Display name, e.g. `"Raider"`.
    pub display_name: String,
    pub allegiance: Allegiance,
    pub locomotion: Locomotion,
    pub max_health: f32,
    /// Health regained per tick.
    pub regeneration: f32,
    pub movement_speed: f32,
    /// Inclusive "reached" radius.
    pub reach_tolerance: f32,
    /// Relative amplitude of per-instance stat jitter, e.g. 0.15 = ±15%.
    pub jitter: f32,
    /// Kinds this creature steers away from.
    pub avoid_kinds: Vec<String>,
    /// Kinds this creature steers toward.
    pub attract_kinds: Vec<String>,
    pub steering: SteeringProfile,
    /// Bolt stats for ranged kinds.
    pub bolt: Option<BoltSpec>,
    /// Stockpile cost charged when a spawner produces this kind.
    pub cost: Option<Stockpile>,
    /// Bounty credited to the stockpile when this kind dies.
    pub bounty: Option<Stockpile>,
}

/// Registry of supported creature kinds.
pub struct CreatureRegistry {
    creatures: Vec<CreatureDefinition>,
}

impl Default for CreatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatureRegistry {
    /// Build the registry with all known creature kinds.
    pub fn new() -> Self {
        Self {
            creatures: vec![
                CreatureDefinition {
                    type_id: "td:raider".into(),
                    display_name: "Raider".into(),
                    allegiance: Allegiance::Hostile,
                    locomotion: Locomotion::Walking,
                    max_health: 30.0,
                    regeneration: 0.02,
                    movement_speed: 0.12,
                    reach_tolerance: 2.0,
                    jitter: 0.15,
                    avoid_kinds: vec!["td:raider".into()],
                    attract_kinds: vec!["td:golem".into()],
                    steering: SteeringProfile::default(),
                    bolt: None,
                    cost: None,
                    bounty: Some(Stockpile::new(0.0, 0.0, 2.0, 1.0)),
                },
                CreatureDefinition {
                    type_id: "td:harrier".into(),
                    display_name: "Harrier".into(),
                    allegiance: Allegiance::Hostile,
                    locomotion: Locomotion::Flying,
                    max_health: 18.0,
                    regeneration: 0.0,
                    movement_speed: 0.2,
                    reach_tolerance: 2.5,
                    jitter: 0.2,
                    avoid_kinds: vec!["td:harrier".into()],
                    attract_kinds: vec!["td:golem".into()],
                    steering: SteeringProfile {
                        avoid_radius: 2.0,
                        avoid_weight: 1.0,
                        attract_radius: 8.0,
                        attract_weight: 0.8,
                        turn_rate: 0.35,
                    },
                    bolt: None,
                    cost: None,
                    bounty: Some(Stockpile::new(0.0, 0.0, 1.0, 1.0)),
                },
                CreatureDefinition {
                    type_id: "td:golem".into(),
                    display_name: "Golem".into(),
                    allegiance: Allegiance::Friendly,
                    locomotion: Locomotion::Walking,
                    max_health: 60.0,
                    regeneration: 0.05,
                    movement_speed: 0.08,
                    reach_tolerance: 2.0,
                    jitter: 0.1,
                    avoid_kinds: vec!["td:golem".into()],
                    attract_kinds: vec![],
                    steering: SteeringProfile {
                        avoid_radius: 2.5,
                        avoid_weight: 2.0,
                        attract_radius: 0.0,
                        attract_weight: 0.0,
                        turn_rate: 0.15,
                    },
                    bolt: Some(BoltSpec {
                        damage: 6.0,
                        speed: 0.6,
                    }),
                    cost: Some(Stockpile::new(0.0, 5.0, 2.0, 0.0)),
                    bounty: None,
                },
            ],
        }
    }

    /// Look up a creature definition by its type identifier.
    pub fn get(&self, type_id: &str) -> Option<&CreatureDefinition> {
        self.creatures.iter().find(|c| c.type_id == type_id)
    }

    /// All known creature definitions.
    pub fn all(&self) -> &[CreatureDefinition] {
        &self.creatures
    }

    /// Register a custom creature kind.
    pub fn register_creature(&mut self, def: CreatureDefinition) {
        self.creatures.push(def);
    }

    /// Single-attribute lookup for collaborators that only need a number.
    pub fn attribute(&self, type_id: &str, name: &str) -> Option<f32> {
        let def = self.get(type_id)?;
        match name {
            "max_health" => Some(def.max_health),
            "regeneration" => Some(def.regeneration),
            "movement_speed" => Some(def.movement_speed),
            "reach_tolerance" => Some(def.reach_tolerance),
            "jitter" => Some(def.jitter),
            _ => None,
        }
    }
}
