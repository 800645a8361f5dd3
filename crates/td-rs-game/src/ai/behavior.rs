//! Per-kind creature decision contract.

use glam::Vec2;
use rand::rngs::StdRng;

/// A live actor visible to behavior decisions.
#[derive(Debug, Clone)]
pub struct ActorSnapshot {
    pub actor_id: u64,
    pub kind: String,
    pub position: Vec2,
}

/// Read-only view handed to a behavior each tick.
#[derive(Debug)]
pub struct BehaviorContext<'a> {
    pub actor_id: u64,
    pub kind: &'a str,
    pub position: Vec2,
    pub current_tick: u64,
    /// The creature's destination stack, top last.
    pub destinations: &'a [Vec2],
    /// Snapshot of all live creatures this tick.
    pub actors: &'a [ActorSnapshot],
}

/// Actions a behavior requests; the AI system applies them after evaluation.
#[derive(Debug, Default)]
pub struct BehaviorOutput {
    /// New destination to push onto the stack.
    pub push_destination: Option<Vec2>,
    /// Launch a bolt toward this point.
    pub fire_at: Option<Vec2>,
}

/// Decision logic attached one-to-one to a creature.
pub trait CreatureBehavior: Send + Sync + std::fmt::Debug {
    /// One-time setup when attached to a creature.
    fn initialize(&mut self) {}

    /// Invoked once per tick, after movement and steering have resolved.
    fn update(&mut self, ctx: &BehaviorContext, rng: &mut StdRng) -> BehaviorOutput;

    /// Invoked when the active destination has been fully consumed. The
    /// default leaves the creature to schedule new work on its next update.
    fn on_reached_destination(&mut self, _ctx: &BehaviorContext) -> BehaviorOutput {
        BehaviorOutput::default()
    }

    /// Invoked as part of the death transition. Upstream triggering has a
    /// known double-invocation hazard, so implementations must tolerate
    /// repeated calls.
    fn on_creature_dies(&mut self) {}

    /// Whether the creature has nothing scheduled. Pure; no side effects.
    fn is_idle(&self, ctx: &BehaviorContext) -> bool {
        ctx.destinations.is_empty()
    }
}
