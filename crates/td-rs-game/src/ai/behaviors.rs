//! Behavior implementations for creature kinds.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::behavior::{BehaviorContext, BehaviorOutput, CreatureBehavior};

// ---------------------------------------------------------------------------
// SeekRandomTarget — hunt a uniformly random live actor of one kind
// ---------------------------------------------------------------------------

/// Whenever idle, picks a uniformly random live actor of the target kind and
/// pushes its position as the new destination. An empty target population
/// leaves the creature idle for this tick.
#[derive(Debug)]
pub struct SeekRandomTarget {
    target_kind: String,
}

impl SeekRandomTarget {
    pub fn new(target_kind: impl Into<String>) -> Self {
        Self {
            target_kind: target_kind.into(),
        }
    }
}

impl CreatureBehavior for SeekRandomTarget {
    fn update(&mut self, ctx: &BehaviorContext, rng: &mut StdRng) -> BehaviorOutput {
        if !self.is_idle(ctx) {
            return BehaviorOutput::default();
        }
        let candidates: Vec<&super::behavior::ActorSnapshot> = ctx
            .actors
            .iter()
            .filter(|a| a.kind == self.target_kind && a.actor_id != ctx.actor_id)
            .collect();
        match candidates.choose(rng) {
            Some(target) => BehaviorOutput {
                push_destination: Some(target.position),
                ..Default::default()
            },
            None => BehaviorOutput::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// SeekAndShoot — SeekRandomTarget plus a bolt cooldown
// ---------------------------------------------------------------------------

/// Seeks random targets like [`SeekRandomTarget`] and additionally fires a
/// bolt at the nearest actor of a fire kind in range, on a cooldown.
#[derive(Debug)]
pub struct SeekAndShoot {
    target_kind: String,
    fire_kinds: Vec<String>,
    fire_range: f32,
    /// Ticks between bolts.
    cooldown: u64,
    /// Tick the last bolt left. Scratch state for the cooldown.
    last_fired: u64,
}

impl SeekAndShoot {
    pub fn new(
        target_kind: impl Into<String>,
        fire_kinds: Vec<String>,
        fire_range: f32,
        cooldown: u64,
    ) -> Self {
        Self {
            target_kind: target_kind.into(),
            fire_kinds,
            fire_range,
            cooldown,
            last_fired: 0,
        }
    }

    fn nearest_in_range(&self, ctx: &BehaviorContext) -> Option<Vec2> {
        ctx.actors
            .iter()
            .filter(|a| a.actor_id != ctx.actor_id && self.fire_kinds.iter().any(|k| *k == a.kind))
            .map(|a| (a.position, ctx.position.distance(a.position)))
            .filter(|(_, dist)| *dist <= self.fire_range)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(pos, _)| pos)
    }
}

impl CreatureBehavior for SeekAndShoot {
    fn update(&mut self, ctx: &BehaviorContext, rng: &mut StdRng) -> BehaviorOutput {
        let mut output = BehaviorOutput::default();

        if self.is_idle(ctx) {
            let candidates: Vec<&super::behavior::ActorSnapshot> = ctx
                .actors
                .iter()
                .filter(|a| a.kind == self.target_kind && a.actor_id != ctx.actor_id)
                .collect();
            if let Some(target) = candidates.choose(rng) {
                output.push_destination = Some(target.position);
            }
        }

        let ready = ctx.current_tick.saturating_sub(self.last_fired) >= self.cooldown;
        if ready {
            if let Some(at) = self.nearest_in_range(ctx) {
                output.fire_at = Some(at);
                self.last_fired = ctx.current_tick;
            }
        }

        output
    }
}

// ---------------------------------------------------------------------------
// HoldPosition — fallback for unknown kinds
// ---------------------------------------------------------------------------

/// Never schedules destinations; the creature stands where it spawned.
#[derive(Debug, Default)]
pub struct HoldPosition;

impl CreatureBehavior for HoldPosition {
    fn update(&mut self, _ctx: &BehaviorContext, _rng: &mut StdRng) -> BehaviorOutput {
        BehaviorOutput::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::behavior::ActorSnapshot;
    use rand::SeedableRng;

    fn ctx<'a>(destinations: &'a [Vec2], actors: &'a [ActorSnapshot]) -> BehaviorContext<'a> {
        BehaviorContext {
            actor_id: 1,
            kind: "td:raider",
            position: Vec2::new(0.0, 0.0),
            current_tick: 100,
            destinations,
            actors,
        }
    }

    fn golem_at(actor_id: u64, x: f32, y: f32) -> ActorSnapshot {
        ActorSnapshot {
            actor_id,
            kind: "td:golem".into(),
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn seek_pushes_destination_when_idle() {
        let mut seek = SeekRandomTarget::new("td:golem");
        let actors = vec![golem_at(7, 4.0, 4.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let output = seek.update(&ctx(&[], &actors), &mut rng);
        assert_eq!(output.push_destination, Some(Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn seek_stays_idle_with_no_population() {
        let mut seek = SeekRandomTarget::new("td:golem");
        let actors = vec![ActorSnapshot {
            actor_id: 9,
            kind: "td:raider".into(),
            position: Vec2::new(1.0, 1.0),
        }];
        let mut rng = StdRng::seed_from_u64(1);
        let output = seek.update(&ctx(&[], &actors), &mut rng);
        assert!(output.push_destination.is_none());
    }

    #[test]
    fn seek_skips_update_when_busy() {
        let mut seek = SeekRandomTarget::new("td:golem");
        let actors = vec![golem_at(7, 4.0, 4.0)];
        let destinations = vec![Vec2::new(9.0, 9.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let output = seek.update(&ctx(&destinations, &actors), &mut rng);
        assert!(output.push_destination.is_none());
    }

    #[test]
    fn seek_never_targets_self() {
        let mut seek = SeekRandomTarget::new("td:raider");
        let actors = vec![ActorSnapshot {
            actor_id: 1, // same as ctx.actor_id
            kind: "td:raider".into(),
            position: Vec2::new(3.0, 3.0),
        }];
        let mut rng = StdRng::seed_from_u64(1);
        let output = seek.update(&ctx(&[], &actors), &mut rng);
        assert!(output.push_destination.is_none());
    }

    #[test]
    fn seek_same_seed_same_choice() {
        let actors: Vec<ActorSnapshot> = (0..8).map(|i| golem_at(10 + i, i as f32, 0.0)).collect();
        let mut a = SeekRandomTarget::new("td:golem");
        let mut b = SeekRandomTarget::new("td:golem");
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let out_a = a.update(&ctx(&[], &actors), &mut rng_a);
        let out_b = b.update(&ctx(&[], &actors), &mut rng_b);
        assert_eq!(out_a.push_destination, out_b.push_destination);
    }

    #[test]
    fn shoot_fires_at_nearest_in_range() {
        let mut shoot = SeekAndShoot::new("td:raider", vec!["td:golem".into()], 8.0, 30);
        let actors = vec![golem_at(7, 3.0, 0.0), golem_at(8, 6.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let output = shoot.update(&ctx(&[], &actors), &mut rng);
        assert_eq!(output.fire_at, Some(Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn shoot_respects_cooldown() {
        let mut shoot = SeekAndShoot::new("td:raider", vec!["td:golem".into()], 8.0, 30);
        let actors = vec![golem_at(7, 3.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(1);

        let destinations = vec![Vec2::new(9.0, 9.0)];
        let first = shoot.update(&ctx(&destinations, &actors), &mut rng);
        assert!(first.fire_at.is_some());

        // Same tick again: cooldown not yet elapsed.
        let second = shoot.update(&ctx(&destinations, &actors), &mut rng);
        assert!(second.fire_at.is_none());
    }

    #[test]
    fn shoot_holds_fire_out_of_range() {
        let mut shoot = SeekAndShoot::new("td:raider", vec!["td:golem".into()], 8.0, 30);
        let actors = vec![golem_at(7, 20.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let destinations = vec![Vec2::new(9.0, 9.0)];
        let output = shoot.update(&ctx(&destinations, &actors), &mut rng);
        assert!(output.fire_at.is_none());
    }

    #[test]
    fn hold_position_never_schedules() {
        let mut hold = HoldPosition;
        let actors = vec![golem_at(7, 4.0, 4.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let output = hold.update(&ctx(&[], &actors), &mut rng);
        assert!(output.push_destination.is_none());
        assert!(output.fire_at.is_none());
    }
}
