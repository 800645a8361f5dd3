mod config;

use config::SimConfig;
use glam::Vec2;
use td_rs_game::game_world::{GameEvent, GameWorld, WorldBounds};
use td_rs_game::resources::Stockpile;
use td_rs_game::spawner::Spawner;
use td_rs_game::stats::StatKind;
use td_rs_nav::graph::GridGraph;
use tracing::{debug, info};

fn main() {
    let config = match SimConfig::load("sim.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load sim.toml: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "td-rs sim v{} — {}x{} world, {} ticks, seed {}",
        env!("CARGO_PKG_VERSION"),
        config.world.width,
        config.world.height,
        config.sim.ticks,
        config.sim.seed
    );

    let mut graph = GridGraph::new(config.world.width, config.world.height);
    for [x0, y0, x1, y1] in &config.world.walls {
        graph.block_rect(*x0, *y0, *x1, *y1);
    }

    let bounds = WorldBounds {
        min: Vec2::ZERO,
        max: Vec2::new(config.world.width as f32, config.world.height as f32),
    };

    let mut gw = GameWorld::new(Box::new(graph), bounds, config.sim.seed);
    gw.set_stockpile(Stockpile::new(
        config.economy.wood,
        config.economy.stone,
        config.economy.iron,
        config.economy.food,
    ));

    for (index, section) in config.spawners.iter().enumerate() {
        info!(
            "spawner {}: {} at ({}, {}), capacity {}, every {} ticks",
            index + 1,
            section.kind,
            section.x,
            section.y,
            section.capacity,
            section.interval
        );
        gw.add_spawner(Spawner::new(
            index as u64 + 1,
            section.kind.clone(),
            Vec2::new(section.x, section.y),
            section.capacity,
            section.interval,
        ));
    }

    for _ in 0..config.sim.ticks {
        gw.tick();

        for event in gw.drain_events() {
            match event {
                GameEvent::CreatureSpawned {
                    actor_id,
                    ref kind,
                    position,
                    ..
                } => debug!("spawned {kind} #{actor_id} at {position:?}"),
                GameEvent::CreatureDied { actor_id, ref kind } => {
                    info!("{kind} #{actor_id} died")
                }
                GameEvent::DestinationReached { actor_id, position } => {
                    debug!("#{actor_id} reached {position:?}")
                }
                GameEvent::BoltHit {
                    shooter,
                    target,
                    damage,
                } => debug!("bolt from #{shooter} hit #{target} for {damage}"),
                _ => {}
            }
        }

        let tick = gw.current_tick();
        if config.sim.report_interval > 0 && tick % config.sim.report_interval == 0 {
            let population = gw.live_creature_count();
            let pile = gw.stockpile();
            info!(
                "tick {tick}: {population} creatures, stockpile {:.0}w/{:.0}s/{:.0}i/{:.0}f",
                pile.wood, pile.stone, pile.iron, pile.food
            );
        }
    }

    let stats = gw.statistics();
    info!(
        "done: {} spawned, {} enemies slain, {} minions lost, {} bolts fired",
        stats.value(StatKind::CreaturesSpawned),
        stats.value(StatKind::EnemiesSlain),
        stats.value(StatKind::MinionsLost),
        stats.value(StatKind::BoltsFired)
    );
}
