//! Gridstep Demo
//!
//! Runs a short scripted level: the player chops through a wall while an
//! enemy closes in, then the run is replayed to confirm both end in the
//! same state.
//!
//! Usage: `gridstep [mover-config.json]`

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gridstep::{
    TICK_RATE, VERSION,
    actors::{Enemy, FoodSupply, Player},
    core::hash::StateHash,
    movement::{run_until_idle, FixedStepClock, Movable, MoveEvent},
    GridWorld, Layer, MoverConfig,
};

/// Player steps, one per turn.
const SCRIPT: &[(i32, i32)] = &[(1, 0), (1, 0), (1, 0), (1, 0), (0, -1), (1, 0), (1, 0), (0, 1), (1, 0)];

/// Frames allowed per transition before giving up.
const MAX_FRAMES: u32 = 10 * TICK_RATE;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Gridstep v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => MoverConfig::load(&path)
            .with_context(|| format!("loading mover config from {}", path))?,
        None => MoverConfig::default(),
    };
    info!("Mover config: {:?}", config);

    info!("=== Running Demo Level ===");
    let first = run_level(&config, true)?;
    info!("Final State Hash: {}", hex::encode(first));

    info!("=== Verifying Determinism ===");
    let replay = run_level(&config, false)?;
    if first != replay {
        bail!(
            "Replay diverged: {} vs {}",
            hex::encode(first),
            hex::encode(replay)
        );
    }
    info!("Replay matches");
    Ok(())
}

/// Build the level, play the script, and return the final world hash.
fn run_level(config: &MoverConfig, log_events: bool) -> anyhow::Result<StateHash> {
    let mut world = GridWorld::new();

    let player_id = world.spawn((0, 0), Layer::BLOCKING);
    world.attach_food_supply(player_id, FoodSupply::new(20));
    let mut player = Player::new(player_id, config.clone(), 1)?;

    world.spawn_wall((2, 0), 2);
    world.spawn((4, 1), Layer::BLOCKING); // rubble, no capability
    world.spawn((5, 0), Layer::ITEMS); // soda, walked over

    let enemy_id = world.spawn((6, 3), Layer::BLOCKING);
    let mut enemy = Enemy::new(enemy_id, config.clone(), 5)?;

    let mut clock = FixedStepClock::default();

    for (turn, &(dx, dy)) in SCRIPT.iter().enumerate() {
        let outcome = player.step(&mut world, dx, dy)?;
        run_until_idle(player.mover_mut(), &mut world, &mut clock, MAX_FRAMES)?;
        world.clear_broken();

        let enemy_outcome = enemy.take_turn(&mut world, player_id)?;
        run_until_idle(enemy.mover_mut(), &mut world, &mut clock, MAX_FRAMES)?;

        if log_events {
            info!("Turn {}: player {:?}, enemy {:?}", turn, outcome, enemy_outcome);
            for event in player.mover_mut().take_events().into_iter().chain(enemy.mover_mut().take_events()) {
                log_event(&event);
            }
        }

        if world.food_supply(player_id).is_some_and(FoodSupply::is_starving) {
            info!("Player starved on turn {}", turn);
            break;
        }
    }

    if log_events {
        let food = world.food_supply(player_id).map(|f| f.food).unwrap_or(0);
        info!(
            "Frames: {}, walls chopped: {}, food left: {}",
            clock.frames(),
            player.walls_hit,
            food
        );
    }

    Ok(world.compute_hash())
}

fn log_event(event: &MoveEvent) {
    match event {
        MoveEvent::Started { entity, from, to } => info!("  {} moving {} -> {}", entity, from, to),
        MoveEvent::Blocked { entity, target, by } => info!("  {} blocked at {} by {}", entity, target, by),
        MoveEvent::Completed { entity, at } => info!("  {} arrived at {}", entity, at),
        MoveEvent::Ignored { entity } => info!("  {} busy, step ignored", entity),
        MoveEvent::Restarted { entity, snapped_to } => info!("  {} snapped to {}", entity, snapped_to),
    }
}
