//! Tail Arena headless driver
//!
//! Runs a seeded game with a simple kiting autopilot and prints the run
//! summary as JSON. Useful for balance checks without a frontend.
//!
//! Usage: `tail-arena [seed] [max_seconds]`

use tail_arena::RunSummary;
use tail_arena::sim::{DirectionKeys, GamePhase, StepInput, World, WorldSnapshot, step};

/// Roughly one 60 Hz display frame
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Enemies closer than this are fled from
const FLEE_RADIUS: f32 = 160.0;

/// Move away from the nearest close enemy, otherwise drift toward the center
fn autopilot(snapshot: &WorldSnapshot, arena_center: glam::Vec2) -> StepInput {
    let player = snapshot.player.pos;
    let threat = snapshot
        .enemies
        .iter()
        .map(|e| e.pos)
        .filter(|p| p.distance(player) < FLEE_RADIUS)
        .min_by(|a, b| {
            a.distance(player)
                .partial_cmp(&b.distance(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let dir = match threat {
        Some(pos) => player - pos,
        None => arena_center - player,
    };
    if dir.length() < 4.0 {
        return StepInput::default();
    }
    StepInput {
        keys: DirectionKeys {
            up: dir.y < -1.0,
            down: dir.y > 1.0,
            left: dir.x < -1.0,
            right: dir.x > 1.0,
        },
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    match args.get(idx) {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring unparseable argument {:?}", raw);
                default
            }
        },
        None => default,
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = parse_arg(&args, 1, 12345);
    let max_secs: f64 = parse_arg(&args, 2, 600.0);

    log::info!("Tail Arena (headless) starting with seed {}", seed);
    let mut world = World::new(seed);
    if let Err(e) = world.start() {
        log::error!("Failed to start run: {}", e);
        return;
    }

    let center = glam::Vec2::new(world.tuning.arena_width, world.tuning.arena_height) / 2.0;
    let mut next_report = 60.0;
    while !world.is_game_over() && world.elapsed_secs() < max_secs {
        let input = autopilot(&world.snapshot(), center);
        step(&mut world, &input, FRAME_MS);

        if world.phase == GamePhase::ChoosingUpgrade {
            if let Err(e) = world.choose_upgrade(0) {
                log::error!("Upgrade selection failed: {}", e);
                break;
            }
        }
        if world.elapsed_secs() >= next_report {
            log::info!(
                "{}: level {}, {} kills, {} enemies alive, health {}/{}",
                tail_arena::format_clock(world.elapsed_secs()),
                world.player.level,
                world.kills,
                world.enemies.len(),
                world.player.health,
                world.player.max_health
            );
            next_report += 60.0;
        }
    }

    let summary = RunSummary::from_world(&world);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}
