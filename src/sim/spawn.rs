//! Enemy spawning and difficulty ramp

use glam::Vec2;
use rand::Rng;

use super::state::{EnemyKind, SimEvent, World};
use crate::tuning::Tuning;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Spawn rate multiplier after `elapsed_secs` survived. Linear, uncapped.
pub fn difficulty_multiplier(elapsed_secs: f64, ramp_secs: f64) -> f64 {
    1.0 + elapsed_secs / ramp_secs
}

/// Time between spawns at the given multiplier
pub fn spawn_interval_ms(base_interval_ms: f64, difficulty: f64) -> f64 {
    base_interval_ms / difficulty
}

/// A point just outside `edge`, at `t` in [0, 1) along it.
///
/// The enemy's whole body starts off-screen.
pub fn edge_position(edge: Edge, t: f32, tuning: &Tuning) -> Vec2 {
    let (w, h, r) = (tuning.arena_width, tuning.arena_height, tuning.enemy_radius);
    match edge {
        Edge::Top => Vec2::new(t * w, -r),
        Edge::Right => Vec2::new(w + r, t * h),
        Edge::Bottom => Vec2::new(t * w, h + r),
        Edge::Left => Vec2::new(-r, t * h),
    }
}

/// Pick a uniformly random edge and position along it
pub fn random_spawn_point<R: Rng>(rng: &mut R, tuning: &Tuning) -> Vec2 {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let t: f32 = rng.random();
    edge_position(edge, t, tuning)
}

/// Refresh the difficulty multiplier from the survival clock
pub fn update_difficulty(world: &mut World) {
    let ramp_secs = world.tuning.difficulty_ramp_secs;
    world.difficulty = difficulty_multiplier(world.elapsed_secs(), ramp_secs);
}

/// World time at which the next spawn becomes due at the current difficulty
pub fn next_spawn_deadline(world: &World) -> f64 {
    world.last_spawn_ms + spawn_interval_ms(world.tuning.base_spawn_interval_ms, world.difficulty)
}

/// Spawn one enemy if the interval has strictly elapsed since the last spawn
pub fn maybe_spawn(world: &mut World) -> Option<u32> {
    if world.time_ms <= next_spawn_deadline(world) {
        return None;
    }
    let pos = random_spawn_point(&mut world.rng, &world.tuning);
    let id = world.spawn_enemy_at(EnemyKind::Normal, pos);
    world.last_spawn_ms = world.time_ms;
    log::debug!(
        "Spawned enemy {} at ({:.0}, {:.0}), difficulty x{:.2}",
        id,
        pos.x,
        pos.y,
        world.difficulty
    );
    world.events.push(SimEvent::EnemySpawned { enemy: id });
    Some(id)
}
