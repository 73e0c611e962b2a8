//! Auto-attack targeting, contact damage and projectile hits
//!
//! Enemies are always scanned in spawn order, which makes every tie-break
//! (nearest target, first enemy hit by a projectile) reproducible.

use glam::Vec2;

use super::collision::{circles_overlap, first_segment_hit, step_toward};
use super::state::{Enemy, GamePhase, Projectile, SimEvent, World};
use crate::in_arena;

/// Nearest enemy strictly inside `range`. Ties go to the earliest spawned.
pub fn find_target(from: Vec2, range: f32, enemies: &[Enemy]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, enemy) in enemies.iter().enumerate() {
        let dist = from.distance(enemy.pos);
        if dist >= range {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Fire at the nearest enemy in range if the attack interval has elapsed.
///
/// Without a target nothing is fired and the attack timer is left alone, so
/// the scan is retried on every following step.
pub fn try_auto_attack(world: &mut World) -> Option<u32> {
    let now = world.time_ms;
    let player = &world.player;
    let interval = f64::from(player.stats.attack_interval_ms);
    if player.last_attack_ms.is_some_and(|last| now - last < interval) {
        return None;
    }

    let target_idx = find_target(player.pos, player.stats.attack_range, &world.enemies)?;
    let target = &world.enemies[target_idx];
    let target_id = target.id;
    let origin = player.pos;
    let dir = target.pos - origin;
    let vel = Vec2::from_angle(dir.y.atan2(dir.x)) * player.stats.projectile_speed;
    let damage = player.stats.attack_damage;
    let radius = world.tuning.projectile_radius;

    let id = world.next_entity_id();
    world.projectiles.push(Projectile {
        id,
        pos: origin,
        vel,
        damage,
        radius,
    });
    world.player.last_attack_ms = Some(now);
    log::trace!("Fired projectile {} at enemy {}", id, target_id);
    world.events.push(SimEvent::AttackFired { target: target_id });
    Some(id)
}

/// Apply damage to the enemy at `idx`, killing it if health drops to zero.
///
/// A kill removes the enemy, drops its XP orb and counts the kill before
/// returning. Returns true on a kill.
pub fn damage_enemy(world: &mut World, idx: usize, amount: f32) -> bool {
    let enemy = &mut world.enemies[idx];
    enemy.health = (enemy.health - amount).max(0.0);
    let id = enemy.id;
    world.events.push(SimEvent::EnemyHit { enemy: id, damage: amount });
    if world.enemies[idx].health > 0.0 {
        return false;
    }

    let dead = world.enemies.remove(idx);
    world.drop_orb(dead.pos, dead.xp_reward);
    world.kills += 1;
    log::debug!("Enemy {} killed ({} total)", dead.id, world.kills);
    world.events.push(SimEvent::EnemyKilled {
        enemy: dead.id,
        pos: dead.pos,
    });
    true
}

/// Hurt the player. Moves the world to game over on the lethal hit only.
pub fn damage_player(world: &mut World, enemy_id: u32, amount: f32) {
    if world.phase == GamePhase::GameOver {
        return;
    }
    let lethal = world.player.take_damage(amount);
    world.events.push(SimEvent::PlayerHit {
        enemy: enemy_id,
        damage: amount,
    });
    if lethal {
        world.phase = GamePhase::GameOver;
        world.offer = None;
        log::info!(
            "Game over at {:.1}s: level {}, {} kills",
            world.elapsed_secs(),
            world.player.level,
            world.kills
        );
        world.events.push(SimEvent::GameOver);
    }
}

/// Move every enemy toward the player, then resolve contact damage.
///
/// Touching the head or any tail segment counts as one contact, gated by the
/// enemy's cooldown, so one enemy lands at most one hit per step and per
/// cooldown window. Stops early once the player is dead.
pub fn update_enemies(world: &mut World) {
    let now = world.time_ms;
    let cooldown = world.tuning.enemy_damage_cooldown_ms;
    let segment_radius = world.tuning.segment_radius;

    for idx in 0..world.enemies.len() {
        let target = world.player.pos;
        let enemy = &mut world.enemies[idx];
        enemy.pos = step_toward(enemy.pos, target, enemy.speed);

        let player = &world.player;
        let touching = circles_overlap(enemy.pos, enemy.radius, player.pos, player.radius)
            || first_segment_hit(enemy.pos, enemy.radius, &player.tail, segment_radius).is_some();
        if !touching || !enemy.can_hit(now, cooldown) {
            continue;
        }

        enemy.last_hit_ms = Some(now);
        let (id, damage) = (enemy.id, enemy.damage);
        damage_player(world, id, damage);
        if world.phase == GamePhase::GameOver {
            return;
        }
    }
}

/// Advance projectiles and resolve hits.
///
/// Walks projectiles back to front so removals never skip an element. A
/// projectile that leaves the arena is discarded before any hit test; one
/// that overlaps enemies damages only the first in spawn order.
pub fn update_projectiles(world: &mut World) {
    let (w, h) = (world.tuning.arena_width, world.tuning.arena_height);

    for i in (0..world.projectiles.len()).rev() {
        let proj = &mut world.projectiles[i];
        proj.pos += proj.vel;
        if !in_arena(proj.pos, w, h) {
            world.projectiles.remove(i);
            continue;
        }

        let (pos, radius, damage) = (proj.pos, proj.radius, proj.damage);
        let hit = world
            .enemies
            .iter()
            .position(|e| circles_overlap(pos, radius, e.pos, e.radius));
        if let Some(enemy_idx) = hit {
            world.projectiles.remove(i);
            damage_enemy(world, enemy_idx, damage);
        }
    }
}
