//! Variable-timestep simulation step
//!
//! Advances the world by one externally driven tick. Entity speeds are per
//! step; the elapsed time only drives the clock, cooldowns and spawning.

use thiserror::Error;

use super::combat::{try_auto_attack, update_enemies, update_projectiles};
use super::movement::{DirectionKeys, move_player};
use super::progression::{UpgradeKind, apply_upgrade, open_offer, update_orbs};
use super::spawn::{maybe_spawn, update_difficulty};
use super::state::{GamePhase, World};

/// Input for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    /// Movement directions currently held
    pub keys: DirectionKeys,
}

/// Misuse of the world's phase transitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("run already started (phase {0:?})")]
    AlreadyStarted(GamePhase),
    #[error("no upgrade choice pending (phase {0:?})")]
    NotChoosingUpgrade(GamePhase),
    #[error("upgrade choice {index} out of range ({offered} offered)")]
    InvalidChoice { index: usize, offered: usize },
}

impl World {
    /// Begin the run
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.phase != GamePhase::NotStarted {
            return Err(SimError::AlreadyStarted(self.phase));
        }
        self.phase = GamePhase::Running;
        log::info!("Run started with seed {}", self.seed);
        Ok(())
    }

    /// Apply the upgrade at `index` of the current offer and resume.
    ///
    /// If further level-ups are queued a new offer is rolled and the world
    /// stays paused.
    pub fn choose_upgrade(&mut self, index: usize) -> Result<UpgradeKind, SimError> {
        if self.phase != GamePhase::ChoosingUpgrade {
            return Err(SimError::NotChoosingUpgrade(self.phase));
        }
        let offered = self.offer.as_ref().map_or(0, |o| o.choices.len());
        let kind = self
            .offer
            .as_ref()
            .and_then(|o| o.choices.get(index).copied())
            .ok_or(SimError::InvalidChoice { index, offered })?;

        apply_upgrade(&mut self.player, kind);
        log::info!("Upgrade chosen: {}", kind.upgrade().name);
        self.pending_level_ups = self.pending_level_ups.saturating_sub(1);
        if self.pending_level_ups > 0 {
            open_offer(self);
        } else {
            self.offer = None;
            self.phase = GamePhase::Running;
        }
        Ok(kind)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Advance the world by one step of `dt_ms` milliseconds.
///
/// Only a running world changes; every other phase is frozen. Negative or
/// non-finite `dt_ms` counts as zero.
pub fn step(world: &mut World, input: &StepInput, dt_ms: f64) {
    world.events.clear();
    if world.phase != GamePhase::Running {
        return;
    }

    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    world.time_ms += dt_ms;
    update_difficulty(world);

    move_player(world, input.keys.intent());
    try_auto_attack(world);

    update_enemies(world);
    if world.phase == GamePhase::GameOver {
        return;
    }

    update_projectiles(world);
    update_orbs(world);
    maybe_spawn(world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyKind, SimEvent};
    use glam::Vec2;
    use std::collections::HashSet;

    const DT: f64 = 16.0;

    fn started(seed: u64) -> World {
        let mut world = World::new(seed);
        world.start().unwrap();
        world
    }

    fn right() -> StepInput {
        StepInput {
            keys: DirectionKeys {
                right: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_not_started_is_frozen() {
        let mut world = World::new(1);
        step(&mut world, &right(), DT);
        assert_eq!(world.time_ms, 0.0);
        assert_eq!(world.player.pos, Vec2::new(600.0, 400.0));

        world.start().unwrap();
        assert_eq!(world.start(), Err(SimError::AlreadyStarted(GamePhase::Running)));
        step(&mut world, &right(), DT);
        assert_eq!(world.time_ms, DT);
        assert_eq!(world.player.pos, Vec2::new(603.0, 400.0));
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut world = started(1);
        step(&mut world, &StepInput::default(), f64::NAN);
        step(&mut world, &StepInput::default(), -50.0);
        step(&mut world, &StepInput::default(), f64::INFINITY);
        assert_eq!(world.time_ms, 0.0);
    }

    #[test]
    fn test_attack_cycle_damages_enemy() {
        let mut world = started(1);
        let id = world.spawn_enemy_at(EnemyKind::Normal, Vec2::new(700.0, 400.0));

        step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.projectiles.len(), 1);

        for _ in 0..30 {
            if world.projectiles.is_empty() {
                break;
            }
            step(&mut world, &StepInput::default(), DT);
        }
        assert!(world.projectiles.is_empty());
        let enemy = world.enemies.iter().find(|e| e.id == id).unwrap();
        assert_eq!(enemy.health, 10.0);
        assert_eq!(world.player.health, world.player.max_health);
    }

    #[test]
    fn test_two_hits_kill_and_drop_orb() {
        let mut world = started(1);
        world.spawn_enemy_at(EnemyKind::Normal, Vec2::new(700.0, 400.0));
        world.enemies[0].speed = 0.0;
        for _ in 0..100 {
            step(&mut world, &StepInput::default(), DT);
        }
        assert!(world.enemies.iter().all(|e| e.pos != Vec2::new(700.0, 400.0)));
        assert_eq!(world.kills, 1);
        assert!(world.orbs.iter().any(|o| o.pos == Vec2::new(700.0, 400.0)));
    }

    #[test]
    fn test_level_up_pauses_and_choice_resumes() {
        let mut world = started(2);
        world.player.xp = 90;
        let pos = world.player.pos;
        world.drop_orb(pos, 15);

        step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.player.level, 2);
        assert_eq!(world.player.xp, 5);
        assert_eq!(world.player.xp_to_next_level, 150);
        assert_eq!(world.phase, GamePhase::ChoosingUpgrade);

        let offer = world.offer.clone().unwrap();
        assert_eq!(offer.choices.len(), 3);
        let unique: HashSet<_> = offer.choices.iter().collect();
        assert_eq!(unique.len(), 3);

        // Frozen while choosing
        let time = world.time_ms;
        step(&mut world, &right(), DT);
        assert_eq!(world.time_ms, time);
        assert_eq!(world.player.pos, pos);

        assert_eq!(
            world.choose_upgrade(3),
            Err(SimError::InvalidChoice { index: 3, offered: 3 })
        );
        let chosen = world.choose_upgrade(1).unwrap();
        assert_eq!(chosen, offer.choices[1]);
        assert_eq!(world.phase, GamePhase::Running);
        assert!(world.offer.is_none());
        assert_eq!(
            world.choose_upgrade(0),
            Err(SimError::NotChoosingUpgrade(GamePhase::Running))
        );
    }

    #[test]
    fn test_queued_level_ups_roll_new_offers() {
        let mut world = started(4);
        let pos = world.player.pos;
        world.drop_orb(pos, 100);
        world.drop_orb(pos, 150);
        step(&mut world, &StepInput::default(), DT);
        assert_eq!(world.player.level, 3);
        assert_eq!(world.pending_level_ups, 2);

        world.choose_upgrade(0).unwrap();
        assert_eq!(world.phase, GamePhase::ChoosingUpgrade);
        assert!(world.offer.is_some());
        world.choose_upgrade(0).unwrap();
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut world = started(3);
        world.player.health = 5.0;
        let pos = world.player.pos;
        world.spawn_enemy_at(EnemyKind::Normal, pos);

        step(&mut world, &StepInput::default(), DT);
        assert!(world.is_game_over());
        assert_eq!(world.player.health, 0.0);
        assert!(world.events.contains(&SimEvent::GameOver));

        let time = world.time_ms;
        for _ in 0..10 {
            step(&mut world, &right(), DT);
        }
        assert!(world.is_game_over());
        assert_eq!(world.time_ms, time);
        assert!(world.events.is_empty());
        assert!(world.start().is_err());
    }

    #[test]
    fn test_first_spawn_uses_ramped_interval() {
        let mut world = started(8);
        while world.enemies.is_empty() {
            step(&mut world, &StepInput::default(), DT);
            assert!(world.time_ms <= 2000.0);
        }
        // At 1936ms the interval is ~1937.5ms, at 1952ms it is ~1937.0ms
        assert_eq!(world.time_ms, 1952.0);
        assert_eq!(world.last_spawn_ms, 1952.0);
        assert!(world.events.iter().any(|e| matches!(e, SimEvent::EnemySpawned { .. })));
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99999);
        let mut b = started(99999);
        let inputs = [right(), StepInput::default(), right()];
        for i in 0..3000 {
            let input = &inputs[i % inputs.len()];
            for world in [&mut a, &mut b] {
                step(world, input, DT);
                if world.phase == GamePhase::ChoosingUpgrade {
                    world.choose_upgrade(0).unwrap();
                }
            }
        }
        assert_eq!(a.time_ms, b.time_ms);
        assert_eq!(a.kills, b.kills);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.health, b.player.health);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
    }
}
