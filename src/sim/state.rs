//! World state and core simulation types
//!
//! The `World` owns every entity. Nothing holds a reference to another
//! entity; interactions are resolved inside `tick::step` by position.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::progression::UpgradeOffer;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World built, waiting for `start`
    NotStarted,
    /// Active gameplay
    Running,
    /// Level-up screen, waiting for an upgrade choice
    ChoosingUpgrade,
    /// Player died. Terminal.
    GameOver,
}

/// Per-axis movement intent for one step, each component in {-1, 0, 1}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub x: i8,
    pub y: i8,
}

/// Auto-attack and movement stats, each independently upgradable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack_damage: f32,
    /// Milliseconds between shots
    pub attack_interval_ms: f32,
    pub attack_range: f32,
    pub projectile_speed: f32,
    pub move_speed: f32,
}

/// The player-controlled head and its trailing tail
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Scaled intent applied last step (zero when standing still)
    pub vel: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    /// Recorded head positions, newest first
    pub tail: Vec<Vec2>,
    pub stats: CombatStats,
    /// World time of the last shot fired (None = never fired)
    pub last_attack_ms: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            vel: Vec2::ZERO,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            level: 1,
            xp: 0,
            xp_to_next_level: tuning.first_level_xp,
            tail: Vec::new(),
            stats: CombatStats {
                attack_damage: tuning.attack_damage,
                attack_interval_ms: tuning.attack_interval_ms,
                attack_range: tuning.attack_range,
                projectile_speed: tuning.projectile_speed,
                move_speed: tuning.player_speed,
            },
            last_attack_ms: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Subtract damage, clamped to `[0, max_health]`. Returns true if this
    /// hit was lethal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount).clamp(0.0, self.max_health);
        !self.is_alive()
    }
}

/// Enemy variants. Only one exists today; stats are looked up per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
}

/// Fixed stats for an enemy kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub xp_reward: u32,
    pub radius: f32,
}

impl EnemyKind {
    pub fn stats(self, tuning: &Tuning) -> EnemyStats {
        match self {
            EnemyKind::Normal => EnemyStats {
                max_health: tuning.enemy_health,
                speed: tuning.enemy_speed,
                damage: tuning.enemy_damage,
                xp_reward: tuning.enemy_xp,
                radius: tuning.enemy_radius,
            },
        }
    }
}

/// A hostile chaser
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub xp_reward: u32,
    pub radius: f32,
    /// World time this enemy last hurt the player
    pub last_hit_ms: Option<f64>,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, tuning: &Tuning) -> Self {
        let stats = kind.stats(tuning);
        Self {
            id,
            kind,
            pos,
            health: stats.max_health,
            max_health: stats.max_health,
            speed: stats.speed,
            damage: stats.damage,
            xp_reward: stats.xp_reward,
            radius: stats.radius,
            last_hit_ms: None,
        }
    }

    /// Whether the contact-damage cooldown has elapsed at `now_ms`
    pub fn can_hit(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        self.last_hit_ms.is_none_or(|t| now_ms - t > cooldown_ms)
    }
}

/// A player shot. Removed on first hit or on leaving the arena.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub radius: f32,
}

/// Experience dropped by a dead enemy
#[derive(Debug, Clone)]
pub struct XpOrb {
    pub id: u32,
    pub pos: Vec2,
    pub value: u32,
    pub radius: f32,
}

/// Things that happened during the last step, for audio/FX collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    AttackFired { target: u32 },
    EnemyHit { enemy: u32, damage: f32 },
    EnemyKilled { enemy: u32, pos: Vec2 },
    PlayerHit { enemy: u32, damage: f32 },
    OrbCollected { value: u32 },
    LevelUp { level: u32 },
    EnemySpawned { enemy: u32 },
    GameOver,
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles in fire order
    pub projectiles: Vec<Projectile>,
    /// Uncollected XP orbs in drop order
    pub orbs: Vec<XpOrb>,
    /// Survival clock (ms), advanced only while running
    pub time_ms: f64,
    pub kills: u32,
    /// World time of the last spawn
    pub last_spawn_ms: f64,
    /// Spawn rate multiplier, `1 + elapsed / ramp`
    pub difficulty: f64,
    /// Upgrade choices on display while `ChoosingUpgrade`
    pub offer: Option<UpgradeOffer>,
    /// Level-ups still waiting for an upgrade choice
    pub pending_level_ups: u32,
    /// Events recorded during the last step
    pub events: Vec<SimEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create a world with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a world with custom tuning. The player starts centered.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let center = Vec2::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0);
        let player = Player::new(center, &tuning);
        Self {
            seed,
            phase: GamePhase::NotStarted,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            orbs: Vec::new(),
            time_ms: 0.0,
            kills: 0,
            last_spawn_ms: 0.0,
            difficulty: 1.0,
            offer: None,
            pending_level_ups: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Elapsed survival time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.time_ms / 1000.0
    }

    /// Place an enemy of the given kind at `pos`
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let enemy = Enemy::new(id, kind, pos, &self.tuning);
        self.enemies.push(enemy);
        id
    }

    /// Drop an XP orb at `pos`
    pub fn drop_orb(&mut self, pos: Vec2, value: u32) -> u32 {
        let id = self.next_entity_id();
        let radius = self.tuning.orb_radius;
        self.orbs.push(XpOrb {
            id,
            pos,
            value,
            radius,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_defaults() {
        let world = World::new(7);
        assert_eq!(world.phase, GamePhase::NotStarted);
        assert_eq!(world.player.pos, Vec2::new(600.0, 400.0));
        assert_eq!(world.player.level, 1);
        assert_eq!(world.player.health, world.player.max_health);
        assert_eq!(world.player.xp_to_next_level, 100);
        assert!(world.player.tail.is_empty());
        assert!(world.enemies.is_empty());
        assert_eq!(world.difficulty, 1.0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = World::new(1);
        let a = world.spawn_enemy_at(EnemyKind::Normal, Vec2::ZERO);
        let b = world.drop_orb(Vec2::ZERO, 10);
        let c = world.spawn_enemy_at(EnemyKind::Normal, Vec2::ONE);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_player_damage_clamps_at_zero() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        assert!(!player.take_damage(40.0));
        assert_eq!(player.health, 60.0);
        assert!(player.take_damage(500.0));
        assert_eq!(player.health, 0.0);
        // Already dead: no second lethal report
        assert!(!player.take_damage(5.0));
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_negative_damage_never_overheals() {
        let mut player = Player::new(Vec2::ZERO, &Tuning::default());
        player.health = 98.0;
        assert!(!player.take_damage(-5.0));
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn test_enemy_cooldown_is_strict() {
        let mut enemy = Enemy::new(1, EnemyKind::Normal, Vec2::ZERO, &Tuning::default());
        assert!(enemy.can_hit(0.0, 500.0));
        enemy.last_hit_ms = Some(1000.0);
        assert!(!enemy.can_hit(1400.0, 500.0));
        assert!(!enemy.can_hit(1500.0, 500.0));
        assert!(enemy.can_hit(1500.5, 500.0));
    }
}
