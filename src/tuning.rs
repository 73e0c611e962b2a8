//! Game balance tuning
//!
//! Every number the simulation reads lives here so a frontend can ship
//! alternative balance as JSON without touching code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::progression::CATALOG;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Radii ===
    pub player_radius: f32,
    pub segment_radius: f32,
    pub enemy_radius: f32,
    pub orb_radius: f32,
    pub projectile_radius: f32,

    // === Player ===
    /// Pixels per step at full axial input
    pub player_speed: f32,
    pub player_max_health: f32,
    /// XP required to reach level 2
    pub first_level_xp: u32,
    /// Tail cap grows by this many segments per level gained
    pub segments_per_level: usize,

    // === Auto-attack ===
    pub attack_damage: f32,
    pub attack_interval_ms: f32,
    pub attack_range: f32,
    /// Pixels per step
    pub projectile_speed: f32,

    // === Enemies ===
    pub enemy_health: f32,
    pub enemy_speed: f32,
    pub enemy_damage: f32,
    pub enemy_xp: u32,
    pub enemy_damage_cooldown_ms: f64,

    // === XP orbs ===
    pub orb_magnet_radius: f32,
    pub orb_pull_speed: f32,

    // === Spawning ===
    pub base_spawn_interval_ms: f64,
    pub difficulty_ramp_secs: f64,

    // === Progression ===
    pub upgrade_choices: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_radius: PLAYER_RADIUS,
            segment_radius: SEGMENT_RADIUS,
            enemy_radius: ENEMY_RADIUS,
            orb_radius: XP_ORB_RADIUS,
            projectile_radius: PROJECTILE_RADIUS,

            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            first_level_xp: FIRST_LEVEL_XP,
            segments_per_level: SEGMENTS_PER_LEVEL,

            attack_damage: ATTACK_DAMAGE,
            attack_interval_ms: ATTACK_INTERVAL_MS,
            attack_range: ATTACK_RANGE,
            projectile_speed: PROJECTILE_SPEED,

            enemy_health: ENEMY_HEALTH,
            enemy_speed: ENEMY_SPEED,
            enemy_damage: ENEMY_DAMAGE,
            enemy_xp: ENEMY_XP,
            enemy_damage_cooldown_ms: ENEMY_DAMAGE_COOLDOWN_MS,

            orb_magnet_radius: ORB_MAGNET_RADIUS,
            orb_pull_speed: ORB_PULL_SPEED,

            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            difficulty_ramp_secs: DIFFICULTY_RAMP_SECS,

            upgrade_choices: UPGRADE_CHOICES,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: arena {}x{}, spawn every {}ms",
            tuning.arena_width,
            tuning.arena_height,
            tuning.base_spawn_interval_ms
        );
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }
        fn non_negative(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a non-negative finite number",
                })
            }
        }

        positive("arena_width", self.arena_width.into())?;
        positive("arena_height", self.arena_height.into())?;
        positive("player_radius", self.player_radius.into())?;
        positive("segment_radius", self.segment_radius.into())?;
        positive("enemy_radius", self.enemy_radius.into())?;
        positive("orb_radius", self.orb_radius.into())?;
        positive("projectile_radius", self.projectile_radius.into())?;
        positive("player_speed", self.player_speed.into())?;
        positive("player_max_health", self.player_max_health.into())?;
        positive("attack_interval_ms", self.attack_interval_ms.into())?;
        positive("projectile_speed", self.projectile_speed.into())?;
        positive("enemy_health", self.enemy_health.into())?;
        positive("base_spawn_interval_ms", self.base_spawn_interval_ms)?;
        positive("difficulty_ramp_secs", self.difficulty_ramp_secs)?;

        non_negative("attack_damage", self.attack_damage.into())?;
        non_negative("attack_range", self.attack_range.into())?;
        non_negative("enemy_speed", self.enemy_speed.into())?;
        non_negative("enemy_damage", self.enemy_damage.into())?;
        non_negative("enemy_damage_cooldown_ms", self.enemy_damage_cooldown_ms)?;
        non_negative("orb_magnet_radius", self.orb_magnet_radius.into())?;
        non_negative("orb_pull_speed", self.orb_pull_speed.into())?;

        if self.first_level_xp == 0 {
            return Err(TuningError::Invalid {
                field: "first_level_xp",
                reason: "must be at least 1",
            });
        }
        if self.arena_width < self.player_radius * 2.0
            || self.arena_height < self.player_radius * 2.0
        {
            return Err(TuningError::Invalid {
                field: "player_radius",
                reason: "player does not fit inside the arena",
            });
        }
        if self.upgrade_choices == 0 || self.upgrade_choices > CATALOG.len() {
            return Err(TuningError::Invalid {
                field: "upgrade_choices",
                reason: "must be between 1 and the catalog size",
            });
        }
        Ok(())
    }

    /// Tail cap for a given level: `(level - 1) * segments_per_level`
    pub fn max_segments(&self, level: u32) -> usize {
        level.saturating_sub(1) as usize * self.segments_per_level
    }
}
