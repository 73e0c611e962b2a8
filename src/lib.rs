//! Tail Arena - a top-down survival arena with a growing tail
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, progression, spawning)
//! - `tuning`: Data-driven game balance
//! - `summary`: End-of-run statistics
//!
//! Rendering, input capture and storage are left to the embedding frontend.

pub mod sim;
pub mod summary;
pub mod tuning;

pub use summary::{RunSummary, format_clock};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Default balance constants (overridable through [`Tuning`])
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Body radii
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const SEGMENT_RADIUS: f32 = 12.0;
    pub const ENEMY_RADIUS: f32 = 12.0;
    pub const XP_ORB_RADIUS: f32 = 6.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Player defaults (speeds are pixels per step)
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const FIRST_LEVEL_XP: u32 = 100;
    pub const SEGMENTS_PER_LEVEL: usize = 3;

    /// Diagonal input scale. Deliberately the rounded constant, not 1/sqrt(2).
    pub const DIAGONAL_FACTOR: f32 = 0.707;

    /// Auto-attack defaults
    pub const ATTACK_DAMAGE: f32 = 10.0;
    pub const ATTACK_INTERVAL_MS: f32 = 1000.0;
    pub const ATTACK_RANGE: f32 = 200.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Enemy defaults
    pub const ENEMY_HEALTH: f32 = 20.0;
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_DAMAGE: f32 = 5.0;
    pub const ENEMY_XP: u32 = 10;
    /// Minimum time between two contact hits from the same enemy
    pub const ENEMY_DAMAGE_COOLDOWN_MS: f64 = 500.0;

    /// XP orbs drift toward the player inside this radius
    pub const ORB_MAGNET_RADIUS: f32 = 100.0;
    pub const ORB_PULL_SPEED: f32 = 4.0;

    /// Spawning
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 2000.0;
    /// Seconds survived per +1 difficulty multiplier
    pub const DIFFICULTY_RAMP_SECS: f64 = 60.0;

    /// Upgrades offered per level-up
    pub const UPGRADE_CHOICES: usize = 3;
}

/// Clamp a point into `[margin, width - margin] x [margin, height - margin]`
#[inline]
pub fn clamp_to_arena(pos: Vec2, width: f32, height: f32, margin: f32) -> Vec2 {
    Vec2::new(
        pos.x.max(margin).min(width - margin),
        pos.y.max(margin).min(height - margin),
    )
}

/// True when `pos` lies inside the closed rectangle `[0, width] x [0, height]`
#[inline]
pub fn in_arena(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x >= 0.0 && pos.x <= width && pos.y >= 0.0 && pos.y <= height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_arena() {
        let p = clamp_to_arena(Vec2::new(-10.0, 900.0), 1200.0, 800.0, 15.0);
        assert_eq!(p, Vec2::new(15.0, 785.0));

        let inside = Vec2::new(600.0, 400.0);
        assert_eq!(clamp_to_arena(inside, 1200.0, 800.0, 15.0), inside);
    }

    #[test]
    fn test_in_arena_edges_inclusive() {
        assert!(in_arena(Vec2::new(0.0, 0.0), 1200.0, 800.0));
        assert!(in_arena(Vec2::new(1200.0, 800.0), 1200.0, 800.0));
        assert!(!in_arena(Vec2::new(-0.1, 10.0), 1200.0, 800.0));
        assert!(!in_arena(Vec2::new(10.0, 800.1), 1200.0, 800.0));
    }
}
