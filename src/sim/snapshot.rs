//! Read-only view of the world for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::progression::Upgrade;
use super::state::{EnemyKind, GamePhase, World};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    /// Newest first
    pub tail: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub elapsed_secs: f64,
    pub kills: u32,
    pub difficulty: f64,
}

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<Vec2>,
    pub pickups: Vec<Vec2>,
    pub stats: StatsView,
    /// Present only while choosing an upgrade
    pub upgrade_offer: Vec<Upgrade>,
}

impl World {
    /// Copy out the renderable state
    pub fn snapshot(&self) -> WorldSnapshot {
        let player = &self.player;
        WorldSnapshot {
            phase: self.phase,
            player: PlayerView {
                pos: player.pos,
                radius: player.radius,
                health: player.health,
                max_health: player.max_health,
                level: player.level,
                xp: player.xp,
                xp_to_next_level: player.xp_to_next_level,
                tail: player.tail.clone(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos,
                    health: e.health,
                    max_health: e.max_health,
                })
                .collect(),
            projectiles: self.projectiles.iter().map(|p| p.pos).collect(),
            pickups: self.orbs.iter().map(|o| o.pos).collect(),
            stats: StatsView {
                elapsed_secs: self.elapsed_secs(),
                kills: self.kills,
                difficulty: self.difficulty,
            },
            upgrade_offer: self
                .offer
                .as_ref()
                .map(|o| o.upgrades().copied().collect())
                .unwrap_or_default(),
        }
    }
}
