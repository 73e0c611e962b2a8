//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One clock, advanced only by `step`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod movement;
pub mod progression;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use movement::DirectionKeys;
pub use progression::{CATALOG, Upgrade, UpgradeKind, UpgradeOffer, apply_upgrade};
pub use snapshot::WorldSnapshot;
pub use spawn::{difficulty_multiplier, spawn_interval_ms};
pub use state::{
    CombatStats, Enemy, EnemyKind, GamePhase, MoveIntent, Player, Projectile, SimEvent, World,
    XpOrb,
};
pub use tick::{SimError, StepInput, step};
