//! Experience, leveling and upgrades
//!
//! Upgrades are plain data: a list of stat modifiers applied by one
//! generic function. No closures over player state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::step_toward;
use super::state::{GamePhase, Player, SimEvent, World};

/// Player stat that upgrades scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stat {
    AttackDamage,
    AttackInterval,
    AttackRange,
    MaxHealth,
    MoveSpeed,
}

/// How a modifier scales its stat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatOp {
    Add(f32),
    Multiply(f32),
}

/// One player mutation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatModifier {
    /// Add to or multiply a stat
    Scale { stat: Stat, op: StatOp },
    /// Restore health to the current max
    RefillHealth,
}

/// Catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    IncreasedDamage,
    FasterAttacks,
    LongerRange,
    MaxHealthUp,
    SpeedBoost,
    RapidFire,
}

/// A level-up reward as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Upgrade {
    pub kind: UpgradeKind,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub modifiers: &'static [StatModifier],
}

/// Fixed upgrade catalog. Effects compose freely and have no caps.
pub const CATALOG: [Upgrade; 6] = [
    Upgrade {
        kind: UpgradeKind::IncreasedDamage,
        name: "Increased Damage",
        description: "Increase attack damage by 5",
        modifiers: &[StatModifier::Scale {
            stat: Stat::AttackDamage,
            op: StatOp::Add(5.0),
        }],
    },
    Upgrade {
        kind: UpgradeKind::FasterAttacks,
        name: "Faster Attacks",
        description: "Reduce attack cooldown by 15%",
        modifiers: &[StatModifier::Scale {
            stat: Stat::AttackInterval,
            op: StatOp::Multiply(0.85),
        }],
    },
    Upgrade {
        kind: UpgradeKind::LongerRange,
        name: "Longer Range",
        description: "Increase attack range by 30",
        modifiers: &[StatModifier::Scale {
            stat: Stat::AttackRange,
            op: StatOp::Add(30.0),
        }],
    },
    Upgrade {
        kind: UpgradeKind::MaxHealthUp,
        name: "Max Health Up",
        description: "Increase max health by 20 and restore health",
        modifiers: &[
            StatModifier::Scale {
                stat: Stat::MaxHealth,
                op: StatOp::Add(20.0),
            },
            StatModifier::RefillHealth,
        ],
    },
    Upgrade {
        kind: UpgradeKind::SpeedBoost,
        name: "Speed Boost",
        description: "Increase movement speed by 10%",
        modifiers: &[StatModifier::Scale {
            stat: Stat::MoveSpeed,
            op: StatOp::Multiply(1.1),
        }],
    },
    Upgrade {
        kind: UpgradeKind::RapidFire,
        name: "Rapid Fire",
        description: "Significantly increase attack speed",
        modifiers: &[StatModifier::Scale {
            stat: Stat::AttackInterval,
            op: StatOp::Multiply(0.7),
        }],
    },
];

impl UpgradeKind {
    pub fn upgrade(self) -> &'static Upgrade {
        // Catalog order matches declaration order
        &CATALOG[self as usize]
    }
}

/// Upgrade choices rolled for one level-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeOffer {
    pub choices: Vec<UpgradeKind>,
}

impl UpgradeOffer {
    /// Sample `count` distinct catalog entries
    pub fn roll<R: Rng>(rng: &mut R, count: usize) -> Self {
        let count = count.min(CATALOG.len());
        let choices = rand::seq::index::sample(rng, CATALOG.len(), count)
            .into_iter()
            .map(|i| CATALOG[i].kind)
            .collect();
        Self { choices }
    }

    pub fn upgrades(&self) -> impl Iterator<Item = &'static Upgrade> + '_ {
        self.choices.iter().map(|k| k.upgrade())
    }
}

fn stat_mut(player: &mut Player, stat: Stat) -> &mut f32 {
    match stat {
        Stat::AttackDamage => &mut player.stats.attack_damage,
        Stat::AttackInterval => &mut player.stats.attack_interval_ms,
        Stat::AttackRange => &mut player.stats.attack_range,
        Stat::MaxHealth => &mut player.max_health,
        Stat::MoveSpeed => &mut player.stats.move_speed,
    }
}

/// Apply one modifier, keeping health inside `[0, max_health]`
pub fn apply_modifier(player: &mut Player, modifier: StatModifier) {
    match modifier {
        StatModifier::Scale { stat, op } => {
            let value = stat_mut(player, stat);
            match op {
                StatOp::Add(amount) => *value += amount,
                StatOp::Multiply(factor) => *value *= factor,
            }
        }
        StatModifier::RefillHealth => player.health = player.max_health,
    }
    player.max_health = player.max_health.max(0.0);
    player.health = player.health.clamp(0.0, player.max_health);
}

/// Apply every modifier of an upgrade to the player
pub fn apply_upgrade(player: &mut Player, kind: UpgradeKind) {
    for &modifier in kind.upgrade().modifiers {
        apply_modifier(player, modifier);
    }
}

/// Add experience, leveling up at most once for this grant.
///
/// Returns true if a level was gained. Leftover XP carries over, so a large
/// grant may leave `xp` above the new threshold until the next grant.
pub fn gain_xp(player: &mut Player, amount: u32) -> bool {
    player.xp = player.xp.saturating_add(amount);
    if player.xp >= player.xp_to_next_level {
        level_up(player);
        true
    } else {
        false
    }
}

fn level_up(player: &mut Player) {
    player.level += 1;
    player.xp -= player.xp_to_next_level;
    // x1.5, floored, saturating at u32::MAX
    let next = u64::from(player.xp_to_next_level) * 3 / 2;
    player.xp_to_next_level = u32::try_from(next).unwrap_or(u32::MAX);
}

/// Grant XP in the world context, queuing an upgrade choice on level-up
pub fn grant_xp(world: &mut World, amount: u32) {
    if !gain_xp(&mut world.player, amount) {
        return;
    }
    let level = world.player.level;
    log::info!(
        "Level up! Now level {} (next at {} xp)",
        level,
        world.player.xp_to_next_level
    );
    world.events.push(SimEvent::LevelUp { level });
    world.pending_level_ups += 1;
    if world.phase == GamePhase::Running {
        open_offer(world);
    }
}

/// Pull nearby orbs toward the player and collect touching ones.
///
/// Both the magnet and the pickup test use the distance from before this
/// step's pull. Iterates back to front so removal is safe.
pub fn update_orbs(world: &mut World) {
    let player_pos = world.player.pos;
    let player_radius = world.player.radius;
    let magnet_radius = world.tuning.orb_magnet_radius;
    let pull_speed = world.tuning.orb_pull_speed;

    for i in (0..world.orbs.len()).rev() {
        let orb = &mut world.orbs[i];
        let dist = orb.pos.distance(player_pos);
        if dist < magnet_radius {
            orb.pos = step_toward(orb.pos, player_pos, pull_speed);
        }
        if dist < player_radius + orb.radius {
            let value = world.orbs.remove(i).value;
            world.events.push(SimEvent::OrbCollected { value });
            grant_xp(world, value);
        }
    }
}

/// Roll a fresh offer and pause for the choice
pub(crate) fn open_offer(world: &mut World) {
    let offer = UpgradeOffer::roll(&mut world.rng, world.tuning.upgrade_choices);
    world.offer = Some(offer);
    world.phase = GamePhase::ChoosingUpgrade;
}
