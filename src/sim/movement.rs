//! Player movement and tail recording

use glam::Vec2;

use super::state::{MoveIntent, World};
use crate::clamp_to_arena;
use crate::consts::DIAGONAL_FACTOR;

/// Directions held this step, as reported by the input provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    /// Collapse held keys into a per-axis intent.
    ///
    /// Opposing keys do not cancel: down wins over up, right wins over left.
    pub fn intent(&self) -> MoveIntent {
        let mut intent = MoveIntent::default();
        if self.up {
            intent.y = -1;
        }
        if self.down {
            intent.y = 1;
        }
        if self.left {
            intent.x = -1;
        }
        if self.right {
            intent.x = 1;
        }
        intent
    }
}

/// Velocity for an intent: axial is unit length, diagonal is scaled by
/// [`DIAGONAL_FACTOR`] on both axes.
pub fn intent_velocity(intent: MoveIntent) -> Vec2 {
    let mut vel = Vec2::new(f32::from(intent.x), f32::from(intent.y));
    if intent.x != 0 && intent.y != 0 {
        vel *= DIAGONAL_FACTOR;
    }
    vel
}

/// Move the player one step and record the tail.
///
/// Position is always clamped after displacement. The pre-move position is
/// pushed to the front of the tail only when the player moved; a stationary
/// player leaves its tail frozen in place.
pub fn move_player(world: &mut World, intent: MoveIntent) {
    let tuning = &world.tuning;
    let player = &mut world.player;

    player.vel = intent_velocity(intent);
    let prev = player.pos;
    let moved = prev + player.vel * player.stats.move_speed;
    player.pos = clamp_to_arena(
        moved,
        tuning.arena_width,
        tuning.arena_height,
        player.radius,
    );

    if player.vel != Vec2::ZERO {
        player.tail.insert(0, prev);
        player.tail.truncate(tuning.max_segments(player.level));
    }
}
