//! End-of-run statistics
//!
//! What the game-over screen shows: level, kills, time and tail length.

use serde::{Deserialize, Serialize};

use crate::sim::World;

/// Final (or current) stats for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    /// Level reached
    pub level: u32,
    /// Enemies killed
    pub kills: u32,
    /// Seconds survived
    pub survival_secs: f64,
    /// Tail segments at the end of the run
    pub tail_length: usize,
}

impl RunSummary {
    pub fn from_world(world: &World) -> Self {
        Self {
            seed: world.seed,
            level: world.player.level,
            kills: world.kills,
            survival_secs: world.elapsed_secs(),
            tail_length: world.player.tail.len(),
        }
    }

    /// Survival time as `m:ss`
    pub fn clock(&self) -> String {
        format_clock(self.survival_secs)
    }
}

/// Format seconds as `m:ss`, truncating fractional seconds
pub fn format_clock(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let minutes = (secs / 60.0).floor() as u64;
    let seconds = (secs % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, seconds)
}
