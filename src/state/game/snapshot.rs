//! Snapshot creation for GameEngine.

use super::GameEngine;
use crate::shared::snapshot::GameplaySnapshot;
use crate::state::traits::Snapshot;

impl GameEngine {
    /// Captures the current game state.
    pub fn snapshot(&self) -> GameplaySnapshot {
        GameplaySnapshot {
            game_time: self.game_time,
            active_notes: self.active_notes().to_vec(),
            spawned: self.spawned(),
            total_notes: self.beatmap_len(),
            finished: self.is_finished(),
        }
    }
}

impl Snapshot for GameEngine {
    type Output = GameplaySnapshot;

    fn create_snapshot(&self) -> Self::Output {
        self.snapshot()
    }
}
