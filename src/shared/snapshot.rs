//! Read-only captures of engine state for renderers and HUDs.

use crate::models::engine::Note;

/// Snapshot of gameplay state after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GameplaySnapshot {
    /// Game time of the last tick, in seconds.
    pub game_time: f64,
    /// Notes on the track, in spawn order.
    pub active_notes: Vec<Note>,
    /// Number of notes spawned so far.
    pub spawned: usize,
    /// Number of notes in the beatmap.
    pub total_notes: usize,
    /// Every note has reached its terminal outcome.
    pub finished: bool,
}

impl GameplaySnapshot {
    /// Notes not spawned yet.
    pub fn remaining_notes(&self) -> usize {
        self.total_notes.saturating_sub(self.spawned)
    }
}
