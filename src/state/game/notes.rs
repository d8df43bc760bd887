//! Note lifecycle: spawning, motion and retirement of active notes.

use crate::models::engine::beatmap::sort_specs;
use crate::models::engine::{Note, NoteId, NoteSpec, validate_specs};
use crate::models::error::BeatmapError;

/// Owns the beatmap and the active notes on the track.
///
/// Notes are spawned strictly in beatmap order. Retired notes stay in
/// `active_notes` until [`NoteController::compact`] runs at the end of the tick.
#[derive(Debug, Clone)]
pub struct NoteController {
    beatmap: Vec<NoteSpec>,
    /// Index of the next spec to spawn.
    spawn_cursor: usize,
    active_notes: Vec<Note>,
    note_speed: f64,
}

impl NoteController {
    /// Fails on the first spec the loader would have rejected.
    pub fn new(mut beatmap: Vec<NoteSpec>, note_speed: f64) -> Result<Self, BeatmapError> {
        validate_specs(&beatmap)?;
        sort_specs(&mut beatmap);
        Ok(Self {
            beatmap,
            spawn_cursor: 0,
            active_notes: Vec::new(),
            note_speed,
        })
    }

    /// Spawns every note whose time has come, then advances the unfrozen ones.
    pub fn tick(&mut self, game_time: f64, delta_time: f64) {
        while let Some(spec) = self.beatmap.get(self.spawn_cursor) {
            if spec.scheduled_time > game_time {
                break;
            }
            let note = Note::spawn(NoteId(self.spawn_cursor), spec);
            log::debug!(
                "NOTES: Spawned {} {} `{}` at t={:.3}",
                note.note_type(),
                note.id,
                note.target_gesture,
                game_time
            );
            self.active_notes.push(note);
            self.spawn_cursor += 1;
        }

        let step = self.note_speed * delta_time;
        for note in self.active_notes.iter_mut().filter(|n| !n.is_frozen()) {
            note.position += step;
        }
    }

    /// Drops notes whose terminal judgement has been emitted.
    pub fn compact(&mut self) {
        self.active_notes.retain(|n| !n.retired);
    }

    /// Back to the start of the beatmap.
    pub fn reset(&mut self) {
        self.active_notes.clear();
        self.spawn_cursor = 0;
        sort_specs(&mut self.beatmap);
    }

    pub fn active_notes(&self) -> &[Note] {
        &self.active_notes
    }

    pub fn active_notes_mut(&mut self) -> &mut [Note] {
        &mut self.active_notes
    }

    pub fn spawn_cursor(&self) -> usize {
        self.spawn_cursor
    }

    pub fn beatmap(&self) -> &[NoteSpec] {
        &self.beatmap
    }

    /// Every note spawned and none left on the track.
    pub fn is_finished(&self) -> bool {
        self.spawn_cursor == self.beatmap.len() && self.active_notes.is_empty()
    }
}
