//! Core gameplay engine: one tick per frame.
//!
//! Each tick runs, in order:
//! - note spawning and motion ([`NoteController`])
//! - judgement of every active note against one input frame ([`JudgementEngine`])
//! - delivery of the resulting events to the caller's sink
//! - removal of the notes that reached their terminal outcome

mod judge;
mod notes;
mod snapshot;

pub use judge::{JudgementEngine, Verdict};
pub use notes::NoteController;

use crate::input::InputFrame;
use crate::models::engine::{Beatmap, JudgementConfig, Note, NoteSpec};
use crate::models::error::EngineError;
use crate::shared::messages::JudgementSink;

/// Main gameplay engine composing the lifecycle manager and the judge.
#[derive(Debug, Clone)]
pub struct GameEngine {
    notes: NoteController,
    judge: JudgementEngine,
    /// Game time of the last tick, in seconds.
    game_time: f64,
}

impl GameEngine {
    /// Creates an engine for a loaded beatmap.
    ///
    /// Fails if the configuration is invalid.
    pub fn new(beatmap: &Beatmap, config: JudgementConfig) -> Result<Self, EngineError> {
        Self::from_specs(beatmap.specs.clone(), config)
    }

    /// Creates an engine from note specs (validated, then sorted).
    pub fn from_specs(specs: Vec<NoteSpec>, config: JudgementConfig) -> Result<Self, EngineError> {
        let judge = JudgementEngine::new(config)?;
        let notes = NoteController::new(specs, judge.config().note_speed)?;
        log::info!(
            "ENGINE: Ready with {} notes (line={}, perfect={}, great={})",
            notes.beatmap().len(),
            judge.config().judgement_line,
            judge.config().tolerance_perfect,
            judge.config().tolerance_great
        );
        Ok(Self {
            notes,
            judge,
            game_time: 0.0,
        })
    }

    /// Advances the simulation by one frame.
    ///
    /// `delta_time` is trusted as given. Returns the number of events sent
    /// to `sink`.
    pub fn tick(
        &mut self,
        game_time: f64,
        delta_time: f64,
        frame: &InputFrame,
        sink: &mut dyn JudgementSink,
    ) -> usize {
        self.game_time = game_time;

        // 1. Motion fully precedes judgement.
        self.notes.tick(game_time, delta_time);

        // 2. Judge every active note against the same frame.
        let emitted = self.judge.check_judgements(
            self.notes.active_notes_mut(),
            frame,
            game_time,
            delta_time,
            sink,
        );

        // 3. Retire terminal notes before the sink sees the survivors.
        self.notes.compact();
        sink.on_tick_end(self.notes.active_notes());

        emitted
    }

    /// Restarts from the first note.
    pub fn reset(&mut self) {
        self.notes.reset();
        self.game_time = 0.0;
    }

    /// All notes spawned and resolved.
    pub fn is_finished(&self) -> bool {
        self.notes.is_finished()
    }

    pub fn active_notes(&self) -> &[Note] {
        self.notes.active_notes()
    }

    pub fn config(&self) -> &JudgementConfig {
        self.judge.config()
    }

    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    pub fn beatmap_len(&self) -> usize {
        self.notes.beatmap().len()
    }

    /// Number of notes spawned so far.
    pub fn spawned(&self) -> usize {
        self.notes.spawn_cursor()
    }
}
