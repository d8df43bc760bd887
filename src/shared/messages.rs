//! Judgement events and the sink contract between the engine and its consumers.

use crate::models::engine::{Note, NoteId, NoteType};
use crate::models::stats::Judgement;
use serde::{Deserialize, Serialize};

/// A single judgement emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgementEvent {
    pub grade: Judgement,
    pub note_type: NoteType,
    pub note_id: NoteId,
    pub target_gesture: String,
    /// Game time of the tick that produced the event.
    pub time: f64,
    /// The note is retired after this event.
    pub terminal: bool,
    /// Note state right after the judgement.
    pub sustaining: bool,
    pub failed: bool,
}

impl JudgementEvent {
    /// Captures an event from the note's state after judging it.
    pub fn from_note(note: &Note, grade: Judgement, time: f64, terminal: bool) -> Self {
        Self {
            grade,
            note_type: note.note_type(),
            note_id: note.id,
            target_gesture: note.target_gesture.clone(),
            time,
            terminal,
            sustaining: note.is_sustaining(),
            failed: note.is_failed,
        }
    }
}

/// Consumer of judgement events (scoring, combo, UI, replays).
///
/// Called once per event, in emission order. Sinks only ever see copies and
/// shared references, never the engine's mutable notes.
pub trait JudgementSink {
    fn on_judgement(&mut self, event: &JudgementEvent);

    /// Called once per tick after all events, with the notes still active.
    fn on_tick_end(&mut self, _active: &[Note]) {}
}

impl JudgementSink for Vec<JudgementEvent> {
    fn on_judgement(&mut self, event: &JudgementEvent) {
        self.push(event.clone());
    }
}

impl<S: JudgementSink + ?Sized> JudgementSink for &mut S {
    fn on_judgement(&mut self, event: &JudgementEvent) {
        (**self).on_judgement(event);
    }

    fn on_tick_end(&mut self, active: &[Note]) {
        (**self).on_tick_end(active);
    }
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl JudgementSink for NullSink {
    fn on_judgement(&mut self, _event: &JudgementEvent) {}
}

/// Fans every call out to two sinks, first then second.
#[derive(Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: JudgementSink, B: JudgementSink> JudgementSink for Tee<A, B> {
    fn on_judgement(&mut self, event: &JudgementEvent) {
        self.0.on_judgement(event);
        self.1.on_judgement(event);
    }

    fn on_tick_end(&mut self, active: &[Note]) {
        self.0.on_tick_end(active);
        self.1.on_tick_end(active);
    }
}
