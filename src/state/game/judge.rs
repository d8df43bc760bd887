//! Judgement state machine for tap, hold and swipe notes.
//!
//! Per note and per tick at most one verdict is produced. The entry judgement
//! (`is_resolved == false`) and the sustain checks are mutually exclusive, so a
//! hold or swipe that starts on a tick can only end on a later one.

use crate::input::InputFrame;
use crate::models::engine::{JudgementConfig, Note, NoteKind, ToleranceWindow};
use crate::models::error::ConfigError;
use crate::models::stats::Judgement;
use crate::shared::messages::{JudgementEvent, JudgementSink};

/// Grace left below this counts as spent; summed frame times never land on 0 exactly.
const GRACE_EPSILON: f64 = 1e-9;

/// Outcome of judging one note for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub grade: Judgement,
    /// The note produces nothing after this.
    pub terminal: bool,
}

impl Verdict {
    fn terminal(grade: Judgement) -> Self {
        Self {
            grade,
            terminal: true,
        }
    }

    fn entry(grade: Judgement) -> Self {
        Self {
            grade,
            terminal: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JudgementEngine {
    config: JudgementConfig,
    window: ToleranceWindow,
}

impl JudgementEngine {
    pub fn new(config: JudgementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let window = config.tolerance_window();
        Ok(Self { config, window })
    }

    pub fn config(&self) -> &JudgementConfig {
        &self.config
    }

    /// Judges every active note against the same input frame.
    ///
    /// Events reach the sink in note order. Notes reaching a terminal outcome
    /// are flagged `retired`; removing them is up to the caller.
    pub fn check_judgements(
        &self,
        notes: &mut [Note],
        frame: &InputFrame,
        game_time: f64,
        delta_time: f64,
        sink: &mut dyn JudgementSink,
    ) -> usize {
        let mut emitted = 0;

        for note in notes.iter_mut() {
            let Some(verdict) = self.judge_note(note, frame, game_time, delta_time) else {
                continue;
            };

            if verdict.terminal {
                note.retired = true;
                log::debug!(
                    "JUDGE: {} {} -> {} at t={:.3}",
                    note.note_type(),
                    note.id,
                    verdict.grade,
                    game_time
                );
            }

            let event = JudgementEvent::from_note(note, verdict.grade, game_time, verdict.terminal);
            sink.on_judgement(&event);
            emitted += 1;
        }

        emitted
    }

    /// Advances one note's state machine by one tick.
    pub fn judge_note(
        &self,
        note: &mut Note,
        frame: &InputFrame,
        game_time: f64,
        delta_time: f64,
    ) -> Option<Verdict> {
        if note.is_failed || note.retired {
            return None;
        }

        let edge = note.leading_edge(self.config.note_radius);
        if !note.is_resolved {
            return self.judge_entry(note, frame, game_time, edge);
        }

        match note.kind {
            // A resolved tap is already terminal.
            NoteKind::Tap => None,
            NoteKind::Hold { .. } => self.judge_hold_sustain(note, frame, edge),
            NoteKind::Swipe { .. } => self.judge_swipe_sustain(note, frame, game_time, delta_time),
        }
    }

    /// Head contact for every type, plus the auto-miss fallback.
    fn judge_entry(
        &self,
        note: &mut Note,
        frame: &InputFrame,
        game_time: f64,
        edge: f64,
    ) -> Option<Verdict> {
        let contact_distance = (edge - self.config.judgement_line).abs();

        if self.window.in_range(contact_distance) {
            note.is_resolved = true;

            let gesture_ok = frame.matches(&note.target_gesture);
            let pointer_ok = !note.is_swipe()
                || frame.pointer_near_x(
                    self.config.swipe_origin_x,
                    self.config.swipe_position_tolerance,
                );

            let grade = if gesture_ok && pointer_ok {
                self.window.judge(contact_distance)
            } else {
                None
            };

            return Some(match grade {
                Some(grade) => self.begin_sustain(note, grade, game_time),
                None => self.fail_entry(note),
            });
        }

        if edge > self.config.auto_miss_threshold() {
            note.is_resolved = true;
            return Some(self.fail_entry(note));
        }

        None
    }

    /// Successful entry: final for taps, opens the sustain phase otherwise.
    fn begin_sustain(&self, note: &mut Note, grade: Judgement, game_time: f64) -> Verdict {
        match &mut note.kind {
            NoteKind::Tap => Verdict::terminal(grade),
            NoteKind::Hold { sustaining, .. } => {
                *sustaining = true;
                Verdict::entry(grade)
            }
            NoteKind::Swipe {
                duration,
                swiping,
                swipe_deadline,
                grace_remaining,
                ..
            } => {
                *swiping = true;
                *swipe_deadline = game_time + *duration;
                *grace_remaining = self.config.swipe_grace_period;
                Verdict::entry(grade)
            }
        }
    }

    fn fail_entry(&self, note: &mut Note) -> Verdict {
        note.is_failed = true;
        let grade = if note.is_hold() && self.config.distinct_hold_miss {
            Judgement::HoldStartMiss
        } else {
            Judgement::Miss
        };
        Verdict::terminal(grade)
    }

    fn judge_hold_sustain(&self, note: &mut Note, frame: &InputFrame, head: f64) -> Option<Verdict> {
        let line = self.config.judgement_line;
        let tail = note.tail(self.config.note_speed);
        let gesture_ok = frame.matches(&note.target_gesture);

        let NoteKind::Hold { sustaining, .. } = &mut note.kind else {
            return None;
        };
        if !*sustaining {
            return None;
        }

        if tail >= line {
            // Whatever the gesture is on this tick.
            *sustaining = false;
            return Some(Verdict::terminal(Judgement::HoldSuccess));
        }

        if tail < line && line < head && !gesture_ok {
            *sustaining = false;
            note.is_failed = true;
            return Some(Verdict::terminal(Judgement::HoldBreak));
        }

        None
    }

    fn judge_swipe_sustain(
        &self,
        note: &mut Note,
        frame: &InputFrame,
        game_time: f64,
        delta_time: f64,
    ) -> Option<Verdict> {
        let gesture_ok = frame.matches(&note.target_gesture);

        let NoteKind::Swipe {
            direction,
            swiping,
            swipe_deadline,
            grace_remaining,
            ..
        } = &mut note.kind
        else {
            return None;
        };
        if !*swiping {
            return None;
        }

        if gesture_ok {
            *grace_remaining = self.config.swipe_grace_period;
        } else {
            *grace_remaining -= delta_time;
            if *grace_remaining <= GRACE_EPSILON {
                *swiping = false;
                note.is_failed = true;
                return Some(Verdict::terminal(Judgement::SwipeBreak));
            }
        }

        if game_time >= *swipe_deadline {
            *swiping = false;
            let destination = self.config.swipe_destination_x(direction.sign());
            if frame.pointer_near_x(destination, self.config.swipe_position_tolerance) {
                return Some(Verdict::terminal(Judgement::SwipeSuccess));
            }
            note.is_failed = true;
            return Some(Verdict::terminal(Judgement::SwipeBreak));
        }

        None
    }
}
