//! Judgement grades, hit statistics and the reference scoring sink.
//!
//! The engine only emits grades; points and combo live entirely here, on the
//! consumer side of the event sink.

use crate::models::engine::Note;
use crate::shared::messages::{JudgementEvent, JudgementSink};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Judgement grades, entry grades first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Judgement {
    /// Matched inside the perfect window.
    Perfect,
    /// Matched inside the great window.
    Great,
    /// Wrong gesture at contact, or never judged.
    Miss,
    /// Failed hold start (only when configured to be distinct from MISS).
    HoldStartMiss,
    /// Gesture dropped while the hold body crossed the line.
    HoldBreak,
    HoldSuccess,
    /// Gesture lapsed past the grace period, or pointer off target at the deadline.
    SwipeBreak,
    SwipeSuccess,
}

impl Judgement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Judgement::Perfect => "PERFECT",
            Judgement::Great => "GREAT",
            Judgement::Miss => "MISS",
            Judgement::HoldStartMiss => "HOLD_START_MISS",
            Judgement::HoldBreak => "HOLD_BREAK",
            Judgement::HoldSuccess => "HOLD_SUCCESS",
            Judgement::SwipeBreak => "SWIPE_BREAK",
            Judgement::SwipeSuccess => "SWIPE_SUCCESS",
        }
    }

    /// Grades that break the combo.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Judgement::Miss
                | Judgement::HoldStartMiss
                | Judgement::HoldBreak
                | Judgement::SwipeBreak
        )
    }
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated grade counts for a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitStats {
    pub perfect: u32,
    pub great: u32,
    pub miss: u32,
    pub hold_start_miss: u32,
    pub hold_break: u32,
    pub hold_success: u32,
    pub swipe_break: u32,
    pub swipe_success: u32,
}

impl HitStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, judgement: Judgement) {
        let counter = match judgement {
            Judgement::Perfect => &mut self.perfect,
            Judgement::Great => &mut self.great,
            Judgement::Miss => &mut self.miss,
            Judgement::HoldStartMiss => &mut self.hold_start_miss,
            Judgement::HoldBreak => &mut self.hold_break,
            Judgement::HoldSuccess => &mut self.hold_success,
            Judgement::SwipeBreak => &mut self.swipe_break,
            Judgement::SwipeSuccess => &mut self.swipe_success,
        };
        *counter += 1;
    }

    pub fn count(&self, judgement: Judgement) -> u32 {
        match judgement {
            Judgement::Perfect => self.perfect,
            Judgement::Great => self.great,
            Judgement::Miss => self.miss,
            Judgement::HoldStartMiss => self.hold_start_miss,
            Judgement::HoldBreak => self.hold_break,
            Judgement::HoldSuccess => self.hold_success,
            Judgement::SwipeBreak => self.swipe_break,
            Judgement::SwipeSuccess => self.swipe_success,
        }
    }

    /// Total number of events recorded.
    pub fn total(&self) -> u32 {
        self.perfect
            + self.great
            + self.miss
            + self.hold_start_miss
            + self.hold_break
            + self.hold_success
            + self.swipe_break
            + self.swipe_success
    }
}

/// Point values per grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub perfect: u32,
    pub great: u32,
    pub hold_success: u32,
    pub swipe_success: u32,
    /// Granted every tick for each sustaining note.
    pub sustain_tick: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            perfect: 100,
            great: 50,
            hold_success: 200,
            swipe_success: 200,
            sustain_tick: 2,
        }
    }
}

impl ScoreRules {
    pub fn points(&self, judgement: Judgement) -> u32 {
        match judgement {
            Judgement::Perfect => self.perfect,
            Judgement::Great => self.great,
            Judgement::HoldSuccess => self.hold_success,
            Judgement::SwipeSuccess => self.swipe_success,
            _ => 0,
        }
    }
}

/// Score and combo bookkeeping fed by judgement events.
#[derive(Debug, Clone, Default)]
pub struct ScoreKeeper {
    pub rules: ScoreRules,
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub hit_stats: HitStats,
    pub last_judgement: Option<Judgement>,
}

impl ScoreKeeper {
    pub fn new(rules: ScoreRules) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    /// Applies a grade to score, combo and stats.
    pub fn apply_judgement(&mut self, j: Judgement) {
        self.hit_stats.record(j);
        self.last_judgement = Some(j);

        if j.is_failure() {
            self.combo = 0;
        } else {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
            self.score += self.rules.points(j);
        }
    }
}

impl JudgementSink for ScoreKeeper {
    fn on_judgement(&mut self, event: &JudgementEvent) {
        self.apply_judgement(event.grade);
    }

    fn on_tick_end(&mut self, active: &[Note]) {
        let sustaining = active
            .iter()
            .filter(|n| n.is_sustaining() && !n.is_failed)
            .count() as u32;
        self.score += sustaining * self.rules.sustain_tick;
    }
}
