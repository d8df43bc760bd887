//! Judgement geometry and tolerance configuration.

use super::hit_window::ToleranceWindow;
use crate::models::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables of the judgement engine, fixed once the engine is built.
///
/// Distances are in track units (screen pixels by default), times in
/// seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgementConfig {
    /// Track position of the judgement line.
    pub judgement_line: f64,
    pub tolerance_perfect: f64,
    pub tolerance_great: f64,
    /// Units per second.
    pub note_speed: f64,
    /// Half-extent of a tap/hold head.
    pub note_radius: f64,
    /// Horizontal start anchor of every swipe.
    pub swipe_origin_x: f64,
    pub swipe_travel_distance: f64,
    pub swipe_position_tolerance: f64,
    pub swipe_grace_period: f64,
    /// Extra distance past the great window before an unresolved note auto-misses.
    pub auto_miss_margin: f64,
    /// Report failed hold starts as HOLD_START_MISS instead of MISS.
    pub distinct_hold_miss: bool,
}

impl Default for JudgementConfig {
    fn default() -> Self {
        Self {
            judgement_line: 500.0,
            tolerance_perfect: 40.0,
            tolerance_great: 80.0,
            note_speed: 350.0,
            note_radius: 30.0,
            swipe_origin_x: 400.0,
            swipe_travel_distance: 200.0,
            swipe_position_tolerance: 60.0,
            swipe_grace_period: 0.2,
            auto_miss_margin: 0.0,
            distinct_hold_miss: false,
        }
    }
}

impl JudgementConfig {
    pub fn tolerance_window(&self) -> ToleranceWindow {
        ToleranceWindow::new(self.tolerance_perfect, self.tolerance_great)
    }

    /// Track position past which an unresolved note is missed.
    pub fn auto_miss_threshold(&self) -> f64 {
        self.judgement_line + self.tolerance_great + self.auto_miss_margin
    }

    /// Horizontal anchor a swipe must end on.
    pub fn swipe_destination_x(&self, sign: f64) -> f64 {
        self.swipe_origin_x + sign * self.swipe_travel_distance
    }

    /// Rejects configurations that would produce nonsensical judgements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("judgement_line", self.judgement_line),
            ("tolerance_perfect", self.tolerance_perfect),
            ("tolerance_great", self.tolerance_great),
            ("note_speed", self.note_speed),
            ("note_radius", self.note_radius),
            ("swipe_origin_x", self.swipe_origin_x),
            ("swipe_travel_distance", self.swipe_travel_distance),
            ("swipe_position_tolerance", self.swipe_position_tolerance),
            ("swipe_grace_period", self.swipe_grace_period),
            ("auto_miss_margin", self.auto_miss_margin),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let non_negative = [
            ("tolerance_perfect", self.tolerance_perfect),
            ("tolerance_great", self.tolerance_great),
            ("note_radius", self.note_radius),
            ("swipe_travel_distance", self.swipe_travel_distance),
            ("swipe_position_tolerance", self.swipe_position_tolerance),
            ("swipe_grace_period", self.swipe_grace_period),
            ("auto_miss_margin", self.auto_miss_margin),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.note_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.note_speed));
        }
        if self.tolerance_perfect > self.tolerance_great {
            return Err(ConfigError::ToleranceOrder {
                perfect: self.tolerance_perfect,
                great: self.tolerance_great,
            });
        }
        Ok(())
    }
}
