//! Note descriptors (from the beatmap) and their runtime instances.

use crate::models::error::BeatmapError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gesture name reported by the recognizer that never matches a target.
pub const UNKNOWN_GESTURE: &str = "UNKNOWN";

/// Stable identity of a note: its index in the sorted beatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteId(pub usize);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Horizontal direction a swipe must travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign applied to the travel distance (+1 right, -1 left).
    pub fn sign(&self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "LEFT",
            SwipeDirection::Right => "RIGHT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LEFT" => Some(SwipeDirection::Left),
            "RIGHT" => Some(SwipeDirection::Right),
            _ => None,
        }
    }
}

/// Payload-free note type, as reported in judgement events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Tap,
    Hold,
    Swipe,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Tap => "tap",
            NoteType::Hold => "hold",
            NoteType::Swipe => "swipe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tap" => Some(NoteType::Tap),
            "hold" => Some(NoteType::Hold),
            "swipe" => Some(NoteType::Swipe),
            _ => None,
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a beatmap note with the fields only that type carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteShape {
    Tap,
    Hold { duration: f64 },
    Swipe {
        duration: f64,
        direction: SwipeDirection,
    },
}

impl NoteShape {
    pub fn note_type(&self) -> NoteType {
        match self {
            NoteShape::Tap => NoteType::Tap,
            NoteShape::Hold { .. } => NoteType::Hold,
            NoteShape::Swipe { .. } => NoteType::Swipe,
        }
    }

    /// Seconds; zero for taps.
    pub fn duration(&self) -> f64 {
        match self {
            NoteShape::Tap => 0.0,
            NoteShape::Hold { duration } | NoteShape::Swipe { duration, .. } => *duration,
        }
    }

    pub fn direction(&self) -> Option<SwipeDirection> {
        match self {
            NoteShape::Swipe { direction, .. } => Some(*direction),
            _ => None,
        }
    }
}

/// Immutable note descriptor produced by the beatmap loader.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteSpec {
    /// Game time (seconds) at which the note spawns.
    pub scheduled_time: f64,
    /// Gesture the player must show.
    pub target_gesture: String,
    pub shape: NoteShape,
}

impl NoteSpec {
    /// Creates a tap descriptor.
    pub fn tap(scheduled_time: f64, target_gesture: impl Into<String>) -> Self {
        Self {
            scheduled_time,
            target_gesture: target_gesture.into(),
            shape: NoteShape::Tap,
        }
    }

    /// Creates a hold descriptor.
    pub fn hold(scheduled_time: f64, target_gesture: impl Into<String>, duration: f64) -> Self {
        Self {
            scheduled_time,
            target_gesture: target_gesture.into(),
            shape: NoteShape::Hold { duration },
        }
    }

    /// Creates a swipe descriptor.
    pub fn swipe(
        scheduled_time: f64,
        target_gesture: impl Into<String>,
        duration: f64,
        direction: SwipeDirection,
    ) -> Self {
        Self {
            scheduled_time,
            target_gesture: target_gesture.into(),
            shape: NoteShape::Swipe {
                duration,
                direction,
            },
        }
    }

    pub fn note_type(&self) -> NoteType {
        self.shape.note_type()
    }

    pub fn duration(&self) -> f64 {
        self.shape.duration()
    }

    pub fn direction(&self) -> Option<SwipeDirection> {
        self.shape.direction()
    }

    /// Checks a descriptor the engine could not judge sensibly.
    ///
    /// `index` is the record position reported in the error.
    pub fn validate(&self, index: usize) -> Result<(), BeatmapError> {
        let time = self.scheduled_time;
        if !time.is_finite() || time < 0.0 {
            return Err(BeatmapError::InvalidTime { index, time });
        }

        let gesture = self.target_gesture.as_str();
        if gesture.is_empty() || gesture == UNKNOWN_GESTURE {
            return Err(BeatmapError::UnmatchableGesture {
                index,
                gesture: gesture.to_string(),
            });
        }

        let duration = self.duration();
        if self.note_type() != NoteType::Tap && !(duration.is_finite() && duration > 0.0) {
            return Err(BeatmapError::InvalidDuration {
                index,
                note_type: self.note_type().as_str(),
                duration,
            });
        }

        Ok(())
    }
}

/// Validates every spec, reporting the first offending index.
pub fn validate_specs(specs: &[NoteSpec]) -> Result<(), BeatmapError> {
    specs
        .iter()
        .enumerate()
        .try_for_each(|(index, spec)| spec.validate(index))
}

/// Type of a live note with its type-specific judgement state.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteKind {
    /// Single gesture at the judgement line.
    Tap,

    /// Gesture held while the body crosses the line.
    Hold {
        duration: f64,
        /// Start succeeded and the hold has not ended yet.
        sustaining: bool,
    },

    /// Gesture kept while the pointer travels to the destination anchor.
    Swipe {
        duration: f64,
        direction: SwipeDirection,
        /// In the swiping sub-phase; the note does not move.
        swiping: bool,
        /// Absolute game time the swipe must be completed by.
        swipe_deadline: f64,
        /// Seconds of gesture lapse still tolerated.
        grace_remaining: f64,
    },
}

impl NoteKind {
    pub fn note_type(&self) -> NoteType {
        match self {
            NoteKind::Tap => NoteType::Tap,
            NoteKind::Hold { .. } => NoteType::Hold,
            NoteKind::Swipe { .. } => NoteType::Swipe,
        }
    }

    /// Returns the duration for holds and swipes, 0 otherwise.
    pub fn duration(&self) -> f64 {
        match self {
            NoteKind::Tap => 0.0,
            NoteKind::Hold { duration, .. } | NoteKind::Swipe { duration, .. } => *duration,
        }
    }
}

/// Runtime instance of a [`NoteSpec`].
///
/// Motion belongs to the lifecycle manager; the judgement flags and the
/// variant state belong to the judgement engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub scheduled_time: f64,
    pub target_gesture: String,
    /// Distance travelled along the track since spawn.
    pub position: f64,
    /// Entry judgement fired (final for taps, start phase otherwise).
    pub is_resolved: bool,
    /// A terminal failure fired.
    pub is_failed: bool,
    /// Terminal event emitted; removed at the end of the tick.
    pub retired: bool,
    pub kind: NoteKind,
}

impl Note {
    /// Instantiates a spec at position 0.
    pub fn spawn(id: NoteId, spec: &NoteSpec) -> Self {
        let kind = match spec.shape {
            NoteShape::Tap => NoteKind::Tap,
            NoteShape::Hold { duration } => NoteKind::Hold {
                duration,
                sustaining: false,
            },
            NoteShape::Swipe {
                duration,
                direction,
            } => NoteKind::Swipe {
                duration,
                direction,
                swiping: false,
                swipe_deadline: 0.0,
                grace_remaining: 0.0,
            },
        };

        Self {
            id,
            scheduled_time: spec.scheduled_time,
            target_gesture: spec.target_gesture.clone(),
            position: 0.0,
            is_resolved: false,
            is_failed: false,
            retired: false,
            kind,
        }
    }

    pub fn note_type(&self) -> NoteType {
        self.kind.note_type()
    }

    /// True while a hold is held or a swipe is mid-gesture.
    pub fn is_sustaining(&self) -> bool {
        match self.kind {
            NoteKind::Tap => false,
            NoteKind::Hold { sustaining, .. } => sustaining,
            NoteKind::Swipe { swiping, .. } => swiping,
        }
    }

    /// Swipes do not move while swiping.
    pub fn is_frozen(&self) -> bool {
        matches!(self.kind, NoteKind::Swipe { swiping: true, .. })
    }

    /// Position of the edge used for contact tests.
    pub fn leading_edge(&self, note_radius: f64) -> f64 {
        match self.kind {
            NoteKind::Tap | NoteKind::Hold { .. } => self.position + note_radius,
            NoteKind::Swipe { .. } => self.position,
        }
    }

    /// Position of a hold's tail (`position` for other types).
    pub fn tail(&self, note_speed: f64) -> f64 {
        self.position - self.kind.duration() * note_speed
    }

    pub fn is_hold(&self) -> bool {
        matches!(self.kind, NoteKind::Hold { .. })
    }

    pub fn is_swipe(&self) -> bool {
        matches!(self.kind, NoteKind::Swipe { .. })
    }
}
