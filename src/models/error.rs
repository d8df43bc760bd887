//! Error types for beatmap loading, replays and engine configuration.

use std::path::PathBuf;
use thiserror::Error;

/// A beatmap that cannot be turned into a note sequence.
///
/// Records are never skipped: the first offending record aborts the load so
/// spawn order stays identical between runs and replays.
#[derive(Debug, Error)]
pub enum BeatmapError {
    #[error("Failed to read beatmap file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse beatmap JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Note #{index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Note #{index}: invalid time {time}")]
    InvalidTime { index: usize, time: f64 },

    #[error("Note #{index}: unknown note type `{value}`")]
    UnknownType { index: usize, value: String },

    #[error("Note #{index}: {note_type} note needs a positive duration, got {duration}")]
    InvalidDuration {
        index: usize,
        note_type: &'static str,
        duration: f64,
    },

    #[error("Note #{index}: swipe note has no direction")]
    MissingDirection { index: usize },

    #[error("Note #{index}: unknown swipe direction `{value}`")]
    UnknownDirection { index: usize, value: String },

    #[error("Note #{index}: target gesture `{gesture}` can never be matched")]
    UnmatchableGesture { index: usize, gesture: String },
}

/// Tunables that would make the engine produce nonsensical judgements.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("`{field}` must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`note_speed` must be positive, got {0}")]
    NonPositiveSpeed(f64),

    #[error("`tolerance_perfect` ({perfect}) is larger than `tolerance_great` ({great})")]
    ToleranceOrder { perfect: f64, great: f64 },
}

/// A replay file that cannot be read back.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read replay file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse replay JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Replay frame #{index}: invalid time {time}")]
    InvalidTime { index: usize, time: f64 },
}

/// Anything that stops an engine or a replay from being built.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Beatmap(#[from] BeatmapError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}
