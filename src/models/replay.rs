//! Serializable replay structures.
//!
//! A replay is the sequence of input frames a player produced, one per tick,
//! stamped with the game time of that tick. Feeding them back through a
//! fresh engine reproduces the same judgements.

use crate::input::{InputFrame, Pointer};
use crate::models::error::ReplayError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current replay format version for compatibility.
pub const REPLAY_FORMAT_VERSION: u8 = 1;

/// One recorded tick of input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    /// Game time in seconds.
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<Pointer>,
}

impl ReplayFrame {
    pub fn input(&self) -> InputFrame {
        InputFrame {
            gesture: self.gesture.clone(),
            pointer: self.pointer,
        }
    }
}

/// Recorded input frames plus the hash of the beatmap they were played on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayData {
    /// Format version for future compatibility.
    #[serde(default = "default_version")]
    pub version: u8,
    /// md5 of the beatmap document, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beatmap_hash: Option<String>,
    #[serde(default)]
    pub frames: Vec<ReplayFrame>,
}

fn default_version() -> u8 {
    REPLAY_FORMAT_VERSION
}

impl ReplayData {
    pub fn new(beatmap_hash: Option<String>) -> Self {
        Self {
            version: REPLAY_FORMAT_VERSION,
            beatmap_hash,
            frames: Vec::new(),
        }
    }

    /// Appends the input seen on one tick.
    pub fn record(&mut self, time: f64, frame: &InputFrame) {
        self.frames.push(ReplayFrame {
            time,
            gesture: frame.gesture.clone(),
            pointer: frame.pointer,
        });
    }

    /// Frames with a non-finite or negative time cannot be replayed.
    pub fn validate(&self) -> Result<(), ReplayError> {
        match self
            .frames
            .iter()
            .enumerate()
            .find(|(_, f)| !f.time.is_finite() || f.time < 0.0)
        {
            Some((index, frame)) => Err(ReplayError::InvalidTime {
                index,
                time: frame.time,
            }),
            None => Ok(()),
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for ReplayData {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Loads and validates a replay file.
pub fn load_replay(path: &Path) -> Result<ReplayData, ReplayError> {
    let content = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let replay = ReplayData::from_json(&content)?;
    replay.validate()?;
    log::info!(
        "REPLAY: Loaded {} frames from {:?}",
        replay.frames.len(),
        path
    );
    Ok(replay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_record_and_reload() {
        let mut replay = ReplayData::new(Some("abc".into()));
        replay.record(0.5, &InputFrame::gesture("FIST"));
        replay.record(0.6, &InputFrame::empty());
        replay.record(0.7, &InputFrame::gesture("V").with_pointer(410.0, 20.0));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(replay.to_json().unwrap().as_bytes()).unwrap();

        let loaded = load_replay(file.path()).unwrap();
        assert_eq!(loaded, replay);
        assert_eq!(loaded.frames[1].input(), InputFrame::empty());
        assert_eq!(loaded.frames[2].input().pointer, Some(Pointer::new(410.0, 20.0)));
    }

    #[test]
    fn test_minimal_document() {
        let replay =
            ReplayData::from_json(r#"{"frames":[{"time":1.0,"gesture":"OPEN"}]}"#).unwrap();
        assert_eq!(replay.version, REPLAY_FORMAT_VERSION);
        assert_eq!(replay.beatmap_hash, None);
        assert!(replay.frames[0].input().matches("OPEN"));
    }

    #[test]
    fn test_negative_time_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"frames":[{"time":0.1},{"time":-1.0}]}"#)
            .unwrap();
        let err = load_replay(file.path()).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidTime { index: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_replay(Path::new("/nonexistent/replay.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
    }
}
