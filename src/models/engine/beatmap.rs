//! Beatmap loading: JSON note records into validated, time-sorted specs.

use super::note::{NoteShape, NoteSpec, NoteType, SwipeDirection, validate_specs};
use crate::models::error::BeatmapError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw note record as written in a beatmap file.
///
/// Every field is optional here so that validation can report exactly which
/// record is broken instead of a generic serde message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, alias = "gesture", skip_serializing_if = "Option::is_none")]
    pub pose: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub note_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl From<&NoteSpec> for RawNote {
    fn from(spec: &NoteSpec) -> Self {
        let has_duration = spec.note_type() != NoteType::Tap;
        Self {
            time: Some(spec.scheduled_time),
            pose: Some(spec.target_gesture.clone()),
            note_type: Some(spec.note_type().as_str().to_string()),
            duration: has_duration.then_some(spec.duration()),
            direction: spec.direction().map(|d| d.as_str().to_string()),
        }
    }
}

/// On-disk beatmap document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeatmapFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
    #[serde(default)]
    pub notes: Vec<RawNote>,
}

/// A validated beatmap, notes sorted by scheduled time.
#[derive(Debug, Clone, PartialEq)]
pub struct Beatmap {
    pub song: Option<String>,
    pub bpm: Option<f64>,
    pub specs: Vec<NoteSpec>,
    /// md5 of the source document (hex).
    pub hash: String,
}

impl Beatmap {
    /// Builds a beatmap from note specs (validated, then sorted).
    ///
    /// The hash is that of the document [`Beatmap::to_json`] writes, so a
    /// saved and reloaded beatmap keeps it.
    pub fn new(
        song: Option<String>,
        bpm: Option<f64>,
        mut specs: Vec<NoteSpec>,
    ) -> Result<Self, BeatmapError> {
        validate_specs(&specs)?;
        sort_specs(&mut specs);
        let mut beatmap = Self {
            song,
            bpm,
            specs,
            hash: String::new(),
        };
        beatmap.hash = content_hash(&beatmap.to_json()?);
        Ok(beatmap)
    }

    pub fn from_specs(specs: Vec<NoteSpec>) -> Result<Self, BeatmapError> {
        Self::new(None, None, specs)
    }

    /// Parses and validates a beatmap document.
    pub fn from_json(json: &str) -> Result<Self, BeatmapError> {
        let file: BeatmapFile = serde_json::from_str(json)?;
        let mut specs = file
            .notes
            .iter()
            .enumerate()
            .map(|(index, raw)| validate_record(index, raw))
            .collect::<Result<Vec<_>, _>>()?;
        sort_specs(&mut specs);

        Ok(Self {
            song: file.song,
            bpm: file.bpm,
            specs,
            hash: content_hash(json),
        })
    }

    /// Serializes back to the beatmap document format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let file = BeatmapFile {
            song: self.song.clone(),
            bpm: self.bpm,
            notes: self.specs.iter().map(RawNote::from).collect(),
        };
        serde_json::to_string_pretty(&file)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Loads a beatmap from a JSON file.
pub fn load_beatmap(path: &Path) -> Result<Beatmap, BeatmapError> {
    let content = fs::read_to_string(path).map_err(|source| BeatmapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let beatmap = Beatmap::from_json(&content)?;
    log::info!(
        "BEATMAP: Loaded {} notes from {:?} (hash {})",
        beatmap.len(),
        path,
        beatmap.hash
    );
    Ok(beatmap)
}

fn content_hash(json: &str) -> String {
    format!("{:x}", md5::compute(json.as_bytes()))
}

/// Stable ascending sort on scheduled time; ties keep input order.
pub fn sort_specs(specs: &mut [NoteSpec]) {
    specs.sort_by(|a, b| a.scheduled_time.total_cmp(&b.scheduled_time));
}

fn validate_record(index: usize, raw: &RawNote) -> Result<NoteSpec, BeatmapError> {
    let time = raw.time.ok_or(BeatmapError::MissingField {
        index,
        field: "time",
    })?;
    let gesture = raw.pose.as_deref().ok_or(BeatmapError::MissingField {
        index,
        field: "pose",
    })?;

    let note_type = match raw.note_type.as_deref() {
        None => NoteType::Tap,
        Some(value) => NoteType::from_str(value).ok_or_else(|| BeatmapError::UnknownType {
            index,
            value: value.to_string(),
        })?,
    };

    let direction = match raw.direction.as_deref() {
        None => None,
        Some(value) => Some(SwipeDirection::from_str(value).ok_or_else(|| {
            BeatmapError::UnknownDirection {
                index,
                value: value.to_string(),
            }
        })?),
    };

    // Taps ignore any duration/direction present in the record.
    let duration = raw.duration.unwrap_or(0.0);
    let shape = match note_type {
        NoteType::Tap => NoteShape::Tap,
        NoteType::Hold => NoteShape::Hold { duration },
        NoteType::Swipe => NoteShape::Swipe {
            duration,
            direction: direction.ok_or(BeatmapError::MissingDirection { index })?,
        },
    };

    let spec = NoteSpec {
        scheduled_time: time,
        target_gesture: gesture.to_string(),
        shape,
    };
    spec.validate(index)?;
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sorted_by_time_with_stable_ties() {
        let json = r#"{"notes": [
            {"time": 3.0, "pose": "V"},
            {"time": 1.0, "pose": "FIST"},
            {"time": 1.0, "pose": "OPEN"},
            {"time": 2.0, "pose": "V", "type": "hold", "duration": 1.5}
        ]}"#;
        let beatmap = Beatmap::from_json(json).unwrap();
        let order: Vec<(f64, &str)> = beatmap
            .specs
            .iter()
            .map(|s| (s.scheduled_time, s.target_gesture.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(1.0, "FIST"), (1.0, "OPEN"), (2.0, "V"), (3.0, "V")]
        );
        assert_eq!(beatmap.specs[2].shape, NoteShape::Hold { duration: 1.5 });
    }

    #[test]
    fn test_defaults_to_tap() {
        let beatmap = Beatmap::from_json(r#"{"notes": [{"time": 0.5, "gesture": "A"}]}"#).unwrap();
        let spec = &beatmap.specs[0];
        assert_eq!(spec.shape, NoteShape::Tap);
        assert_eq!(spec.duration(), 0.0);
        assert_eq!(spec.direction(), None);
    }

    #[test]
    fn test_swipe_record() {
        let json = r#"{"notes": [{"time": 1, "pose": "OPEN", "type": "swipe", "duration": 0.8, "direction": "LEFT"}]}"#;
        let beatmap = Beatmap::from_json(json).unwrap();
        assert_eq!(beatmap.specs[0].direction(), Some(SwipeDirection::Left));
    }

    #[test]
    fn test_hold_without_duration_is_rejected() {
        let json = r#"{"notes": [{"time": 0.0, "pose": "A"}, {"time": 1.0, "pose": "A", "type": "hold"}]}"#;
        match Beatmap::from_json(json) {
            Err(BeatmapError::InvalidDuration { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_swipe_without_direction_is_rejected() {
        let json = r#"{"notes": [{"time": 1.0, "pose": "A", "type": "swipe", "duration": 1.0}]}"#;
        assert!(matches!(
            Beatmap::from_json(json),
            Err(BeatmapError::MissingDirection { index: 0 })
        ));
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        assert!(matches!(
            Beatmap::from_json(r#"{"notes": [{"pose": "A"}]}"#),
            Err(BeatmapError::MissingField { field: "time", .. })
        ));
        assert!(matches!(
            Beatmap::from_json(r#"{"notes": [{"time": 1.0}]}"#),
            Err(BeatmapError::MissingField { field: "pose", .. })
        ));
        assert!(matches!(
            Beatmap::from_json(r#"{"notes": [{"time": 1.0, "pose": "A", "type": "slide"}]}"#),
            Err(BeatmapError::UnknownType { .. })
        ));
        assert!(matches!(
            Beatmap::from_json(r#"{"notes": [{"time": 1.0, "pose": "UNKNOWN"}]}"#),
            Err(BeatmapError::UnmatchableGesture { .. })
        ));
        assert!(matches!(
            Beatmap::from_json("not json"),
            Err(BeatmapError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"song": "demo", "notes": [{{"time": 2.0, "pose": "V"}}]}}"#).unwrap();
        let beatmap = load_beatmap(file.path()).unwrap();
        assert_eq!(beatmap.song.as_deref(), Some("demo"));
        assert_eq!(beatmap.len(), 1);
        assert_eq!(beatmap.hash.len(), 32);

        let missing = Path::new("/definitely/not/here/level.json");
        assert!(matches!(
            load_beatmap(missing),
            Err(BeatmapError::Io { .. })
        ));
    }

    #[test]
    fn test_to_json_reloads_identically() {
        let beatmap = Beatmap::new(
            Some("demo".into()),
            Some(120.0),
            vec![
                NoteSpec::swipe(4.0, "OPEN", 0.5, SwipeDirection::Right),
                NoteSpec::tap(1.0, "FIST"),
                NoteSpec::hold(2.0, "V", 1.25),
            ],
        )
        .unwrap();
        let reloaded = Beatmap::from_json(&beatmap.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.specs, beatmap.specs);
        assert_eq!(reloaded.hash, beatmap.hash);
        assert_eq!(reloaded, beatmap);
    }

    #[test]
    fn test_from_specs_rejects_what_the_loader_rejects() {
        let err = Beatmap::from_specs(vec![
            NoteSpec::tap(0.0, "A"),
            NoteSpec::hold(1.0, "A", -1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, BeatmapError::InvalidDuration { index: 1, .. }));

        assert!(matches!(
            Beatmap::from_specs(vec![NoteSpec::tap(-0.5, "A")]),
            Err(BeatmapError::InvalidTime { index: 0, .. })
        ));
    }
}
