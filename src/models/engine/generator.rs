//! Random test beatmap generation.

use super::beatmap::Beatmap;
use super::note::NoteSpec;
use crate::models::error::BeatmapError;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Gestures used when no gesture library is supplied.
pub const DEFAULT_POSES: [&str; 3] = ["FIST", "OPEN", "V"];

/// Time of the first generated note (seconds).
const FIRST_NOTE_TIME: f64 = 2.0;

/// Generates a tap/hold beatmap, two taps for every hold on average.
///
/// Same seed and poses always give the same beatmap.
pub fn generate_beatmap(
    seed: u64,
    poses: &[String],
    note_count: usize,
) -> Result<Beatmap, BeatmapError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let default_poses: Vec<String> = DEFAULT_POSES.iter().map(|p| p.to_string()).collect();
    let poses = if poses.is_empty() {
        &default_poses[..]
    } else {
        poses
    };

    let mut specs = Vec::with_capacity(note_count);
    let mut current_time = FIRST_NOTE_TIME;

    for _ in 0..note_count {
        let pose = poses.choose(&mut rng).cloned().unwrap_or_default();
        let is_hold = rng.random_range(0..3) == 2;

        if is_hold {
            let duration = rng.random_range(1.0..2.5);
            specs.push(NoteSpec::hold(current_time, pose, duration));
            current_time += duration + rng.random_range(0.5..1.0);
        } else {
            specs.push(NoteSpec::tap(current_time, pose));
            current_time += rng.random_range(0.8..1.5);
        }
    }

    Beatmap::new(Some(format!("generated_{seed}")), None, specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::note::NoteType;

    #[test]
    fn test_same_seed_same_beatmap() {
        let a = generate_beatmap(42, &[], 10).unwrap();
        let b = generate_beatmap(42, &[], 10).unwrap();
        assert_eq!(a.specs, b.specs);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn test_generated_notes_are_valid_and_spaced() {
        let poses = vec!["A".to_string(), "B".to_string()];
        let beatmap = generate_beatmap(7, &poses, 50).unwrap();
        assert_eq!(beatmap.specs[0].scheduled_time, FIRST_NOTE_TIME);

        for pair in beatmap.specs.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let min_gap = match prev.note_type() {
                NoteType::Hold => prev.duration() + 0.5,
                _ => 0.8,
            };
            assert!(next.scheduled_time - prev.scheduled_time >= min_gap - 1e-9);
        }
        for spec in &beatmap.specs {
            assert!(poses.contains(&spec.target_gesture));
            assert_ne!(spec.note_type(), NoteType::Swipe);
            if spec.note_type() == NoteType::Hold {
                assert!((1.0..2.5).contains(&spec.duration()));
            }
        }

        // Generated maps must survive the loader's validation with the same hash.
        let reloaded = Beatmap::from_json(&beatmap.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.len(), 50);
        assert_eq!(reloaded.hash, beatmap.hash);
        assert_eq!(reloaded.song.as_deref(), Some("generated_7"));
    }
}
