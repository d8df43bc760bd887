pub mod beatmap;
pub mod generator;
pub mod hit_window;
pub mod note;
pub mod playfield;

pub use beatmap::{Beatmap, BeatmapFile, RawNote, load_beatmap};
pub use generator::{DEFAULT_POSES, generate_beatmap};
pub use hit_window::ToleranceWindow;
pub use note::{
    Note, NoteId, NoteKind, NoteShape, NoteSpec, NoteType, SwipeDirection, UNKNOWN_GESTURE,
    validate_specs,
};
pub use playfield::JudgementConfig;
