//! Gesture rhythm judgement engine.
//!
//! Notes scroll towards a judgement line and are judged against the player's
//! recognized hand gesture (and pointer, for swipes) once per tick:
//!
//! - `models` - beatmaps, notes, tunables, grades and replays
//! - `state` - the `GameEngine` tick loop (lifecycle, then judgement)
//! - `shared` - judgement events, the sink trait and snapshots
//! - `system` - channels carrying events to other threads
//! - `logic` - replaying recorded input through the engine

pub mod input;
pub mod logic;
pub mod models;
pub mod shared;
pub mod state;
pub mod system;

pub use input::{InputFrame, Pointer};
pub use models::engine::{Beatmap, JudgementConfig, Note, NoteSpec, load_beatmap};
pub use models::stats::{Judgement, ScoreKeeper};
pub use shared::messages::{JudgementEvent, JudgementSink};
pub use state::GameEngine;
