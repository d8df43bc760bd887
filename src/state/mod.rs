//! Engine state.
//!
//! - `GameEngine` - Active gameplay: spawning, motion and judgement
//! - `Snapshot` - Read-only captures for presentation

pub mod game;
pub mod traits;

pub use game::GameEngine;
pub use traits::Snapshot;
