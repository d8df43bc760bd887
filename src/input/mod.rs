//! Per-tick player input as seen by the judgement engine.
//!
//! Gesture recognition happens upstream; frames only carry its result.

pub mod events;

pub use events::{InputFrame, Pointer};
