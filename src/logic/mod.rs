//! Drivers that feed the engine from recorded input.

pub mod replay_engine;

pub use replay_engine::{ReplayEngine, ReplayOutcome};
