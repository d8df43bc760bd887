pub mod messages;
pub mod snapshot;

pub use messages::{JudgementEvent, JudgementSink, NullSink, Tee};
pub use snapshot::GameplaySnapshot;
