//! Traits shared by engine states.

/// Trait for creating render-ready snapshots.
///
/// Snapshots are immutable captures of state handed to whatever draws or
/// inspects the engine. They decouple game logic from presentation.
pub trait Snapshot {
    /// The snapshot type produced.
    type Output;

    /// Creates an immutable snapshot.
    fn create_snapshot(&self) -> Self::Output;
}
