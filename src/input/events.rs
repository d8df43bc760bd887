use crate::models::engine::UNKNOWN_GESTURE;
use serde::{Deserialize, Serialize};

/// Pointer position in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One input sample, shared by every note judged in a tick.
///
/// Either part may be missing (no hand in frame); a missing gesture matches
/// nothing and a missing pointer is never within tolerance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    #[serde(default)]
    pub gesture: Option<String>,
    #[serde(default)]
    pub pointer: Option<Pointer>,
}

impl InputFrame {
    /// Frame with no recognized input.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(gesture: impl Into<String>, pointer: Option<Pointer>) -> Self {
        Self {
            gesture: Some(gesture.into()),
            pointer,
        }
    }

    pub fn gesture(gesture: impl Into<String>) -> Self {
        Self::new(gesture, None)
    }

    pub fn with_pointer(mut self, x: f64, y: f64) -> Self {
        self.pointer = Some(Pointer::new(x, y));
        self
    }

    /// Whether the current gesture satisfies `target`. UNKNOWN never does.
    pub fn matches(&self, target: &str) -> bool {
        match self.gesture.as_deref() {
            Some(name) => name != UNKNOWN_GESTURE && name == target,
            None => false,
        }
    }

    /// Whether the pointer's x lies within `tolerance` of `anchor_x`.
    pub fn pointer_near_x(&self, anchor_x: f64, tolerance: f64) -> bool {
        self.pointer
            .is_some_and(|p| (p.x - anchor_x).abs() <= tolerance)
    }
}
