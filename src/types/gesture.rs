//! Pointer drag state and the decisions it resolves to

use serde::{Deserialize, Serialize};

/// Ephemeral state of one drag
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureState {
    /// Pointer position at press, `None` while idle
    pub origin_x: Option<f64>,
    /// Signed displacement, positive = rightward
    pub offset_x: f64,
    pub dragging: bool,
}

/// Result of releasing a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureOutcome {
    /// Threshold crossed; `true` means the player called it authentic
    Commit(bool),
    /// Snap back, no decision
    Cancel,
}

impl GestureOutcome {
    pub fn decision(&self) -> Option<bool> {
        match self {
            GestureOutcome::Commit(guess) => Some(*guess),
            GestureOutcome::Cancel => None,
        }
    }
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}
