//! Gesture Interpreter: drag displacement → one binary decision
//!
//! press → drag_to* → release. A release commits only when the displacement
//! strictly exceeds the threshold; right is authentic, left is fabricated.
//! State is cleared on every release whether it committed or not.

use crate::types::{GestureOutcome, GestureState, Key, Label};
use crate::{LEAN_HINT_THRESHOLD, SWIPE_THRESHOLD};

#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    state: GestureState,
    threshold: f64,
    hint_threshold: f64,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl GestureInterpreter {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: GestureState::default(),
            threshold,
            hint_threshold: LEAN_HINT_THRESHOLD.min(threshold),
        }
    }

    /// Pointer or touch down at `x`
    pub fn press(&mut self, x: f64) {
        self.state = GestureState {
            origin_x: Some(x),
            offset_x: 0.0,
            dragging: true,
        };
    }

    /// Pointer moved to `x`; ignored unless a drag is in progress
    pub fn drag_to(&mut self, x: f64) {
        if !self.state.dragging {
            return;
        }
        if let Some(origin) = self.state.origin_x {
            self.state.offset_x = x - origin;
        }
    }

    /// Pointer released (or left the card)
    pub fn release(&mut self) -> GestureOutcome {
        let outcome = Self::resolve(self.state.offset_x, self.threshold);
        self.state = GestureState::default();
        outcome
    }

    /// Commit-or-cancel decision for a final displacement
    pub fn resolve(offset_x: f64, threshold: f64) -> GestureOutcome {
        if offset_x.abs() > threshold {
            GestureOutcome::Commit(offset_x > 0.0)
        } else {
            GestureOutcome::Cancel
        }
    }

    /// Arrow keys commit directly, independent of any drag
    pub fn key(key: Key) -> Option<bool> {
        match key {
            Key::ArrowRight => Some(true),
            Key::ArrowLeft => Some(false),
            Key::Other => None,
        }
    }

    /// Label the card is visibly leaning toward mid-drag
    pub fn lean(&self) -> Option<Label> {
        if !self.state.dragging || self.state.offset_x.abs() <= self.hint_threshold {
            return None;
        }
        Some(Label::from_guess(self.state.offset_x > 0.0))
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
