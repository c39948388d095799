//! Session phase, score and the mutable session state

use serde::{Deserialize, Serialize};

/// Phases of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a deck, no input accepted
    Loading,
    /// Current phrase on screen, one decision accepted
    Active,
    /// Verdict on screen during the dwell, input ignored
    Revealing,
    /// Deck exhausted, final score shown
    Complete,
    /// Deck could not be obtained, only restart leaves this phase
    Unavailable,
}

impl Phase {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Phase::Loading => "\x1b[90m",     // Gray
            Phase::Active => "\x1b[37m",      // White
            Phase::Revealing => "\x1b[33m",   // Yellow
            Phase::Complete => "\x1b[32m",    // Green
            Phase::Unavailable => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Does this phase take player decisions?
    pub fn accepts_input(&self) -> bool {
        *self == Phase::Active
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Loading => "LOADING",
            Phase::Active => "ACTIVE",
            Phase::Revealing => "REVEALING",
            Phase::Complete => "COMPLETE",
            Phase::Unavailable => "UNAVAILABLE",
        };
        write!(f, "{}", name)
    }
}

/// Running tally of answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    /// Count one judged answer
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Accuracy in whole percent, halves rounded up; 0 before any answer
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (100.0 * self.correct as f64 / self.total as f64).round() as u32
    }
}

/// Everything the round controller mutates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub round_index: usize,
    pub score: Score,
    pub streak: u32,
    pub phase: Phase,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            round_index: 0,
            score: Score::default(),
            streak: 0,
            phase: Phase::Loading,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::loading()
    }
}
