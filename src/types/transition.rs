//! Verdicts and the transitions the round controller reports

use serde::{Deserialize, Serialize};
use crate::types::{Label, Phase, Score};

/// Outcome of judging one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub correct: bool,
    pub actual_is_authentic: bool,
}

impl Verdict {
    pub fn actual(&self) -> Label {
        Label::from_guess(self.actual_is_authentic)
    }
}

/// Why an event was dropped without touching the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// Decision outside the active phase (mid-reveal, loading, finished)
    OutOfPhase,
    /// Deck delivered while not loading
    StaleDeck,
}

/// What a single event did to the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    /// Deck accepted, round 0 is active
    Started { total: usize },
    /// Deck missing or empty
    Unavailable { reason: String },
    /// Decision judged, verdict on screen
    Revealed { verdict: Verdict, score: Score, streak: u32 },
    /// Dwell over, next round active
    Advanced { round_index: usize },
    /// Dwell over on the last round
    Completed { score: Score, percentage: u32 },
    /// Session thrown away, waiting for a fresh deck
    Restarted,
    /// Judge did not answer; round stays active and unresolved
    JudgeFailed { reason: String },
    /// Event ignored
    Discarded { reason: DiscardReason, phase: Phase },
    /// Nothing due yet
    Idle,
}

impl Transition {
    /// Short code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Self::Started { .. } => "STARTED",
            Self::Unavailable { .. } => "UNAVAILABLE",
            Self::Revealed { .. } => "REVEALED",
            Self::Advanced { .. } => "ADVANCED",
            Self::Completed { .. } => "COMPLETED",
            Self::Restarted => "RESTARTED",
            Self::JudgeFailed { .. } => "JUDGE_FAILED",
            Self::Discarded { .. } => "DISCARDED",
            Self::Idle => "IDLE",
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded { .. })
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started { total } => write!(f, "{}: {} phrases", self.code(), total),
            Self::Unavailable { reason } => write!(f, "{}: {}", self.code(), reason),
            Self::Revealed { verdict, score, streak } => write!(
                f,
                "{}: {} (was {}) | {}/{} | streak {}",
                self.code(),
                if verdict.correct { "correct" } else { "wrong" },
                verdict.actual(),
                score.correct,
                score.total,
                streak
            ),
            Self::Advanced { round_index } => write!(f, "{}: round {}", self.code(), round_index + 1),
            Self::Completed { score, percentage } => write!(
                f,
                "{}: {}/{} ({}%)",
                self.code(),
                score.correct,
                score.total,
                percentage
            ),
            Self::JudgeFailed { reason } => write!(f, "{}: {}", self.code(), reason),
            Self::Discarded { reason, phase } => write!(f, "{}: {:?} in {}", self.code(), reason, phase),
            Self::Restarted | Self::Idle => write!(f, "{}", self.code()),
        }
    }
}
