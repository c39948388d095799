//! Output structures for terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{Phase, PhraseRecord, Score, Verdict};

/// Read-only view of a session for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    pub phase: Phase,
    /// Zero-based index of the phrase on screen
    pub round_index: usize,
    /// Deck length
    pub total: usize,
    pub score: Score,
    pub streak: u32,
    /// Accuracy in whole percent
    pub percentage: u32,
    /// Phrase on screen, if any
    pub phrase: Option<PhraseRecord>,
    /// Verdict of the round being revealed
    pub verdict: Option<Verdict>,
}

impl SessionSnapshot {
    pub fn new(
        phase: Phase,
        round_index: usize,
        total: usize,
        score: Score,
        streak: u32,
        phrase: Option<PhraseRecord>,
        verdict: Option<Verdict>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            phase,
            round_index,
            total,
            score,
            streak,
            percentage: score.percentage(),
            phrase,
            verdict,
        }
    }

    /// 1-based round counter shown under the card, e.g. `3 / 20`
    pub fn progress(&self) -> String {
        let shown = (self.round_index + 1).min(self.total);
        format!("{} / {}", shown, self.total)
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.phase.color_code();
        let reset = Phase::color_reset();

        format!(
            "{}[{}] {} | accuracy={}% | streak={}{}",
            color,
            self.phase,
            self.progress(),
            self.percentage,
            self.streak,
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "phase={} | round={} | score={}/{} | accuracy={}% | streak={}",
            self.phase,
            self.progress(),
            self.score.correct,
            self.score.total,
            self.percentage,
            self.streak
        )
    }
}
