//! Round Controller: the session state machine
//!
//! Transitions:
//! - LOADING → ACTIVE: non-empty deck arrives (round 0, score 0/0, streak 0)
//! - LOADING → UNAVAILABLE: deck fetch failed or deck empty
//! - ACTIVE → REVEALING: one decision judged, score and streak updated
//! - REVEALING → ACTIVE: dwell elapsed, more rounds left
//! - REVEALING → COMPLETE: dwell elapsed on the last round
//! - any → LOADING: restart
//!
//! Every mutation goes through [`RoundController::handle`].

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::core::judge::{Referee, TagReferee};
use crate::types::{
    Deck, DiscardReason, Phase, PhraseRecord, SessionSnapshot, SessionState, Transition, Verdict,
};
use crate::REVEAL_DWELL_MS;

/// Inputs the controller reacts to
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Phrase pool answered with a deck
    DeckLoaded(Deck),
    /// Phrase pool could not be reached
    DeckFailed(String),
    /// Committed decision from a gesture or key
    Decide { guess_is_authentic: bool, at: Instant },
    /// Clock sample; finishes the reveal once its dwell is over
    Tick(Instant),
    /// Throw the session away and wait for a new deck
    Restart,
}

/// Session state machine, sole writer of [`SessionState`]
#[derive(Debug)]
pub struct RoundController<R: Referee = TagReferee> {
    referee: R,
    dwell: Duration,
    deck: Deck,
    state: SessionState,
    /// Verdict of the round being revealed
    verdict: Option<Verdict>,
    /// When the current reveal ends
    reveal_until: Option<Instant>,
}

impl Default for RoundController<TagReferee> {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundController<TagReferee> {
    /// Controller judging locally, with the standard dwell
    pub fn new() -> Self {
        Self::with_referee(TagReferee, Duration::from_millis(REVEAL_DWELL_MS))
    }
}

impl<R: Referee> RoundController<R> {
    pub fn with_referee(referee: R, dwell: Duration) -> Self {
        Self {
            referee,
            dwell,
            deck: Vec::new(),
            state: SessionState::loading(),
            verdict: None,
            reveal_until: None,
        }
    }

    /// Apply one event and report what it did
    pub fn handle(&mut self, event: SessionEvent) -> Transition {
        let transition = match event {
            SessionEvent::DeckLoaded(deck) => self.on_deck(deck),
            SessionEvent::DeckFailed(reason) => self.on_deck_failed(reason),
            SessionEvent::Decide { guess_is_authentic, at } => self.on_decision(guess_is_authentic, at),
            SessionEvent::Tick(now) => self.on_tick(now),
            SessionEvent::Restart => self.on_restart(),
        };

        match &transition {
            Transition::Discarded { .. } => debug!(%transition, "event discarded"),
            Transition::Idle => {}
            _ => debug!(%transition, phase = %self.state.phase, "session transition"),
        }
        transition
    }

    /// Feed the result of a deck fetch
    pub fn load(&mut self, fetched: crate::Result<Deck>) -> Transition {
        match fetched {
            Ok(deck) => self.handle(SessionEvent::DeckLoaded(deck)),
            Err(e) => self.handle(SessionEvent::DeckFailed(e.to_string())),
        }
    }

    /// Commit a decision now
    pub fn decide(&mut self, guess_is_authentic: bool) -> Transition {
        self.handle(SessionEvent::Decide {
            guess_is_authentic,
            at: Instant::now(),
        })
    }

    /// Deliver the tick the pending reveal is waiting for, if any
    pub fn finish_reveal(&mut self) -> Transition {
        match self.reveal_until {
            Some(deadline) => self.handle(SessionEvent::Tick(deadline)),
            None => Transition::Idle,
        }
    }

    pub fn restart(&mut self) -> Transition {
        self.handle(SessionEvent::Restart)
    }

    fn on_deck(&mut self, deck: Deck) -> Transition {
        if self.state.phase != Phase::Loading {
            return self.discard(DiscardReason::StaleDeck);
        }
        if deck.is_empty() {
            return self.on_deck_failed("deck is empty".to_string());
        }

        let total = deck.len();
        self.deck = deck;
        self.state = SessionState {
            phase: Phase::Active,
            ..SessionState::loading()
        };
        info!(total, "session started");
        Transition::Started { total }
    }

    fn on_deck_failed(&mut self, reason: String) -> Transition {
        if self.state.phase != Phase::Loading {
            return self.discard(DiscardReason::StaleDeck);
        }
        warn!(%reason, "deck unavailable");
        self.state.phase = Phase::Unavailable;
        Transition::Unavailable { reason }
    }

    fn on_decision(&mut self, guess_is_authentic: bool, at: Instant) -> Transition {
        if !self.state.phase.accepts_input() {
            return self.discard(DiscardReason::OutOfPhase);
        }
        let Some(phrase) = self.deck.get(self.state.round_index) else {
            return self.discard(DiscardReason::OutOfPhase);
        };

        let verdict = match self.referee.judge(&phrase.id, guess_is_authentic) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(error = %e, round = self.state.round_index, "judge failed, round left open");
                return Transition::JudgeFailed { reason: e.to_string() };
            }
        };

        self.state.score.record(verdict.correct);
        self.state.streak = if verdict.correct { self.state.streak + 1 } else { 0 };
        self.state.phase = Phase::Revealing;
        self.verdict = Some(verdict);
        self.reveal_until = Some(at + self.dwell);

        Transition::Revealed {
            verdict,
            score: self.state.score,
            streak: self.state.streak,
        }
    }

    fn on_tick(&mut self, now: Instant) -> Transition {
        if self.state.phase != Phase::Revealing {
            return Transition::Idle;
        }
        match self.reveal_until {
            Some(deadline) if now >= deadline => {}
            _ => return Transition::Idle,
        }

        self.verdict = None;
        self.reveal_until = None;
        self.state.round_index += 1;

        if self.state.round_index == self.deck.len() {
            self.state.phase = Phase::Complete;
            let score = self.state.score;
            info!(correct = score.correct, total = score.total, "session complete");
            Transition::Completed {
                score,
                percentage: score.percentage(),
            }
        } else {
            self.state.phase = Phase::Active;
            Transition::Advanced {
                round_index: self.state.round_index,
            }
        }
    }

    fn on_restart(&mut self) -> Transition {
        self.deck.clear();
        self.state = SessionState::loading();
        self.verdict = None;
        self.reveal_until = None;
        Transition::Restarted
    }

    fn discard(&self, reason: DiscardReason) -> Transition {
        Transition::Discarded {
            reason,
            phase: self.state.phase,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn deck(&self) -> &[PhraseRecord] {
        &self.deck
    }

    /// Phrase on screen while active or revealing
    pub fn current(&self) -> Option<&PhraseRecord> {
        match self.state.phase {
            Phase::Active | Phase::Revealing => self.deck.get(self.state.round_index),
            _ => None,
        }
    }

    /// Phrase shown behind the current card
    pub fn upcoming(&self) -> Option<&PhraseRecord> {
        self.current()?;
        self.deck.get(self.state.round_index + 1)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn reveal_deadline(&self) -> Option<Instant> {
        self.reveal_until
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.state.phase,
            self.state.round_index,
            self.deck.len(),
            self.state.score,
            self.state.streak,
            self.current().cloned(),
            self.verdict,
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Score;
    use crate::{GameError, Result};
    use std::cell::Cell;

    fn deck(ids: &[&str]) -> Deck {
        ids.iter()
            .map(|id| PhraseRecord::new(*id, format!("text of {}", id)))
            .collect()
    }

    fn started(ids: &[&str]) -> RoundController {
        let mut c = RoundController::new();
        c.handle(SessionEvent::DeckLoaded(deck(ids)));
        c
    }

    /// Referee whose first `failures` calls time out
    struct FlakyReferee {
        failures: Cell<u32>,
    }

    impl Referee for FlakyReferee {
        fn judge(&self, id: &crate::types::PhraseId, guess: bool) -> Result<Verdict> {
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(GameError::JudgeUnavailable("timed out".into()));
            }
            crate::core::judge::judge(id.as_str(), guess)
        }
    }

    #[test]
    fn test_initial_phase_is_loading() {
        let c = RoundController::new();
        assert_eq!(c.phase(), Phase::Loading);
        assert!(c.current().is_none());
    }

    #[test]
    fn test_deck_starts_session() {
        let mut c = RoundController::new();
        let t = c.handle(SessionEvent::DeckLoaded(deck(&["real_1", "fake_1"])));
        assert_eq!(t, Transition::Started { total: 2 });
        assert_eq!(c.phase(), Phase::Active);
        assert_eq!(c.current().unwrap().id.as_str(), "real_1");
        assert_eq!(c.upcoming().unwrap().id.as_str(), "fake_1");
    }

    #[test]
    fn test_empty_deck_is_unavailable() {
        let mut c = RoundController::new();
        let t = c.handle(SessionEvent::DeckLoaded(Vec::new()));
        assert!(matches!(t, Transition::Unavailable { .. }));
        assert_eq!(c.phase(), Phase::Unavailable);
    }

    #[test]
    fn test_decision_while_loading_discarded() {
        let mut c = RoundController::new();
        let t = c.decide(true);
        assert_eq!(
            t,
            Transition::Discarded { reason: DiscardReason::OutOfPhase, phase: Phase::Loading }
        );
        assert_eq!(c.state().score, Score::default());
    }

    #[test]
    fn test_second_decision_in_reveal_discarded() {
        let mut c = started(&["real_1", "fake_1"]);
        c.decide(true);
        let t = c.decide(false);
        assert!(t.is_discarded());
        assert_eq!(c.state().score, Score { correct: 1, total: 1 });
    }

    #[test]
    fn test_tick_before_dwell_is_idle() {
        let mut c = started(&["real_1", "fake_1"]);
        let at = Instant::now();
        c.handle(SessionEvent::Decide { guess_is_authentic: true, at });
        let t = c.handle(SessionEvent::Tick(at + Duration::from_millis(REVEAL_DWELL_MS - 1)));
        assert_eq!(t, Transition::Idle);
        assert_eq!(c.phase(), Phase::Revealing);

        let t = c.handle(SessionEvent::Tick(at + Duration::from_millis(REVEAL_DWELL_MS)));
        assert_eq!(t, Transition::Advanced { round_index: 1 });
        assert_eq!(c.phase(), Phase::Active);
    }

    #[test]
    fn test_single_card_goes_straight_to_complete() {
        let mut c = started(&["fake_1"]);
        c.decide(false);
        let t = c.finish_reveal();
        assert_eq!(
            t,
            Transition::Completed { score: Score { correct: 1, total: 1 }, percentage: 100 }
        );
        assert_eq!(c.state().round_index, 1);
    }

    #[test]
    fn test_streak_resets_on_wrong() {
        let mut c = started(&["real_1", "real_2", "fake_1", "real_3"]);
        for guess in [true, true, true, true] {
            c.decide(guess);
            c.finish_reveal();
        }
        // real, real, wrong on fake, real
        assert_eq!(c.state().streak, 1);
        assert_eq!(c.state().score, Score { correct: 3, total: 4 });
        assert_eq!(c.phase(), Phase::Complete);
    }

    #[test]
    fn test_judge_failure_leaves_round_open() {
        let referee = FlakyReferee { failures: Cell::new(1) };
        let mut c = RoundController::with_referee(referee, Duration::from_millis(REVEAL_DWELL_MS));
        c.handle(SessionEvent::DeckLoaded(deck(&["real_1"])));

        let t = c.decide(true);
        assert!(matches!(t, Transition::JudgeFailed { .. }));
        assert_eq!(c.phase(), Phase::Active);
        assert_eq!(c.state().score, Score::default());

        let t = c.decide(true);
        assert!(matches!(t, Transition::Revealed { .. }));
    }

    #[test]
    fn test_restart_from_complete() {
        let mut c = started(&["real_1"]);
        c.decide(true);
        c.finish_reveal();
        assert_eq!(c.phase(), Phase::Complete);

        assert_eq!(c.restart(), Transition::Restarted);
        assert_eq!(c.phase(), Phase::Loading);
        assert!(c.deck().is_empty());

        c.handle(SessionEvent::DeckLoaded(deck(&["fake_9"])));
        assert_eq!(c.state().score, Score::default());
        assert_eq!(c.state().streak, 0);
    }

    #[test]
    fn test_deck_after_start_is_stale() {
        let mut c = started(&["real_1"]);
        let t = c.handle(SessionEvent::DeckLoaded(deck(&["fake_1", "fake_2"])));
        assert_eq!(
            t,
            Transition::Discarded { reason: DiscardReason::StaleDeck, phase: Phase::Active }
        );
        assert_eq!(c.deck().len(), 1);
    }

    #[test]
    fn test_failed_fetch_then_restart_recovers() {
        let mut c = RoundController::new();
        c.load(Err(GameError::DeckUnavailable("connection refused".into())));
        assert_eq!(c.phase(), Phase::Unavailable);
        assert!(c.decide(true).is_discarded());

        c.restart();
        c.load(Ok(deck(&["real_1"])));
        assert_eq!(c.phase(), Phase::Active);
    }
}
