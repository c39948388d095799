//! Integration tests for the round controller
//!
//! Drives whole sessions: deck → decisions → reveal dwell → completion

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use uvb76::core::{RoundController, SessionEvent};
use uvb76::types::{Deck, Phase, PhraseRecord, Score, Transition, Verdict};
use uvb76::REVEAL_DWELL_MS;

fn deck(cards: &[(&str, &str)]) -> Deck {
    cards.iter().map(|(id, text)| PhraseRecord::new(*id, *text)).collect()
}

/// Commit at `at`, then tick once the dwell is over
fn answer(c: &mut RoundController, guess: bool, at: Instant) -> (Transition, Transition) {
    let revealed = c.handle(SessionEvent::Decide { guess_is_authentic: guess, at });
    let after = c.handle(SessionEvent::Tick(at + Duration::from_millis(REVEAL_DWELL_MS)));
    (revealed, after)
}

#[test]
fn test_two_card_scenario() {
    let mut c = RoundController::new();
    c.handle(SessionEvent::DeckLoaded(deck(&[("real_1", "A"), ("fake_1", "B")])));
    let t0 = Instant::now();

    let (revealed, after) = answer(&mut c, true, t0);
    assert_eq!(
        revealed,
        Transition::Revealed {
            verdict: Verdict { correct: true, actual_is_authentic: true },
            score: Score { correct: 1, total: 1 },
            streak: 1,
        }
    );
    assert_eq!(after, Transition::Advanced { round_index: 1 });
    assert_eq!(c.current().unwrap().text, "B");

    let (revealed, after) = answer(&mut c, true, t0 + Duration::from_secs(2));
    assert_eq!(
        revealed,
        Transition::Revealed {
            verdict: Verdict { correct: false, actual_is_authentic: false },
            score: Score { correct: 1, total: 2 },
            streak: 0,
        }
    );
    assert_eq!(
        after,
        Transition::Completed { score: Score { correct: 1, total: 2 }, percentage: 50 }
    );
    assert_eq!(c.phase(), Phase::Complete);
}

#[test]
fn test_three_cards_three_cycles() {
    let mut c = RoundController::new();
    c.handle(SessionEvent::DeckLoaded(deck(&[("real_1", "A"), ("fake_1", "B"), ("real_2", "C")])));

    let mut reveals = 0;
    let mut t = Instant::now();
    while c.phase() != Phase::Complete {
        assert_eq!(c.phase(), Phase::Active);
        assert!(c.state().round_index < c.deck().len());

        let (revealed, _) = answer(&mut c, false, t);
        assert!(matches!(revealed, Transition::Revealed { .. }));
        reveals += 1;
        t += Duration::from_secs(1);
    }

    assert_eq!(reveals, 3);
    assert_eq!(c.state().round_index, 3);
}

#[test]
fn test_score_monotonic_and_streak_rules() {
    let cards = [
        ("real_1", "1"),
        ("real_2", "2"),
        ("fake_1", "3"),
        ("fake_2", "4"),
        ("real_3", "5"),
    ];
    let guesses = [true, false, false, false, true];

    let mut c = RoundController::new();
    c.handle(SessionEvent::DeckLoaded(deck(&cards)));
    let mut t = Instant::now();

    for guess in guesses {
        let before = c.state().clone();
        let (revealed, _) = answer(&mut c, guess, t);
        let Transition::Revealed { verdict, score, streak } = revealed else {
            panic!("expected a reveal, got {revealed:?}");
        };

        assert_eq!(score.total, before.score.total + 1);
        assert!(score.correct <= score.total);
        if verdict.correct {
            assert_eq!(streak, before.streak + 1);
        } else {
            assert_eq!(streak, 0);
        }
        t += Duration::from_secs(1);
    }

    assert_eq!(c.state().score, Score { correct: 4, total: 5 });
    assert_eq!(c.state().streak, 3);
    assert_eq!(c.snapshot().percentage, 80);
}

#[test]
fn test_input_during_reveal_not_queued() {
    let mut c = RoundController::new();
    c.handle(SessionEvent::DeckLoaded(deck(&[("real_1", "A"), ("fake_1", "B")])));
    let t0 = Instant::now();

    c.handle(SessionEvent::Decide { guess_is_authentic: true, at: t0 });
    let late = c.handle(SessionEvent::Decide { guess_is_authentic: false, at: t0 + Duration::from_millis(100) });
    assert!(late.is_discarded());

    c.handle(SessionEvent::Tick(t0 + Duration::from_millis(REVEAL_DWELL_MS)));
    // Round 2 starts clean, nothing carried over from the discarded input
    assert_eq!(c.phase(), Phase::Active);
    assert_eq!(c.state().score.total, 1);
    assert!(c.verdict().is_none());
}

#[test]
fn test_complete_accepts_only_restart() {
    let mut c = RoundController::new();
    c.handle(SessionEvent::DeckLoaded(deck(&[("fake_1", "B")])));
    answer(&mut c, false, Instant::now());
    assert_eq!(c.phase(), Phase::Complete);

    assert!(c.decide(true).is_discarded());
    assert_eq!(c.handle(SessionEvent::Tick(Instant::now())), Transition::Idle);
    assert_eq!(c.phase(), Phase::Complete);

    c.restart();
    assert_eq!(c.phase(), Phase::Loading);
}

#[test]
fn test_snapshot_tracks_current_phrase() {
    let mut c = RoundController::new();
    c.handle(SessionEvent::DeckLoaded(deck(&[("real_1", "A"), ("fake_1", "B")])));

    let snap = c.snapshot();
    assert_eq!(snap.phase, Phase::Active);
    assert_eq!(snap.total, 2);
    assert_eq!(snap.phrase.unwrap().text, "A");
    assert!(snap.verdict.is_none());

    c.decide(false);
    let snap = c.snapshot();
    assert_eq!(snap.phase, Phase::Revealing);
    assert_eq!(snap.verdict, Some(Verdict { correct: false, actual_is_authentic: true }));
}
