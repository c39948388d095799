//! UVB-76: real transmission or neural fake?
//!
//! Deck builder → round controller → judge, with a gesture interpreter
//! turning drags and arrow keys into decisions and an HTTP API serving decks
//! and verdicts.

pub mod core;
pub mod types;

use std::path::PathBuf;

// =============================================================================
// INTERACTION
// =============================================================================

/// Drag distance a release must exceed to commit a decision
pub const SWIPE_THRESHOLD: f64 = 120.0;

/// Drag distance at which the card shows which way it is leaning
pub const LEAN_HINT_THRESHOLD: f64 = 80.0;

/// How long a verdict stays on screen before the next round (milliseconds)
pub const REVEAL_DWELL_MS: u64 = 600;

// =============================================================================
// IDENTIFIER TAGS
// =============================================================================

/// Identifier prefix for intercepted transmissions
pub const AUTHENTIC_PREFIX: &str = "real_";

/// Identifier prefix for generated phrases
pub const FABRICATED_PREFIX: &str = "fake_";

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised at the deck, judge and pool boundaries
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("deck unavailable: {0}")]
    DeckUnavailable(String),

    #[error("malformed answer request: {0}")]
    MalformedAnswerRequest(String),

    #[error("unknown identifier tag: {0:?}")]
    UnknownIdentifierTag(String),

    #[error("judge unavailable: {0}")]
    JudgeUnavailable(String),

    #[error("failed to read phrase file {path}: {source}")]
    PoolIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
