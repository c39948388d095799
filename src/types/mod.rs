//! Core types for the UVB-76 game

mod phrase;
mod state;
mod transition;
mod gesture;
mod output;

pub use phrase::{Label, PhraseId, PhraseRecord, Deck, decode_tag};
pub use state::{Phase, Score, SessionState};
pub use transition::{Verdict, Transition, DiscardReason};
pub use gesture::{GestureState, GestureOutcome, Key};
pub use output::SessionSnapshot;
