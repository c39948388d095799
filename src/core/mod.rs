//! Core modules for the UVB-76 game

pub mod deck;
pub mod judge;
pub mod controller;
pub mod gesture;
pub mod pool;
pub mod api;

pub use deck::build_deck;
pub use judge::{judge, Referee, TagReferee};
pub use controller::{RoundController, SessionEvent};
pub use gesture::GestureInterpreter;
pub use pool::PhrasePool;
pub use api::{create_router, run_server, AppState};
