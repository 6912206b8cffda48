//! Exploding Kittens, base deck.
//!
//! Players take turns playing action cards and then drawing. Drawing an
//! Exploding card without a Defuse eliminates you; the last player standing
//! wins. Supports 2-5 players.
//!
//! - `game`: dealing, legal actions, validation
//! - `resolve`: card effects and the turn/attack machine
//! - `determinize`: hidden-card resampling for the search

mod determinize;
mod game;
mod resolve;

pub use game::{new_game, KittensGame};
