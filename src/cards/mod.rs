//! Card model: kinds, the shared deck, and player hands.
//!
//! Cards are plain `Copy` values compared by kind. The deck is ordered with
//! a top end; hands are unordered multisets.

pub mod kind;
pub mod deck;
pub mod hand;

pub use kind::{
    CardClass, CardKind, BASE_DECK, DEFUSES_IN_DECK, MAX_PLAYERS, MIN_PLAYERS, SEE_FUTURE_DEPTH,
    STARTING_HAND_SIZE,
};
pub use deck::Deck;
pub use hand::Hand;
