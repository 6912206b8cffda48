//! # kitten-ismcts
//!
//! An Exploding Kittens rules engine with an Information-Set MCTS player.
//!
//! ## Design Principles
//!
//! 1. **One source of truth**: `GameState` holds every card, hidden or not.
//!    Only the rules engine mutates it, and card totals are checkable at
//!    any point with `GameState::check_invariants`.
//!
//! 2. **Explicit randomness**: every shuffle, steal, sample, and playout
//!    draws from a seeded `GameRng`. No global generator.
//!
//! 3. **Cheap clones**: hands are small vectors and the discard pile and
//!    history are persistent `im` vectors, so the search can copy a state
//!    per iteration.
//!
//! ## Modules
//!
//! - `core`: players, RNG, actions, state, configuration, errors
//! - `cards`: card kinds, the deck, hands
//! - `rules`: `RulesEngine` and `Determinize` traits, action outcomes
//! - `games::kittens`: the concrete game and its determinizer
//! - `mcts`: ISMCTS, the flat variant, playout and selection policies
//! - `agents`: decision makers and a game driver

pub mod agents;
pub mod cards;
pub mod core;
pub mod games;
pub mod mcts;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ConfigError, ConsistencyError, Error, GameConfig, GameRng, GameState,
    IllegalActionError, KnownTop, Phase, PlayerId, PlayerMap, Result,
};

pub use crate::cards::{CardClass, CardKind, Deck, Hand};

pub use crate::rules::{Determinize, Outcome, RulesEngine, Transfer};

pub use crate::games::kittens::{new_game, KittensGame};

pub use crate::mcts::{
    FlatSearch, HeuristicPlayout, IsmctsConfig, IsmctsSearch, PlayoutEnd, PlayoutPolicy,
    SearchStats, SelectionPolicy, Ucb1, UniformPlayout,
};

pub use crate::agents::{play_game, Agent, FlatAgent, IsmctsAgent, RandomAgent};
