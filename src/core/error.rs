//! Error taxonomy for the engine and the search.
//!
//! - `ConfigError`: invalid setup parameters, raised before any state exists.
//! - `IllegalActionError`: an action outside `legal_actions`. The state is
//!   left untouched; the engine never substitutes a different action.
//! - `ConsistencyError`: a transition or determinization broke a card
//!   invariant. The search drops the affected sample and keeps going.
//!
//! Running out of playout moves is not an error; see
//! [`PlayoutEnd::BudgetExceeded`](crate::mcts::PlayoutEnd).

use thiserror::Error;

use super::action::Action;
use crate::cards::CardKind;
use super::player::PlayerId;

/// Invalid game or search configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("at most {max} players are supported, got {got}")]
    TooManyPlayers { got: usize, max: usize },

    #[error("deck of {available} cards cannot deal {needed} starting cards")]
    DeckTooSmall { needed: usize, available: usize },

    #[error("{0:?} cannot be part of the base deck")]
    ReservedInBaseDeck(CardKind),

    #[error("search budget `{0}` must be positive")]
    ZeroBudget(&'static str),

    #[error("{agents} agents for {players} players")]
    AgentCountMismatch { agents: usize, players: usize },
}

/// An action that is not legal in the current state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalActionError {
    #[error("the game is already over")]
    GameOver,

    #[error("{player} cannot act now; waiting on {expected}")]
    NotYourTurn { player: PlayerId, expected: PlayerId },

    #[error("{0:?} is not a legal action")]
    NotLegal(Action),

    #[error("{0} has no card to give")]
    NothingToGive(PlayerId),
}

/// A card invariant was violated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("card count changed: expected {expected}, found {found}")]
    CardCountChanged { expected: usize, found: usize },

    #[error("{found} exploding cards in circulation with {alive} players alive")]
    HazardCountMismatch { found: usize, alive: usize },

    #[error("{player} holds {found} cards, expected {expected}")]
    HandSizeMismatch {
        player: PlayerId,
        expected: usize,
        found: usize,
    },

    #[error("known top of the deck was not preserved")]
    KnownTopMismatch,
}

/// Any error raised by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    IllegalAction(#[from] IllegalActionError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

pub type Result<T> = std::result::Result<T, Error>;
