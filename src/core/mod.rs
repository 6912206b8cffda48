//! Core types: player ids, RNG, actions, state, configuration, errors.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::GameConfig;
pub use action::{Action, ActionRecord};
pub use state::{GameState, KnownTop, Phase, Player};
pub use error::{ConfigError, ConsistencyError, Error, IllegalActionError, Result};
