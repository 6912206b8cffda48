//! Information-Set Monte Carlo Tree Search.
//!
//! ## Overview
//!
//! Hidden cards make a single game tree meaningless, so every decision
//! searches many determinizations: concrete games consistent with what
//! the observer knows. Key pieces:
//!
//! - **Arena trees**: one `SearchTree` per determinization, nodes addressed
//!   by `NodeId`
//! - **UCB1 selection** restricted to actions legal in the sampled state
//! - **Playout policies**: uniform or hazard-aware heuristic
//! - **Aggregation**: per-action win ratios averaged across samples
//! - **Reproducible**: a fixed seed gives a fixed decision, threaded or not
//!
//! ## Usage
//!
//! ```rust
//! use kitten_ismcts::games::kittens::new_game;
//! use kitten_ismcts::mcts::{IsmctsConfig, IsmctsSearch};
//! use kitten_ismcts::rules::RulesEngine;
//!
//! let (game, state) = new_game(3, 7).unwrap();
//! let me = state.current_player();
//! let legal = game.legal_actions(&state, me);
//!
//! let config = IsmctsConfig::default().with_determinizations(4).with_simulations(10);
//! let mut search = IsmctsSearch::new(game, config).unwrap();
//! let action = search.decide(&state, me, &legal).unwrap();
//! assert!(legal.contains(&action));
//! ```

pub mod config;
pub mod flat;
pub mod node;
pub mod playout;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::IsmctsConfig;
pub use flat::FlatSearch;
pub use node::{NodeId, SearchNode};
pub use playout::{HeuristicPlayout, PlayoutEnd, PlayoutPolicy, UniformPlayout};
pub use policy::{ucb1_score, SelectionPolicy, Ucb1};
pub use search::IsmctsSearch;
pub use stats::SearchStats;
pub use tree::SearchTree;
