//! The seam between a game and the search.
//!
//! Games implement `RulesEngine` (legal actions, transitions, terminal
//! detection) and `Determinize` (hidden-information resampling). The search
//! calls into these traits but never interprets card semantics directly.

pub mod engine;
pub mod outcome;

pub use engine::{Determinize, RulesEngine};
pub use outcome::{Outcome, Transfer};
