//! Rules engine and determinization traits.
//!
//! The search only talks to a game through these two traits:
//! - `RulesEngine`: legal actions, transitions, terminal detection
//! - `Determinize`: resample hidden information for one observer
//!
//! ## Implementation Notes
//!
//! - `legal_actions`: empty if `player` is not the one to move
//! - `apply_action`: must reject anything `legal_actions` would not list,
//!   leaving the state untouched
//! - All randomness inside a transition comes from `state.rng`

use crate::core::{Action, ConsistencyError, GameConfig, GameRng, GameState, IllegalActionError, PlayerId};

use super::outcome::Outcome;

pub trait RulesEngine {
    fn config(&self) -> &GameConfig;

    /// Legal actions for `player`, in a stable order.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply `action` on behalf of `player`.
    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
    ) -> Result<Outcome, IllegalActionError>;

    // === Convenience Methods ===

    /// Apply `action` for whoever is to move.
    fn apply(&self, state: &mut GameState, action: Action) -> Result<Outcome, IllegalActionError> {
        let player = state.to_move().ok_or(IllegalActionError::GameOver)?;
        self.apply_action(state, player, action)
    }

    /// Legal actions for whoever is to move; empty once the game is over.
    fn legal_actions_to_move(&self, state: &GameState) -> Vec<Action> {
        state
            .to_move()
            .map(|player| self.legal_actions(state, player))
            .unwrap_or_default()
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        state.is_terminal()
    }

    fn winner(&self, state: &GameState) -> Option<PlayerId> {
        state.winner()
    }
}

/// Produces a concrete state consistent with one player's knowledge.
pub trait Determinize {
    /// Resample everything `observer` cannot see. Randomness comes from
    /// `rng`; the returned state owns a stream forked from it.
    fn determinize(
        &self,
        state: &GameState,
        observer: PlayerId,
        rng: &mut GameRng,
    ) -> Result<GameState, ConsistencyError>;
}
