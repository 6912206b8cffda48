//! Playout policies: finish a game from a leaf state.
//!
//! A playout only touches the state it was handed. Action choice draws on
//! the caller's `rng`; card randomness inside the engine draws on the
//! state's own stream.

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::rules::RulesEngine;

/// How a playout finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayoutEnd {
    Winner(PlayerId),
    /// Move cap reached (or the game stalled) with no winner.
    BudgetExceeded,
}

impl PlayoutEnd {
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Self::Winner(player) => Some(player),
            Self::BudgetExceeded => None,
        }
    }

    /// 1.0 if `observer` won, 0.0 otherwise.
    #[must_use]
    pub fn reward_for(self, observer: PlayerId) -> f64 {
        if self.winner() == Some(observer) {
            1.0
        } else {
            0.0
        }
    }
}

/// Chooses actions during simulation.
pub trait PlayoutPolicy: Send + Sync {
    /// Pick one of `legal` for whoever is to move. `None` if `legal` is empty.
    fn choose(&self, state: &GameState, legal: &[Action], rng: &mut GameRng) -> Option<Action>;

    /// Play until someone wins or `max_moves` actions have been applied.
    fn play_to_end<E: RulesEngine>(
        &self,
        engine: &E,
        state: &mut GameState,
        rng: &mut GameRng,
        max_moves: u32,
    ) -> PlayoutEnd
    where
        Self: Sized,
    {
        for _ in 0..max_moves {
            if let Some(winner) = engine.winner(state) {
                return PlayoutEnd::Winner(winner);
            }
            let legal = engine.legal_actions_to_move(state);
            let Some(action) = self.choose(state, &legal, rng) else {
                warn!("playout stalled with no legal action: {state:?}");
                return PlayoutEnd::BudgetExceeded;
            };
            if let Err(err) = engine.apply(state, action) {
                warn!("playout chose an illegal action: {err}");
                return PlayoutEnd::BudgetExceeded;
            }
        }

        match engine.winner(state) {
            Some(winner) => PlayoutEnd::Winner(winner),
            None => {
                trace!("playout hit the {max_moves}-move cap");
                PlayoutEnd::BudgetExceeded
            }
        }
    }
}

/// Uniformly random legal actions.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPlayout;

impl PlayoutPolicy for UniformPlayout {
    fn choose(&self, _state: &GameState, legal: &[Action], rng: &mut GameRng) -> Option<Action> {
        rng.choose(legal).copied()
    }
}

/// Weighted random actions that lean toward escapes when a draw is risky.
///
/// Risk is the share of Exploding cards in the deck, overridden by what the
/// mover knows about the top card.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicPlayout;

impl HeuristicPlayout {
    /// Chance that the mover's next draw is an Exploding card.
    #[must_use]
    pub fn draw_risk(state: &GameState, player: PlayerId) -> f64 {
        if let Some(top) = state.known_top_for(player).and_then(|cards| cards.first().copied()) {
            return if top.is_hazard() { 1.0 } else { 0.0 };
        }
        let deck = state.deck();
        if deck.is_empty() {
            return 0.0;
        }
        deck.count(CardKind::Exploding) as f64 / deck.len() as f64
    }

    /// Relative preference for `action` at draw risk `risk`.
    #[must_use]
    pub fn weight(action: Action, risk: f64) -> f64 {
        match action {
            Action::Pass => (1.0 - risk).max(0.05),
            Action::PlayEffect {
                kind: CardKind::Skip | CardKind::Attack,
                ..
            } => 0.1 + 2.0 * risk,
            Action::PlayEffect {
                kind: CardKind::Shuffle,
                ..
            } => 0.05 + 1.5 * risk,
            Action::PlayEffect {
                kind: CardKind::SeeTheFuture,
                ..
            } => 0.2 + risk,
            Action::PlayEffect { .. } | Action::PlayComboPair { .. } => 0.4,
            Action::InsertHazard { .. } => 1.0,
            Action::GiveCard {
                kind: CardKind::Defuse,
            } => 0.05,
            Action::GiveCard { .. } => 1.0,
        }
    }
}

impl PlayoutPolicy for HeuristicPlayout {
    fn choose(&self, state: &GameState, legal: &[Action], rng: &mut GameRng) -> Option<Action> {
        let risk = state
            .to_move()
            .map_or(0.0, |player| Self::draw_risk(state, player));
        let weights: Vec<f64> = legal.iter().map(|&a| Self::weight(a, risk)).collect();
        rng.choose_weighted(&weights).map(|i| legal[i])
    }
}
