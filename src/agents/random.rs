use crate::cards::CardKind;
use crate::core::{Action, GameRng, GameState, PlayerId};

use super::Agent;

/// Uniformly random choices from a private seeded stream.
#[derive(Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_action(&mut self, _state: &GameState, _player: PlayerId, legal: &[Action]) -> Action {
        // Pass is always legal in the play phase
        self.rng.choose(legal).copied().unwrap_or(Action::Pass)
    }

    fn choose_insert_position(&mut self, _state: &GameState, _player: PlayerId, max_position: usize) -> usize {
        self.rng.gen_inclusive(0, max_position)
    }

    fn choose_card_to_give(&mut self, state: &GameState, player: PlayerId) -> Option<CardKind> {
        let cards: Vec<CardKind> = state.hand(player).iter().collect();
        self.rng.choose(&cards).copied()
    }
}
