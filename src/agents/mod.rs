//! Decision makers and a game driver.
//!
//! The engine asks an agent for three kinds of decision:
//!
//! - an action from the legal list on its turn
//! - where to put a defused Exploding card back (0 = bottom, max = top)
//! - which card to hand over when targeted by a Favor
//!
//! Agents receive the full `GameState` but must only read what their seat
//! can see. The search agents get that for free by determinizing.

mod random;
mod search;

pub use random::RandomAgent;
pub use search::{FlatAgent, IsmctsAgent};

use log::debug;

use crate::cards::{CardKind, Hand};
use crate::core::{Action, ConfigError, Error, GameState, IllegalActionError, Phase, PlayerId};
use crate::rules::RulesEngine;

pub trait Agent {
    /// Choose one of `legal` (never empty).
    fn choose_action(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Action;

    /// Choose a reinsertion position in `0..=max_position`.
    fn choose_insert_position(&mut self, state: &GameState, player: PlayerId, max_position: usize) -> usize;

    /// Choose a card kind from `player`'s hand to give away.
    fn choose_card_to_give(&mut self, state: &GameState, player: PlayerId) -> Option<CardKind>;
}

/// The card a player would miss least, `None` for an empty hand.
#[must_use]
pub fn least_valuable(hand: &Hand) -> Option<CardKind> {
    hand.iter().min_by_key(|&kind| keep_priority(kind))
}

/// Higher means more worth keeping.
fn keep_priority(kind: CardKind) -> u8 {
    match kind {
        CardKind::Defuse => 9,
        CardKind::Exploding => 8,
        CardKind::Attack => 7,
        CardKind::Skip => 6,
        CardKind::SeeTheFuture => 5,
        CardKind::Shuffle => 4,
        CardKind::Favor => 3,
        CardKind::Nope => 1,
        _ => 0,
    }
}

/// Drive a game with one agent per seat until someone wins or `max_moves`
/// actions have been applied. Returns the winner, or `None` at the cap.
pub fn play_game<E: RulesEngine>(
    engine: &E,
    state: &mut GameState,
    agents: &mut [Box<dyn Agent>],
    max_moves: u32,
) -> Result<Option<PlayerId>, Error> {
    if agents.len() != state.player_count() {
        return Err(ConfigError::AgentCountMismatch {
            agents: agents.len(),
            players: state.player_count(),
        }
        .into());
    }

    for _ in 0..max_moves {
        let Some(player) = state.to_move() else {
            break;
        };
        let agent = &mut agents[player.index()];

        let action = match state.phase() {
            Phase::Play => {
                let legal = engine.legal_actions(state, player);
                agent.choose_action(state, player, &legal)
            }
            Phase::AwaitingInsert { .. } => {
                let position = agent.choose_insert_position(state, player, state.deck().len());
                Action::InsertHazard { position }
            }
            Phase::AwaitingGift { .. } => {
                let kind = agent
                    .choose_card_to_give(state, player)
                    .ok_or(IllegalActionError::NothingToGive(player))?;
                Action::GiveCard { kind }
            }
        };

        let outcome = engine.apply_action(state, player, action)?;
        if let Some(eliminated) = outcome.eliminated {
            debug!("{eliminated} eliminated on turn {}", state.turn_number());
        }
    }

    Ok(engine.winner(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kittens::new_game;

    #[test]
    fn test_least_valuable_keeps_defuse() {
        let hand = Hand::from_cards(&[CardKind::Defuse, CardKind::Attack, CardKind::Tacocat]);
        assert_eq!(least_valuable(&hand), Some(CardKind::Tacocat));

        let hand = Hand::from_cards(&[CardKind::Defuse, CardKind::Skip]);
        assert_eq!(least_valuable(&hand), Some(CardKind::Skip));
        assert_eq!(least_valuable(&Hand::new()), None);
    }

    #[test]
    fn test_random_game_finishes() {
        let (game, mut state) = new_game(4, 2024).unwrap();
        let mut agents: Vec<Box<dyn Agent>> = (0..4)
            .map(|i| Box::new(RandomAgent::new(i)) as Box<dyn Agent>)
            .collect();

        let winner = play_game(&game, &mut state, &mut agents, 5_000).unwrap();
        assert!(winner.is_some());
        assert_eq!(state.winner(), winner);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_agent_count_checked() {
        let (game, mut state) = new_game(3, 1).unwrap();
        let mut agents: Vec<Box<dyn Agent>> = vec![Box::new(RandomAgent::new(0))];

        assert_eq!(
            play_game(&game, &mut state, &mut agents, 10),
            Err(Error::Config(ConfigError::AgentCountMismatch {
                agents: 1,
                players: 3
            }))
        );
    }
}
