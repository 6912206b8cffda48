//! Exploding Kittens rules: setup, legal actions, and action dispatch.

use log::trace;

use crate::cards::{CardKind, Deck, Hand};
use crate::core::{
    Action, ActionRecord, ConfigError, GameConfig, GameRng, GameState, IllegalActionError, Phase,
    PlayerId,
};
use crate::rules::{Outcome, RulesEngine};

/// Rules engine for the base game.
#[derive(Clone, Debug)]
pub struct KittensGame {
    config: GameConfig,
}

/// Deal a standard game for `num_players` seats.
pub fn new_game(num_players: usize, seed: u64) -> Result<(KittensGame, GameState), ConfigError> {
    let game = KittensGame::new(GameConfig::new(num_players))?;
    let state = game.new_game(seed);
    Ok((game, state))
}

impl KittensGame {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Deal a fresh game.
    ///
    /// Order: shuffle the base deck, deal `hand_size` cards plus one Defuse
    /// to each player, add the deck Defuses and shuffle, then add
    /// `num_players - 1` Exploding cards and shuffle again.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> GameState {
        let config = &self.config;
        let mut rng = GameRng::new(seed);

        let mut cards: Vec<CardKind> = config
            .base_deck
            .iter()
            .flat_map(|&(kind, count)| std::iter::repeat(kind).take(count))
            .collect();
        rng.shuffle(&mut cards);

        let mut deck = Deck::from_bottom_up(cards);
        let hands: Vec<Hand> = (0..config.num_players)
            .map(|_| {
                let mut hand = Hand::new();
                for card in deck.split_top(config.hand_size) {
                    hand.push(card);
                }
                hand.push(CardKind::Defuse);
                hand
            })
            .collect();

        let mut cards = deck.take_all();
        cards.extend(std::iter::repeat(CardKind::Defuse).take(config.defuses_in_deck));
        rng.shuffle(&mut cards);
        cards.extend(std::iter::repeat(CardKind::Exploding).take(config.hazard_count()));
        rng.shuffle(&mut cards);

        let mut state = GameState::from_layout(hands, Deck::from_bottom_up(cards), seed);
        state.rng = rng;
        state
    }

    /// Check `action` against the current phase and `player`'s hand without
    /// enumerating every legal action.
    pub fn check_legal(
        &self,
        state: &GameState,
        player: PlayerId,
        action: Action,
    ) -> Result<(), IllegalActionError> {
        let expected = state.to_move().ok_or(IllegalActionError::GameOver)?;
        if expected != player {
            return Err(IllegalActionError::NotYourTurn { player, expected });
        }

        let hand = state.hand(player);
        let is_target = |t: PlayerId| state.eligible_targets(player).contains(&t);

        let legal = match (state.phase(), action) {
            (Phase::Play, Action::Pass) => true,
            (Phase::Play, Action::PlayEffect { kind, target: None }) => {
                CardKind::PLAYABLE_EFFECTS.contains(&kind) && hand.contains(kind)
            }
            (
                Phase::Play,
                Action::PlayEffect {
                    kind: CardKind::Favor,
                    target: Some(target),
                },
            ) => hand.contains(CardKind::Favor) && is_target(target),
            (Phase::Play, Action::PlayComboPair { kind, target }) => {
                kind.is_combo() && hand.count(kind) >= 2 && is_target(target)
            }
            (Phase::AwaitingInsert { .. }, Action::InsertHazard { position }) => {
                position <= state.deck().len()
            }
            (Phase::AwaitingGift { .. }, Action::GiveCard { kind }) => hand.contains(kind),
            _ => false,
        };

        if legal {
            Ok(())
        } else {
            Err(IllegalActionError::NotLegal(action))
        }
    }
}

impl RulesEngine for KittensGame {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.to_move() != Some(player) {
            return Vec::new();
        }

        let hand = state.hand(player);
        match state.phase() {
            Phase::Play => {
                let mut actions = vec![Action::Pass];

                for kind in CardKind::PLAYABLE_EFFECTS {
                    if hand.contains(kind) {
                        actions.push(Action::play(kind));
                    }
                }

                let targets = state.eligible_targets(player);
                if hand.contains(CardKind::Favor) {
                    actions.extend(targets.iter().map(|&t| Action::favor(t)));
                }
                for kind in hand.matching_pairs() {
                    actions.extend(
                        targets
                            .iter()
                            .map(|&target| Action::PlayComboPair { kind, target }),
                    );
                }
                actions
            }
            Phase::AwaitingInsert { .. } => (0..=state.deck().len())
                .map(|position| Action::InsertHazard { position })
                .collect(),
            Phase::AwaitingGift { .. } => hand
                .distinct_kinds()
                .into_iter()
                .map(|kind| Action::GiveCard { kind })
                .collect(),
        }
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: Action,
    ) -> Result<Outcome, IllegalActionError> {
        self.check_legal(state, player, action)?;
        trace!("{player}: {action}");

        let turn = state.turn_number();
        let mut outcome = Outcome::new(player, action);

        match action {
            Action::Pass => self.resolve_draw(state, player, &mut outcome),
            Action::PlayEffect { kind, target } => {
                self.resolve_effect(state, player, kind, target, &mut outcome)
            }
            Action::PlayComboPair { kind, target } => {
                self.resolve_combo(state, player, kind, target, &mut outcome)
            }
            Action::InsertHazard { position } => {
                self.resolve_insert(state, player, position, &mut outcome)
            }
            Action::GiveCard { kind } => self.resolve_gift(state, player, kind, &mut outcome),
        }

        state.record(ActionRecord::new(player, action, turn));
        outcome.winner = state.check_winner();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_deal() {
        let (game, state) = new_game(2, 42).unwrap();

        for player in PlayerId::all(2) {
            let hand = state.hand(player);
            assert_eq!(hand.len(), 5);
            assert!(hand.contains(CardKind::Defuse));
            assert!(!hand.contains(CardKind::Exploding));
        }
        // 46 - 8 dealt + 2 Defuses + 1 Exploding
        assert_eq!(state.deck().len(), 41);
        assert_eq!(state.deck().count(CardKind::Exploding), 1);
        assert_eq!(state.total_cards(), game.config().total_cards());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_new_game_rejects_one_player() {
        assert_eq!(new_game(1, 0).unwrap_err(), ConfigError::TooFewPlayers(1));
    }

    #[test]
    fn test_hazards_in_base_deck_rejected() {
        let config = GameConfig::new(2)
            .with_base_deck(vec![(CardKind::Exploding, 6), (CardKind::Skip, 20)]);
        assert_eq!(
            KittensGame::new(config).unwrap_err(),
            ConfigError::ReservedInBaseDeck(CardKind::Exploding)
        );
    }

    #[test]
    fn test_new_game_is_seeded() {
        let (_, a) = new_game(3, 7).unwrap();
        let (_, b) = new_game(3, 7).unwrap();
        let (_, c) = new_game(3, 8).unwrap();

        assert_eq!(a.deck(), b.deck());
        assert_ne!(a.deck(), c.deck());
    }

    #[test]
    fn test_legal_actions_only_for_player_to_move() {
        let (game, state) = new_game(2, 1).unwrap();
        assert!(!game.legal_actions(&state, PlayerId::new(0)).is_empty());
        assert!(game.legal_actions(&state, PlayerId::new(1)).is_empty());
    }

    #[test]
    fn test_check_legal_agrees_with_enumeration() {
        let (game, state) = new_game(4, 99).unwrap();
        let player = state.current_player();

        for action in game.legal_actions(&state, player) {
            assert_eq!(game.check_legal(&state, player, action), Ok(()));
        }
        assert!(game
            .check_legal(&state, player, Action::InsertHazard { position: 0 })
            .is_err());
    }

    #[test]
    fn test_wrong_player_rejected() {
        let (game, mut state) = new_game(2, 5).unwrap();
        let err = game
            .apply_action(&mut state, PlayerId::new(1), Action::Pass)
            .unwrap_err();
        assert_eq!(
            err,
            IllegalActionError::NotYourTurn {
                player: PlayerId::new(1),
                expected: PlayerId::new(0)
            }
        );
    }
}
