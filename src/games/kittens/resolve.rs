//! Card resolution and the turn/attack state machine.
//!
//! A player's turn normally ends with a draw. `turns_remaining` counts how
//! many turns the current player still owes:
//!
//! - Pass draws, then spends one turn.
//! - Skip spends one turn without drawing.
//! - Attack ends every owed turn at once and hands the next alive player
//!   `turns_remaining + 1` turns (1 -> 2, 2 -> 3, ...).
//!
//! When a player's count reaches zero the next alive player starts with one.
//! Callers have already validated every action.

use log::debug;

use crate::cards::CardKind;
use crate::core::{GameState, KnownTop, Phase, PlayerId};
use crate::rules::{Outcome, RulesEngine, Transfer};

use super::game::KittensGame;

impl KittensGame {
    /// Spend one of the current player's turns, passing play on when none
    /// are left.
    fn end_turn_step(&self, state: &mut GameState) {
        if !state.consume_turn() {
            let next = state.next_alive_after(state.current_player());
            state.start_turn(next, 1);
        }
    }

    pub(super) fn resolve_draw(&self, state: &mut GameState, player: PlayerId, outcome: &mut Outcome) {
        let Some(card) = state.draw_top() else {
            self.end_turn_step(state);
            return;
        };
        outcome.drawn = Some(card);

        if !card.is_hazard() {
            state.hand_mut(player).push(card);
            self.end_turn_step(state);
            return;
        }

        outcome.hazard_drawn = true;
        if state.hand_mut(player).remove_one(CardKind::Defuse) {
            // Held until the player picks a reinsertion position
            state.push_discard(CardKind::Defuse);
            state.hand_mut(player).push(card);
            state.set_phase(Phase::AwaitingInsert { player });
            outcome.defused = true;
        } else {
            debug!("{player} exploded");
            state.push_discard(card);
            state.eliminate(player);
            outcome.eliminated = Some(player);
            if state.check_winner().is_none() {
                let next = state.next_alive_after(player);
                state.start_turn(next, 1);
            }
        }
    }

    pub(super) fn resolve_insert(
        &self,
        state: &mut GameState,
        player: PlayerId,
        position: usize,
        outcome: &mut Outcome,
    ) {
        state.hand_mut(player).remove_one(CardKind::Exploding);
        state.insert_into_deck(position, CardKind::Exploding);
        state.set_phase(Phase::Play);
        outcome.insert_position = Some(position);
        self.end_turn_step(state);
    }

    pub(super) fn resolve_effect(
        &self,
        state: &mut GameState,
        player: PlayerId,
        kind: CardKind,
        target: Option<PlayerId>,
        outcome: &mut Outcome,
    ) {
        state.hand_mut(player).remove_one(kind);
        state.push_discard(kind);

        match (kind, target) {
            (CardKind::Attack, _) => {
                let next = state.next_alive_after(player);
                let turns = state.turns_remaining() + 1;
                state.start_turn(next, turns);
            }
            (CardKind::Skip, _) => self.end_turn_step(state),
            (CardKind::Shuffle, _) => state.shuffle_deck(),
            (CardKind::SeeTheFuture, _) => {
                let count = self.config().see_future_depth.min(state.deck().len());
                outcome.seen = state.deck().peek_top(count).collect();
                state.set_known_top(Some(KnownTop { player, count }));
            }
            (CardKind::Favor, Some(giver)) => {
                state.set_phase(Phase::AwaitingGift {
                    giver,
                    receiver: player,
                });
            }
            _ => {}
        }
    }

    pub(super) fn resolve_gift(
        &self,
        state: &mut GameState,
        giver: PlayerId,
        kind: CardKind,
        outcome: &mut Outcome,
    ) {
        let Phase::AwaitingGift { receiver, .. } = state.phase() else {
            return;
        };
        let (from, to) = state.hands_pair_mut(giver, receiver);
        from.remove_one(kind);
        to.push(kind);
        state.set_phase(Phase::Play);
        outcome.transfer = Some(Transfer {
            from: giver,
            to: receiver,
            kind,
        });
    }

    pub(super) fn resolve_combo(
        &self,
        state: &mut GameState,
        player: PlayerId,
        kind: CardKind,
        target: PlayerId,
        outcome: &mut Outcome,
    ) {
        let hand = state.hand_mut(player);
        hand.remove_one(kind);
        hand.remove_one(kind);
        state.push_discard(kind);
        state.push_discard(kind);

        let held = state.hand(target).len();
        let index = state.rng.gen_range_usize(0..held);
        let (from, to) = state.hands_pair_mut(target, player);
        let stolen = from.remove_at(index);
        to.push(stolen);
        outcome.transfer = Some(Transfer {
            from: target,
            to: player,
            kind: stolen,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Deck, Hand};
    use crate::core::{Action, GameConfig};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn engine(players: usize) -> KittensGame {
        KittensGame::new(GameConfig::new(players)).unwrap()
    }

    /// Three players, two Exploding cards at the bottom of the deck.
    fn three_player_state(p0: &[CardKind]) -> GameState {
        GameState::from_layout(
            vec![
                Hand::from_cards(p0),
                Hand::from_cards(&[CardKind::Nope, CardKind::Attack]),
                Hand::from_cards(&[CardKind::Skip]),
            ],
            Deck::from_bottom_up(vec![
                CardKind::Exploding,
                CardKind::Exploding,
                CardKind::Tacocat,
                CardKind::Favor,
                CardKind::Nope,
            ]),
            11,
        )
    }

    #[test]
    fn test_pass_draws_and_advances() {
        let game = engine(3);
        let mut state = three_player_state(&[CardKind::Defuse]);

        let outcome = game.apply(&mut state, Action::Pass).unwrap();
        assert_eq!(outcome.drawn, Some(CardKind::Nope));
        assert!(state.hand(P0).contains(CardKind::Nope));
        assert_eq!(state.current_player(), P1);
        assert_eq!(state.turns_remaining(), 1);
    }

    #[test]
    fn test_attack_then_stack() {
        let game = engine(3);
        let mut state = three_player_state(&[CardKind::Attack, CardKind::Defuse]);

        let outcome = game.apply(&mut state, Action::play(CardKind::Attack)).unwrap();
        assert_eq!(outcome.drawn, None);
        assert_eq!(state.current_player(), P1);
        assert_eq!(state.turns_remaining(), 2);
        assert_eq!(state.deck().len(), 5);

        game.apply(&mut state, Action::play(CardKind::Attack)).unwrap();
        assert_eq!(state.current_player(), P2);
        assert_eq!(state.turns_remaining(), 3);
    }

    #[test]
    fn test_skip_under_attack_keeps_player() {
        let game = engine(3);
        let mut state = three_player_state(&[CardKind::Attack, CardKind::Defuse]);
        game.apply(&mut state, Action::play(CardKind::Attack)).unwrap();

        // P1 owes two turns; give them a Skip to spend one
        state.hand_mut(P1).push(CardKind::Skip);

        game.apply(&mut state, Action::play(CardKind::Skip)).unwrap();
        assert_eq!(state.current_player(), P1);
        assert_eq!(state.turns_remaining(), 1);

        game.apply(&mut state, Action::Pass).unwrap();
        assert_eq!(state.current_player(), P2);
        assert_eq!(state.turns_remaining(), 1);
    }

    #[test]
    fn test_defused_draw_waits_for_insert() {
        let game = engine(2);
        let mut state = GameState::from_layout(
            vec![
                Hand::from_cards(&[CardKind::Defuse]),
                Hand::from_cards(&[CardKind::Skip]),
            ],
            Deck::from_bottom_up(vec![CardKind::Nope, CardKind::Exploding]),
            3,
        );

        let outcome = game.apply(&mut state, Action::Pass).unwrap();
        assert!(outcome.hazard_drawn && outcome.defused);
        assert!(outcome.needs_insert_position());
        assert_eq!(state.phase(), Phase::AwaitingInsert { player: P0 });
        assert_eq!(state.card_count(), state.total_cards());

        assert_eq!(
            game.legal_actions(&state, P0),
            vec![
                Action::InsertHazard { position: 0 },
                Action::InsertHazard { position: 1 }
            ]
        );

        let outcome = game.apply(&mut state, Action::InsertHazard { position: 0 }).unwrap();
        assert_eq!(outcome.insert_position, Some(0));
        assert_eq!(state.deck().as_slice(), &[CardKind::Exploding, CardKind::Nope]);
        assert_eq!(state.current_player(), P1);
        assert!(state.is_alive(P0));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_undefused_draw_eliminates() {
        let game = engine(3);
        let mut state = GameState::from_layout(
            vec![
                Hand::from_cards(&[CardKind::Skip]),
                Hand::from_cards(&[CardKind::Defuse]),
                Hand::from_cards(&[CardKind::Defuse]),
            ],
            Deck::from_bottom_up(vec![CardKind::Exploding, CardKind::Exploding]),
            3,
        );

        let outcome = game.apply(&mut state, Action::Pass).unwrap();
        assert_eq!(outcome.eliminated, Some(P0));
        assert!(!state.is_alive(P0));
        assert_eq!(state.hazards_in_circulation(), 1);
        assert_eq!(state.current_player(), P1);
        assert_eq!(outcome.winner, None);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_last_elimination_ends_game() {
        let game = engine(2);
        let mut state = GameState::from_layout(
            vec![Hand::new(), Hand::from_cards(&[CardKind::Defuse])],
            Deck::from_bottom_up(vec![CardKind::Exploding]),
            3,
        );

        let outcome = game.apply(&mut state, Action::Pass).unwrap();
        assert_eq!(outcome.winner, Some(P1));
        assert!(state.is_terminal());
        assert_eq!(state.to_move(), None);
        assert_eq!(
            game.apply(&mut state, Action::Pass),
            Err(crate::core::IllegalActionError::GameOver)
        );
    }

    #[test]
    fn test_see_the_future_reveals_top() {
        let game = engine(3);
        let mut state = three_player_state(&[CardKind::SeeTheFuture]);

        let outcome = game.apply(&mut state, Action::play(CardKind::SeeTheFuture)).unwrap();
        assert_eq!(
            outcome.seen.as_slice(),
            &[CardKind::Nope, CardKind::Favor, CardKind::Tacocat]
        );
        assert_eq!(state.known_top(), Some(KnownTop { player: P0, count: 3 }));
        // Playing See the Future does not end the turn
        assert_eq!(state.current_player(), P0);
    }

    #[test]
    fn test_favor_waits_for_gift() {
        let game = engine(3);
        let mut state = three_player_state(&[CardKind::Favor]);

        game.apply(&mut state, Action::favor(P1)).unwrap();
        assert_eq!(state.to_move(), Some(P1));
        assert_eq!(state.current_player(), P0);

        let gifts = game.legal_actions(&state, P1);
        assert_eq!(gifts.len(), 2);

        let outcome = game
            .apply(&mut state, Action::GiveCard { kind: CardKind::Attack })
            .unwrap();
        assert_eq!(
            outcome.transfer,
            Some(Transfer {
                from: P1,
                to: P0,
                kind: CardKind::Attack
            })
        );
        assert_eq!(state.to_move(), Some(P0));
        assert!(state.hand(P0).contains(CardKind::Attack));
    }

    #[test]
    fn test_combo_pair_steals() {
        let game = engine(3);
        let mut state = three_player_state(&[CardKind::BeardCat, CardKind::BeardCat]);
        let before = state.card_count();

        let outcome = game
            .apply(
                &mut state,
                Action::PlayComboPair {
                    kind: CardKind::BeardCat,
                    target: P2,
                },
            )
            .unwrap();

        assert_eq!(
            outcome.transfer,
            Some(Transfer {
                from: P2,
                to: P0,
                kind: CardKind::Skip
            })
        );
        assert!(state.hand(P2).is_empty());
        assert_eq!(state.discard().len(), 2);
        assert_eq!(state.card_count(), before);
    }

    #[test]
    fn test_shuffle_clears_knowledge() {
        let game = engine(3);
        let mut state = three_player_state(&[CardKind::SeeTheFuture, CardKind::Shuffle]);

        game.apply(&mut state, Action::play(CardKind::SeeTheFuture)).unwrap();
        game.apply(&mut state, Action::play(CardKind::Shuffle)).unwrap();
        assert_eq!(state.known_top(), None);
        assert_eq!(state.deck().len(), 5);
    }
}
