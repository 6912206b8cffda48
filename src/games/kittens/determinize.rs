//! Resampling hidden cards for one observer.
//!
//! The observer sees their own hand, the discard pile, every hand size, and
//! the top of the deck if they hold a See the Future fact. Everything else
//! (opponent hands and the unknown part of the deck) is pooled and dealt
//! back out at random.
//!
//! Exploding cards are never dealt into an opponent's hand: a player who
//! held one would already have exploded. They go back into the unknown
//! part of the deck. The one exception is an opponent in the middle of
//! reinserting a defused card, who keeps exactly that card.

use log::trace;

use crate::cards::{CardKind, Deck, Hand};
use crate::core::{ConsistencyError, GameRng, GameState, Phase, PlayerId};
use crate::rules::Determinize;

use super::game::KittensGame;

impl Determinize for KittensGame {
    fn determinize(
        &self,
        state: &GameState,
        observer: PlayerId,
        rng: &mut GameRng,
    ) -> Result<GameState, ConsistencyError> {
        let mut sample = state.with_rng(rng.fork());

        let deck = state.deck().as_slice();
        let known = state
            .known_top_for(observer)
            .map_or(0, |cards| cards.len());
        let (unknown_deck, known_deck) = deck.split_at(deck.len() - known);

        let pending_insert = match state.phase() {
            Phase::AwaitingInsert { player } if player != observer => Some(player),
            _ => None,
        };

        let mut pool: Vec<CardKind> = Vec::with_capacity(deck.len());
        let mut hazards = 0;
        for &card in unknown_deck {
            if card.is_hazard() {
                hazards += 1;
            } else {
                pool.push(card);
            }
        }

        // (seat, cards to deal, keeps a held hazard)
        let mut seats: Vec<(PlayerId, usize, bool)> = Vec::new();
        for player in PlayerId::all(state.player_count()) {
            if player == observer {
                continue;
            }
            let hand = state.hand(player);
            let keeps_hazard = pending_insert == Some(player) && hand.contains(CardKind::Exploding);
            let mut held_hazards = 0;
            for card in hand.iter() {
                if card.is_hazard() {
                    held_hazards += 1;
                } else {
                    pool.push(card);
                }
            }
            if keeps_hazard {
                held_hazards -= 1;
            }
            hazards += held_hazards;
            seats.push((player, hand.len() - usize::from(keeps_hazard), keeps_hazard));
        }

        rng.shuffle(&mut pool);

        for &(player, count, keeps_hazard) in &seats {
            let at = pool.len().saturating_sub(count);
            let mut hand = Hand::from_cards(&pool[at..]);
            pool.truncate(at);
            if keeps_hazard {
                hand.push(CardKind::Exploding);
            }
            *sample.hand_mut(player) = hand;
        }

        pool.extend(std::iter::repeat(CardKind::Exploding).take(hazards));
        rng.shuffle(&mut pool);
        pool.extend_from_slice(known_deck);
        sample.replace_deck(Deck::from_bottom_up(pool));

        verify(state, &sample, observer)?;
        trace!(
            "determinized for {observer}: {} hidden deck cards, {} known",
            unknown_deck.len(),
            known
        );
        Ok(sample)
    }
}

/// Check that `sample` agrees with everything `observer` can see in `truth`.
fn verify(truth: &GameState, sample: &GameState, observer: PlayerId) -> Result<(), ConsistencyError> {
    sample.check_invariants()?;

    if sample.hand(observer) != truth.hand(observer) {
        return Err(ConsistencyError::HandSizeMismatch {
            player: observer,
            expected: truth.hand(observer).len(),
            found: sample.hand(observer).len(),
        });
    }
    for player in PlayerId::all(truth.player_count()) {
        let expected = truth.hand(player).len();
        let found = sample.hand(player).len();
        if expected != found {
            return Err(ConsistencyError::HandSizeMismatch {
                player,
                expected,
                found,
            });
        }
    }
    if sample.deck().len() != truth.deck().len()
        || sample.known_top_for(observer) != truth.known_top_for(observer)
    {
        return Err(ConsistencyError::KnownTopMismatch);
    }
    Ok(())
}
