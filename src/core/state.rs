//! Authoritative game state.
//!
//! ## Layout
//!
//! - Per-seat `Player` records (hand + alive flag), never renumbered
//! - Shared `Deck` (top = next draw) and append-only discard pile
//! - Turn bookkeeping: current player, `turns_remaining`, pending phase
//! - The optional "top N known by P" fact from See the Future
//! - A `GameRng` for engine-internal randomness
//!
//! Everything is a small value type so `clone_state` is cheap; the discard
//! pile and action history are `im` vectors that share structure between
//! clones.
//!
//! Only the rules engine mutates a state. Mutators here are crate-private
//! primitives that keep the known-top fact honest; turn sequencing lives in
//! [`games::kittens`](crate::games::kittens).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionRecord;
use super::error::ConsistencyError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardKind, Deck, Hand};

/// One seat at the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub hand: Hand,
    pub alive: bool,
}

/// What the engine is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Current player may play cards or pass (draw).
    Play,
    /// `player` defused an Exploding card and must choose where it goes.
    /// The card sits in their hand until placed.
    AwaitingInsert { player: PlayerId },
    /// `giver` was targeted by a Favor and owes `receiver` one card.
    AwaitingGift { giver: PlayerId, receiver: PlayerId },
}

/// `player` knows the identity and order of the top `count` deck cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownTop {
    pub player: PlayerId,
    pub count: usize,
}

/// Complete game state including hidden information.
pub struct GameState {
    players: PlayerMap<Player>,
    deck: Deck,
    discard: Vector<CardKind>,
    current: PlayerId,
    turns_remaining: u32,
    phase: Phase,
    known_top: Option<KnownTop>,
    winner: Option<PlayerId>,
    turn_number: u32,
    history: Vector<ActionRecord>,
    total_cards: usize,
    pub rng: GameRng,
}

impl GameState {
    /// Lay out a game from explicit hands and deck. Player 0 moves first.
    ///
    /// The card total recorded here is what conservation checks compare
    /// against for the rest of the game.
    #[must_use]
    pub fn from_layout(hands: Vec<Hand>, deck: Deck, seed: u64) -> Self {
        let player_count = hands.len();
        let mut hands = hands.into_iter();
        let players = PlayerMap::new(player_count, |_| Player {
            hand: Hand::new(),
            alive: true,
        });
        let mut state = Self {
            players,
            deck,
            discard: Vector::new(),
            current: PlayerId::new(0),
            turns_remaining: 1,
            phase: Phase::Play,
            known_top: None,
            winner: None,
            turn_number: 1,
            history: Vector::new(),
            total_cards: 0,
            rng: GameRng::new(seed),
        };
        for (_, player) in state.players.iter_mut() {
            player.hand = hands.next().unwrap_or_default();
        }
        state.total_cards = state.card_count();
        state
    }

    /// Copy every field, substituting `rng`.
    #[must_use]
    pub(crate) fn with_rng(&self, rng: GameRng) -> Self {
        Self {
            players: self.players.clone(),
            deck: self.deck.clone(),
            discard: self.discard.clone(),
            current: self.current,
            turns_remaining: self.turns_remaining,
            phase: self.phase,
            known_top: self.known_top,
            winner: self.winner,
            turn_number: self.turn_number,
            history: self.history.clone(),
            total_cards: self.total_cards,
            rng,
        }
    }

    /// Clone for simulation.
    ///
    /// Takes `&mut self` because the clone gets a forked RNG stream, which
    /// advances this state's fork counter.
    #[must_use]
    pub fn clone_state(&mut self) -> Self {
        let rng = self.rng.fork();
        self.with_rng(rng)
    }

    // === Players ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.players[player].hand
    }

    pub(crate) fn hand_mut(&mut self, player: PlayerId) -> &mut Hand {
        &mut self.players[player].hand
    }

    pub(crate) fn hands_pair_mut(&mut self, a: PlayerId, b: PlayerId) -> (&mut Hand, &mut Hand) {
        let (pa, pb) = self.players.pair_mut(a, b);
        (&mut pa.hand, &mut pb.hand)
    }

    #[must_use]
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.players[player].alive
    }

    /// Alive seats in turn order starting from seat 0.
    #[must_use]
    pub fn alive_players(&self) -> SmallVec<[PlayerId; 8]> {
        self.players
            .iter()
            .filter(|(_, p)| p.alive)
            .map(|(id, _)| id)
            .collect()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|(_, p)| p.alive).count()
    }

    /// Alive opponents of `player` holding at least one card.
    #[must_use]
    pub fn eligible_targets(&self, player: PlayerId) -> SmallVec<[PlayerId; 8]> {
        self.players
            .iter()
            .filter(|(id, p)| *id != player && p.alive && !p.hand.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// Next alive seat after `player`, wrapping around. Returns `player`
    /// itself if nobody else is alive.
    #[must_use]
    pub fn next_alive_after(&self, player: PlayerId) -> PlayerId {
        let n = self.player_count();
        (1..=n)
            .map(|step| PlayerId::new(((player.index() + step) % n) as u8))
            .find(|&p| self.is_alive(p))
            .unwrap_or(player)
    }

    // === Turn bookkeeping ===

    /// Owner of the current turn.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Player whose decision the engine is waiting on, `None` once the game
    /// is over. Differs from `current_player` while a Favor gift is pending.
    #[must_use]
    pub fn to_move(&self) -> Option<PlayerId> {
        if self.winner.is_some() {
            return None;
        }
        Some(match self.phase {
            Phase::Play => self.current,
            Phase::AwaitingInsert { player } => player,
            Phase::AwaitingGift { giver, .. } => giver,
        })
    }

    #[must_use]
    pub fn turns_remaining(&self) -> u32 {
        self.turns_remaining
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Hand the turn to `player` with `turns` consecutive turns to take.
    pub(crate) fn start_turn(&mut self, player: PlayerId, turns: u32) {
        debug_assert!(turns >= 1);
        self.current = player;
        self.turns_remaining = turns;
        self.turn_number += 1;
    }

    /// Spend one of the current player's turns. Returns true if the player
    /// still owes more turns.
    pub(crate) fn consume_turn(&mut self) -> bool {
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        if self.turns_remaining == 0 {
            false
        } else {
            self.turn_number += 1;
            true
        }
    }

    // === Deck ===

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Pop the top card, consuming one card of any known-top fact.
    pub(crate) fn draw_top(&mut self) -> Option<CardKind> {
        let card = self.deck.draw()?;
        if let Some(known) = self.known_top.as_mut() {
            known.count -= 1;
            if known.count == 0 {
                self.known_top = None;
            }
        }
        Some(card)
    }

    /// Insert at `position`; clears the known-top fact if the card lands
    /// inside the known region.
    pub(crate) fn insert_into_deck(&mut self, position: usize, card: CardKind) {
        if let Some(known) = self.known_top {
            if position > self.deck.len().saturating_sub(known.count) {
                self.known_top = None;
            }
        }
        self.deck.insert(position, card);
    }

    pub(crate) fn shuffle_deck(&mut self) {
        self.deck.shuffle(&mut self.rng);
        self.known_top = None;
    }

    /// Replace the deck wholesale (determinization).
    pub(crate) fn replace_deck(&mut self, deck: Deck) {
        self.deck = deck;
    }

    // === Known top ===

    #[must_use]
    pub fn known_top(&self) -> Option<KnownTop> {
        self.known_top
    }

    pub(crate) fn set_known_top(&mut self, known: Option<KnownTop>) {
        self.known_top = known.filter(|k| k.count > 0);
    }

    /// Top cards `observer` has seen, top first. `None` if they know nothing.
    #[must_use]
    pub fn known_top_for(&self, observer: PlayerId) -> Option<Vec<CardKind>> {
        self.known_top
            .filter(|k| k.player == observer)
            .map(|k| self.deck.peek_top(k.count).collect())
    }

    // === Discard ===

    #[must_use]
    pub fn discard(&self) -> &Vector<CardKind> {
        &self.discard
    }

    pub(crate) fn push_discard(&mut self, card: CardKind) {
        self.discard.push_back(card);
    }

    // === Outcome ===

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// Knock `player` out: hand to discard, flag cleared.
    pub(crate) fn eliminate(&mut self, player: PlayerId) {
        let cards = self.players[player].hand.take_all();
        self.discard.extend(cards);
        self.players[player].alive = false;
    }

    /// Declare a winner if exactly one player is left.
    pub(crate) fn check_winner(&mut self) -> Option<PlayerId> {
        let alive = self.alive_players();
        if alive.len() == 1 {
            self.winner = Some(alive[0]);
        }
        self.winner
    }

    // === History ===

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    pub(crate) fn record(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    // === Invariants ===

    /// Cards in the deck, all hands, and the discard pile.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.players.iter().map(|(_, p)| p.hand.len()).sum::<usize>()
            + self.discard.len()
    }

    /// Card total fixed at deal time.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Exploding cards still in the deck or in hands.
    #[must_use]
    pub fn hazards_in_circulation(&self) -> usize {
        self.deck.count(CardKind::Exploding)
            + self
                .players
                .iter()
                .map(|(_, p)| p.hand.count(CardKind::Exploding))
                .sum::<usize>()
    }

    /// Verify card conservation and the hazard count.
    pub fn check_invariants(&self) -> Result<(), ConsistencyError> {
        let found = self.card_count();
        if found != self.total_cards {
            return Err(ConsistencyError::CardCountChanged {
                expected: self.total_cards,
                found,
            });
        }
        let hazards = self.hazards_in_circulation();
        let alive = self.alive_count();
        if hazards + 1 != alive {
            return Err(ConsistencyError::HazardCountMismatch {
                found: hazards,
                alive,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("current", &self.current)
            .field("turns_remaining", &self.turns_remaining)
            .field("phase", &self.phase)
            .field("deck_len", &self.deck.len())
            .field("known_top", &self.known_top)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}
