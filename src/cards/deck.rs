//! The shared draw pile.
//!
//! Stored bottom-to-top in a `Vec`, so the top card is the last element and
//! drawing is a `pop`. Insert positions count from the bottom: `0` is the
//! bottom and `len()` is the top.

use serde::{Deserialize, Serialize};

use super::kind::CardKind;
use crate::core::GameRng;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardKind>,
}

impl Deck {
    /// Build from cards listed bottom first.
    #[must_use]
    pub fn from_bottom_up(cards: Vec<CardKind>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom first.
    #[must_use]
    pub fn as_slice(&self) -> &[CardKind] {
        &self.cards
    }

    /// Up to `n` cards from the top, top first.
    pub fn peek_top(&self, n: usize) -> impl Iterator<Item = CardKind> + '_ {
        self.cards.iter().rev().take(n).copied()
    }

    #[must_use]
    pub fn top(&self) -> Option<CardKind> {
        self.cards.last().copied()
    }

    pub fn draw(&mut self) -> Option<CardKind> {
        self.cards.pop()
    }

    /// Insert at `position` (0 = bottom, `len()` = top).
    ///
    /// Panics if `position > len()`; callers validate positions first.
    pub fn insert(&mut self, position: usize, card: CardKind) {
        self.cards.insert(position, card);
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove the top `n` cards, returning them bottom first.
    pub fn split_top(&mut self, n: usize) -> Vec<CardKind> {
        let at = self.cards.len().saturating_sub(n);
        self.cards.split_off(at)
    }

    /// Remove every card, returning them bottom first.
    pub fn take_all(&mut self) -> Vec<CardKind> {
        std::mem::take(&mut self.cards)
    }

    pub fn extend_top(&mut self, cards: impl IntoIterator<Item = CardKind>) {
        self.cards.extend(cards);
    }

    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&c| c == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Deck {
        Deck::from_bottom_up(vec![CardKind::Skip, CardKind::Favor, CardKind::Attack])
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = deck();
        assert_eq!(deck.draw(), Some(CardKind::Attack));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.top(), Some(CardKind::Favor));
    }

    #[test]
    fn test_peek_top_is_top_first() {
        let deck = deck();
        let seen: Vec<_> = deck.peek_top(2).collect();
        assert_eq!(seen, vec![CardKind::Attack, CardKind::Favor]);

        // Asking for more than the deck holds returns everything
        assert_eq!(deck.peek_top(10).count(), 3);
    }

    #[test]
    fn test_insert_positions() {
        let mut deck = deck();
        deck.insert(0, CardKind::Exploding);
        assert_eq!(deck.as_slice()[0], CardKind::Exploding);

        let top = deck.len();
        deck.insert(top, CardKind::Defuse);
        assert_eq!(deck.top(), Some(CardKind::Defuse));
        assert_eq!(deck.len(), 5);
    }

    #[test]
    fn test_split_top_and_extend() {
        let mut deck = deck();
        let top_two = deck.split_top(2);
        assert_eq!(top_two, vec![CardKind::Favor, CardKind::Attack]);
        assert_eq!(deck.as_slice(), &[CardKind::Skip]);

        deck.extend_top(top_two);
        assert_eq!(deck, self::deck());
    }

    #[test]
    fn test_shuffle_preserves_counts() {
        let mut deck = Deck::from_bottom_up(
            std::iter::repeat(CardKind::Nope)
                .take(10)
                .chain(std::iter::once(CardKind::Exploding))
                .collect(),
        );
        deck.shuffle(&mut GameRng::new(9));
        assert_eq!(deck.count(CardKind::Nope), 10);
        assert_eq!(deck.count(CardKind::Exploding), 1);
    }
}
