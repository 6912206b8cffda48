//! A player's hand: an unordered multiset of card kinds.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kind::CardKind;

/// Hand contents. Order carries no meaning.
///
/// SmallVec keeps typical hands (5-10 cards) off the heap, which matters
/// because every simulation clones every hand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[CardKind; 12]>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_cards(cards: &[CardKind]) -> Self {
        Self {
            cards: SmallVec::from_slice(cards),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardKind> + '_ {
        self.cards.iter().copied()
    }

    pub fn push(&mut self, card: CardKind) {
        self.cards.push(card);
    }

    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&c| c == kind).count()
    }

    #[must_use]
    pub fn contains(&self, kind: CardKind) -> bool {
        self.cards.contains(&kind)
    }

    /// Remove one card of `kind`. Returns false if none was held.
    pub fn remove_one(&mut self, kind: CardKind) -> bool {
        match self.cards.iter().position(|&c| c == kind) {
            Some(pos) => {
                self.cards.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove the card at `index` (for uniformly random steals).
    pub fn remove_at(&mut self, index: usize) -> CardKind {
        self.cards.swap_remove(index)
    }

    /// Empty the hand, returning its cards.
    pub fn take_all(&mut self) -> Vec<CardKind> {
        std::mem::take(&mut self.cards).into_vec()
    }

    /// Distinct kinds held, in `CardKind` order.
    #[must_use]
    pub fn distinct_kinds(&self) -> SmallVec<[CardKind; 12]> {
        let mut kinds: SmallVec<[CardKind; 12]> = self.cards.clone();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    /// Combo kinds held at least twice, in `CardKind` order.
    #[must_use]
    pub fn matching_pairs(&self) -> SmallVec<[CardKind; 5]> {
        let mut counts = [0u8; CardKind::COUNT];
        for card in self.cards.iter().filter(|c| c.is_combo()) {
            counts[card.index()] += 1;
        }
        CardKind::ALL
            .iter()
            .copied()
            .filter(|k| counts[k.index()] >= 2)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_remove() {
        let mut hand = Hand::from_cards(&[CardKind::Skip, CardKind::Defuse, CardKind::Skip]);
        assert_eq!(hand.count(CardKind::Skip), 2);

        assert!(hand.remove_one(CardKind::Skip));
        assert_eq!(hand.count(CardKind::Skip), 1);
        assert!(!hand.remove_one(CardKind::Favor));
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn test_matching_pairs_only_combo_kinds() {
        let hand = Hand::from_cards(&[
            CardKind::Tacocat,
            CardKind::Skip,
            CardKind::Tacocat,
            CardKind::Skip,
            CardKind::BeardCat,
        ]);
        assert_eq!(hand.matching_pairs().as_slice(), &[CardKind::Tacocat]);
    }

    #[test]
    fn test_distinct_kinds() {
        let hand = Hand::from_cards(&[CardKind::Nope, CardKind::Attack, CardKind::Nope]);
        assert_eq!(
            hand.distinct_kinds().as_slice(),
            &[CardKind::Attack, CardKind::Nope]
        );
    }

    #[test]
    fn test_take_all() {
        let mut hand = Hand::from_cards(&[CardKind::Favor, CardKind::Defuse]);
        let cards = hand.take_all();
        assert_eq!(cards.len(), 2);
        assert!(hand.is_empty());
    }
}
