//! Card kinds and fixed deck composition.

use serde::{Deserialize, Serialize};

/// Every card in the game is one of these kinds. Cards carry no identity
/// beyond their kind, so two Attack cards are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Exploding,
    Defuse,
    Attack,
    Skip,
    Favor,
    Shuffle,
    SeeTheFuture,
    Nope,
    Tacocat,
    Cattermelon,
    HairyPotato,
    BeardCat,
    RainbowCat,
}

/// Rules category of a card kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardClass {
    /// Eliminates the drawer unless countered.
    Hazard,
    /// Neutralizes a drawn hazard.
    Counter,
    /// Played alone for an immediate effect.
    Instant,
    /// No effect alone; played as a matching pair.
    Combo,
}

impl CardKind {
    pub const COUNT: usize = 13;

    pub const ALL: [CardKind; Self::COUNT] = [
        CardKind::Exploding,
        CardKind::Defuse,
        CardKind::Attack,
        CardKind::Skip,
        CardKind::Favor,
        CardKind::Shuffle,
        CardKind::SeeTheFuture,
        CardKind::Nope,
        CardKind::Tacocat,
        CardKind::Cattermelon,
        CardKind::HairyPotato,
        CardKind::BeardCat,
        CardKind::RainbowCat,
    ];

    /// Kinds that may be played alone on your own turn, in legal-action order.
    pub const PLAYABLE_EFFECTS: [CardKind; 4] = [
        CardKind::Attack,
        CardKind::Skip,
        CardKind::Shuffle,
        CardKind::SeeTheFuture,
    ];

    /// Dense index for fixed-size count tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn class(self) -> CardClass {
        match self {
            CardKind::Exploding => CardClass::Hazard,
            CardKind::Defuse => CardClass::Counter,
            CardKind::Attack
            | CardKind::Skip
            | CardKind::Favor
            | CardKind::Shuffle
            | CardKind::SeeTheFuture
            | CardKind::Nope => CardClass::Instant,
            CardKind::Tacocat
            | CardKind::Cattermelon
            | CardKind::HairyPotato
            | CardKind::BeardCat
            | CardKind::RainbowCat => CardClass::Combo,
        }
    }

    #[must_use]
    pub const fn is_hazard(self) -> bool {
        matches!(self, CardKind::Exploding)
    }

    #[must_use]
    pub const fn is_combo(self) -> bool {
        matches!(self.class(), CardClass::Combo)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardKind::Exploding => "Exploding Kitten",
            CardKind::Defuse => "Defuse",
            CardKind::Attack => "Attack",
            CardKind::Skip => "Skip",
            CardKind::Favor => "Favor",
            CardKind::Shuffle => "Shuffle",
            CardKind::SeeTheFuture => "See the Future",
            CardKind::Nope => "Nope",
            CardKind::Tacocat => "Tacocat",
            CardKind::Cattermelon => "Cattermelon",
            CardKind::HairyPotato => "Hairy Potato Cat",
            CardKind::BeardCat => "Beard Cat",
            CardKind::RainbowCat => "Rainbow-Ralphing Cat",
        };
        f.write_str(name)
    }
}

/// Base deck before Defuse and Exploding cards are added.
pub const BASE_DECK: [(CardKind, usize); 11] = [
    (CardKind::Attack, 4),
    (CardKind::Skip, 4),
    (CardKind::Favor, 4),
    (CardKind::Shuffle, 4),
    (CardKind::SeeTheFuture, 5),
    (CardKind::Nope, 5),
    (CardKind::Tacocat, 4),
    (CardKind::Cattermelon, 4),
    (CardKind::HairyPotato, 4),
    (CardKind::BeardCat, 4),
    (CardKind::RainbowCat, 4),
];

/// Ordinary cards dealt to each player (a Defuse is added on top).
pub const STARTING_HAND_SIZE: usize = 4;

/// Defuse cards shuffled into the deck after dealing.
pub const DEFUSES_IN_DECK: usize = 2;

/// Cards revealed by See the Future.
pub const SEE_FUTURE_DEPTH: usize = 3;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_dense() {
        for (i, kind) in CardKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_classes() {
        assert_eq!(CardKind::Exploding.class(), CardClass::Hazard);
        assert_eq!(CardKind::Defuse.class(), CardClass::Counter);
        assert_eq!(CardKind::Nope.class(), CardClass::Instant);
        assert!(CardKind::BeardCat.is_combo());
        assert!(!CardKind::Favor.is_combo());
        assert_eq!(
            CardKind::ALL.iter().filter(|k| k.is_combo()).count(),
            5
        );
    }

    #[test]
    fn test_base_deck_size() {
        let total: usize = BASE_DECK.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 46);
        assert!(BASE_DECK.iter().all(|(k, _)| !k.is_hazard() && *k != CardKind::Defuse));
    }
}
