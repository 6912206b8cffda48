//! Game setup configuration.
//!
//! `GameConfig` fixes the deal: player count, starting hand size, how many
//! Defuse cards go into the deck, and the base deck composition. Defaults
//! follow the standard rules; builders adjust individual knobs for tests and
//! experiments.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{
    CardKind, BASE_DECK, DEFUSES_IN_DECK, MAX_PLAYERS, MIN_PLAYERS, SEE_FUTURE_DEPTH,
    STARTING_HAND_SIZE,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats at the table.
    pub num_players: usize,

    /// Ordinary cards dealt to each player before their Defuse.
    pub hand_size: usize,

    /// Defuse cards shuffled into the deck after dealing.
    pub defuses_in_deck: usize,

    /// Cards revealed by See the Future.
    pub see_future_depth: usize,

    /// Deck composition before Defuse and Exploding cards are added.
    pub base_deck: Vec<(CardKind, usize)>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: MIN_PLAYERS,
            hand_size: STARTING_HAND_SIZE,
            defuses_in_deck: DEFUSES_IN_DECK,
            see_future_depth: SEE_FUTURE_DEPTH,
            base_deck: BASE_DECK.to_vec(),
        }
    }
}

impl GameConfig {
    /// Standard rules for `num_players` seats.
    #[must_use]
    pub fn new(num_players: usize) -> Self {
        Self {
            num_players,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_defuses_in_deck(mut self, count: usize) -> Self {
        self.defuses_in_deck = count;
        self
    }

    #[must_use]
    pub fn with_base_deck(mut self, base_deck: Vec<(CardKind, usize)>) -> Self {
        self.base_deck = base_deck;
        self
    }

    /// Exploding cards in a fresh game.
    #[must_use]
    pub fn hazard_count(&self) -> usize {
        self.num_players.saturating_sub(1)
    }

    #[must_use]
    pub fn base_deck_size(&self) -> usize {
        self.base_deck.iter().map(|(_, n)| n).sum()
    }

    /// Every card in play for the whole game.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.base_deck_size() + self.num_players + self.defuses_in_deck + self.hazard_count()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(self.num_players));
        }
        if self.num_players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                got: self.num_players,
                max: MAX_PLAYERS,
            });
        }
        // Defuse and Exploding counts are derived from the player count
        if let Some(&(kind, _)) = self
            .base_deck
            .iter()
            .find(|&&(kind, n)| n > 0 && (kind.is_hazard() || kind == CardKind::Defuse))
        {
            return Err(ConfigError::ReservedInBaseDeck(kind));
        }
        let needed = self.num_players * self.hand_size;
        let available = self.base_deck_size();
        if needed > available {
            return Err(ConfigError::DeckTooSmall { needed, available });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let config = GameConfig::new(3);
        assert_eq!(config.hazard_count(), 2);
        // 46 base + 3 dealt Defuses + 2 deck Defuses + 2 Exploding
        assert_eq!(config.total_cards(), 53);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_player_bounds() {
        assert_eq!(
            GameConfig::new(1).validate(),
            Err(ConfigError::TooFewPlayers(1))
        );
        assert!(matches!(
            GameConfig::new(MAX_PLAYERS + 1).validate(),
            Err(ConfigError::TooManyPlayers { .. })
        ));
    }

    #[test]
    fn test_deck_too_small() {
        let config = GameConfig::new(2).with_base_deck(vec![(CardKind::Skip, 5)]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DeckTooSmall {
                needed: 8,
                available: 5
            })
        );
    }

    #[test]
    fn test_reserved_kinds_rejected() {
        let hazards = GameConfig::new(2)
            .with_base_deck(vec![(CardKind::Exploding, 6), (CardKind::Skip, 20)]);
        assert_eq!(
            hazards.validate(),
            Err(ConfigError::ReservedInBaseDeck(CardKind::Exploding))
        );

        let defuses = GameConfig::new(2)
            .with_base_deck(vec![(CardKind::Skip, 20), (CardKind::Defuse, 3)]);
        assert_eq!(
            defuses.validate(),
            Err(ConfigError::ReservedInBaseDeck(CardKind::Defuse))
        );

        // A zero count is just an absent kind
        let empty = GameConfig::new(2)
            .with_base_deck(vec![(CardKind::Exploding, 0), (CardKind::Skip, 20)]);
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new(4).with_hand_size(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
