//! Action representation.
//!
//! Actions are a closed enum. Policies, the engine and the search all match
//! on the same variants, and `Action` doubles as its own canonical identity:
//! two actions are equal exactly when kind and targets agree, so it can key
//! search statistics directly.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// End the play step and draw.
    Pass,

    /// Play one instant card. `target` is set for Favor only.
    PlayEffect {
        kind: CardKind,
        target: Option<PlayerId>,
    },

    /// Discard two matching combo cards to steal a random card from `target`.
    PlayComboPair { kind: CardKind, target: PlayerId },

    /// Put a defused Exploding card back (0 = bottom, deck length = top).
    InsertHazard { position: usize },

    /// Hand a card over in response to a Favor.
    GiveCard { kind: CardKind },
}

impl Action {
    /// Single-card play with no target.
    #[must_use]
    pub const fn play(kind: CardKind) -> Self {
        Action::PlayEffect { kind, target: None }
    }

    #[must_use]
    pub const fn favor(target: PlayerId) -> Self {
        Action::PlayEffect {
            kind: CardKind::Favor,
            target: Some(target),
        }
    }

    /// The card kind this action spends from hand, if any.
    #[must_use]
    pub fn card_kind(&self) -> Option<CardKind> {
        match *self {
            Action::PlayEffect { kind, .. }
            | Action::PlayComboPair { kind, .. }
            | Action::GiveCard { kind } => Some(kind),
            Action::Pass | Action::InsertHazard { .. } => None,
        }
    }

    /// The opponent this action targets, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match *self {
            Action::PlayEffect { target, .. } => target,
            Action::PlayComboPair { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Pass => write!(f, "pass"),
            Action::PlayEffect { kind, target: None } => write!(f, "play {kind}"),
            Action::PlayEffect {
                kind,
                target: Some(t),
            } => write!(f, "play {kind} on {t}"),
            Action::PlayComboPair { kind, target } => write!(f, "pair of {kind} on {target}"),
            Action::InsertHazard { position } => write!(f, "insert at {position}"),
            Action::GiveCard { kind } => write!(f, "give {kind}"),
        }
    }
}

/// An applied action, kept in the state's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    /// Turn number when the action was applied.
    pub turn: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32) -> Self {
        Self {
            player,
            action,
            turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_kind_and_target() {
        let a = Action::favor(PlayerId::new(1));
        let b = Action::PlayEffect {
            kind: CardKind::Favor,
            target: Some(PlayerId::new(1)),
        };
        let c = Action::favor(PlayerId::new(2));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_accessors() {
        let pair = Action::PlayComboPair {
            kind: CardKind::Tacocat,
            target: PlayerId::new(1),
        };
        assert_eq!(pair.card_kind(), Some(CardKind::Tacocat));
        assert_eq!(pair.target(), Some(PlayerId::new(1)));
        assert_eq!(Action::Pass.card_kind(), None);
        assert_eq!(Action::play(CardKind::Skip).target(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::play(CardKind::Attack).to_string(), "play Attack");
        assert_eq!(
            Action::InsertHazard { position: 3 }.to_string(),
            "insert at 3"
        );
    }

    #[test]
    fn test_serialization() {
        let action = Action::PlayComboPair {
            kind: CardKind::BeardCat,
            target: PlayerId::new(2),
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
