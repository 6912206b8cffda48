//! What an applied action did, reported back to the caller.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardKind;
use crate::core::{Action, PlayerId};

/// A card moving from one hand to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: PlayerId,
    pub to: PlayerId,
    pub kind: CardKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Who acted.
    pub player: PlayerId,
    pub action: Action,
    /// Card drawn by a Pass, if the deck was not empty.
    pub drawn: Option<CardKind>,
    pub hazard_drawn: bool,
    /// The drawn hazard was neutralized by a Defuse.
    pub defused: bool,
    /// Where a defused hazard was put back.
    pub insert_position: Option<usize>,
    pub transfer: Option<Transfer>,
    /// Cards revealed by See the Future, top first.
    pub seen: SmallVec<[CardKind; 3]>,
    pub eliminated: Option<PlayerId>,
    pub winner: Option<PlayerId>,
}

impl Outcome {
    #[must_use]
    pub fn new(player: PlayerId, action: Action) -> Self {
        Self {
            player,
            action,
            drawn: None,
            hazard_drawn: false,
            defused: false,
            insert_position: None,
            transfer: None,
            seen: SmallVec::new(),
            eliminated: None,
            winner: None,
        }
    }

    /// The caller must follow up with `Action::InsertHazard`.
    #[must_use]
    pub fn needs_insert_position(&self) -> bool {
        self.defused && self.insert_position.is_none()
    }
}
