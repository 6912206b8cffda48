//! Search tree node.
//!
//! Nodes live in an arena and point at each other by `NodeId`; the parent
//! link is an index used for backpropagation, never an owning pointer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Action;

/// Index into the `SearchTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node" (the root's parent).
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in one determinization's tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Action that led here from the parent (None for root).
    pub action: Option<Action>,

    pub visits: u32,

    /// Playouts through this node won by the observer.
    pub wins: f64,

    /// Children keyed by action, in expansion order.
    /// SmallVec covers the usual branching factor without allocating.
    pub children: SmallVec<[(Action, NodeId); 8]>,
}

impl SearchNode {
    pub fn new(parent: NodeId, action: Option<Action>) -> Self {
        Self {
            parent,
            action,
            visits: 0,
            wins: 0.0,
            children: SmallVec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(NodeId::NONE, None)
    }

    /// Observer win rate; 0 before the first visit.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / f64::from(self.visits)
        }
    }

    #[must_use]
    pub fn child(&self, action: Action) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|&(_, id)| id)
    }

    /// First action in `legal` that has no child yet.
    #[must_use]
    pub fn first_untried(&self, legal: &[Action]) -> Option<Action> {
        legal.iter().copied().find(|&a| self.child(a).is_none())
    }
}
