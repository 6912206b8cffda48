//! Tree selection policies.
//!
//! Selection only considers children whose action is legal in the state the
//! current iteration reached. Under determinization the same node can see
//! different legal sets across iterations, so the caller passes them in.

use super::node::{NodeId, SearchNode};
use super::tree::SearchTree;
use crate::core::Action;

/// UCB1 value of a child: `wins/visits + c * sqrt(ln(parent_visits) / visits)`.
///
/// Unvisited children score `+inf` so they are always tried first.
#[must_use]
pub fn ucb1_score(wins: f64, visits: u32, parent_visits: u32, exploration: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let visits = f64::from(visits);
    let ln_parent = f64::from(parent_visits.max(1)).ln();
    wins / visits + exploration * (ln_parent / visits).sqrt()
}

/// Policy for choosing which child to descend into.
pub trait SelectionPolicy: Send + Sync {
    fn score(&self, parent: &SearchNode, child: &SearchNode, exploration: f64) -> f64;

    /// Highest-scoring child among those reachable by an action in `legal`.
    /// Ties go to the earliest-expanded child.
    fn select(
        &self,
        tree: &SearchTree,
        node: NodeId,
        legal: &[Action],
        exploration: f64,
    ) -> Option<(Action, NodeId)> {
        let parent = tree.get(node);
        let mut best: Option<(Action, NodeId, f64)> = None;

        for &(action, child) in parent.children.iter().filter(|(a, _)| legal.contains(a)) {
            let score = self.score(parent, tree.get(child), exploration);
            if best.map_or(true, |(_, _, top)| score > top) {
                best = Some((action, child, score));
            }
        }
        best.map(|(action, child, _)| (action, child))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Ucb1;

impl SelectionPolicy for Ucb1 {
    fn score(&self, parent: &SearchNode, child: &SearchNode, exploration: f64) -> f64 {
        ucb1_score(child.wins, child.visits, parent.visits, exploration)
    }
}
