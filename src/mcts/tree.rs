//! Arena-based search tree.
//!
//! A flat `Vec<SearchNode>` with index references. One tree per
//! determinization, discarded once the decision is made.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, SearchNode};
use crate::core::Action;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTree {
    /// Create a tree holding only a root.
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root());
        Self { nodes }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.index()]
    }

    /// Add a child of `parent` reached by `action`.
    pub fn expand(&mut self, parent: NodeId, action: Action) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new(parent, Some(action)));
        self.get_mut(parent).children.push((action, id));
        id
    }

    /// Walk from `leaf` to the root, adding one visit and `reward` to each
    /// node on the way.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut current = leaf;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.visits += 1;
            node.wins += reward;
            current = node.parent;
        }
    }

    /// `(action, wins/visits)` for each visited root child, in expansion order.
    pub fn root_ratios(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        self.get(self.root())
            .children
            .iter()
            .map(|&(action, id)| (action, self.get(id)))
            .filter(|(_, node)| node.visits > 0)
            .map(|(action, node)| (action, node.win_rate()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_tree_new() {
        let tree = SearchTree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.get(tree.root()).parent.is_none());
    }

    #[test]
    fn test_expand_links_parent() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let child = tree.expand(root, Action::Pass);

        assert_eq!(tree.get(child).parent, root);
        assert_eq!(tree.get(root).child(Action::Pass), Some(child));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_backpropagate_reaches_root() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let a = tree.expand(root, Action::Pass);
        let b = tree.expand(a, Action::play(CardKind::Skip));

        tree.backpropagate(b, 1.0);
        tree.backpropagate(a, 0.0);

        assert_eq!(tree.get(root).visits, 2);
        assert_eq!(tree.get(root).wins, 1.0);
        assert_eq!(tree.get(a).visits, 2);
        assert_eq!(tree.get(b).visits, 1);
    }

    #[test]
    fn test_root_ratios_skip_unvisited() {
        let mut tree = SearchTree::new();
        let root = tree.root();
        let pass = tree.expand(root, Action::Pass);
        tree.expand(root, Action::play(CardKind::Attack));

        tree.backpropagate(pass, 1.0);
        tree.backpropagate(pass, 0.0);

        let ratios: Vec<_> = tree.root_ratios().collect();
        assert_eq!(ratios, vec![(Action::Pass, 0.5)]);
    }
}
