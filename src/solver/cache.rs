//! State-merging registry
//!
//! Maps each [`NodeSpec`] to the node that represents it, so the same future
//! game state reached by different guess orders is expanded only once. The
//! cache never keeps a node alive: entries hold plain handles, and a handle
//! whose node has been collected simply stops resolving.

use super::node::{NodeId, NodeSpec};
use super::tree::Tree;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct Cache {
    entries: BTreeMap<NodeSpec, NodeId>,
}

impl Cache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live node registered under `spec`, if any
    #[must_use]
    pub fn lookup(&self, spec: &NodeSpec, tree: &Tree) -> Option<NodeId> {
        self.entries
            .get(spec)
            .copied()
            .filter(|&id| tree.contains(id))
    }

    /// Register `id` under `spec`, replacing any expired entry
    pub fn register(&mut self, spec: NodeSpec, id: NodeId) {
        self.entries.insert(spec, id);
    }

    /// Drop entries whose node has been collected
    ///
    /// Returns the number of entries removed.
    pub fn clean(&mut self, tree: &Tree) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, id| tree.contains(*id));
        before - self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::solver::node::Node;

    fn spec(lives: usize) -> NodeSpec {
        NodeSpec {
            remaining_lives: lives,
            knowledge: "__".to_string(),
            remaining_letters: "ab".to_string(),
        }
    }

    fn tree() -> Tree {
        Tree::new(vec![Word::new("ab").unwrap(), Word::new("ba").unwrap()])
    }

    #[test]
    fn lookup_finds_registered_live_node() {
        let mut tree = tree();
        let id = tree.insert(Node::leaf("__".into(), "ab".into(), 3, vec![0, 1]));
        let mut cache = Cache::new();
        cache.register(spec(3), id);

        assert_eq!(cache.lookup(&spec(3), &tree), Some(id));
        assert_eq!(cache.lookup(&spec(2), &tree), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clean_drops_collected_nodes() {
        let mut tree = tree();
        let root = tree.insert(Node::leaf("__".into(), "ab".into(), 3, vec![0, 1]));
        let orphan = tree.insert(Node::leaf("__".into(), "ab".into(), 2, vec![0, 1]));
        let mut cache = Cache::new();
        cache.register(spec(3), root);
        cache.register(spec(2), orphan);

        assert_eq!(tree.collect(root), 1);
        assert_eq!(cache.lookup(&spec(2), &tree), None);
        assert_eq!(cache.clean(&tree), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup(&spec(3), &tree), Some(root));
    }

    #[test]
    fn stale_handle_does_not_resolve_after_slot_reuse() {
        let mut tree = tree();
        let root = tree.insert(Node::leaf("__".into(), "ab".into(), 3, vec![0, 1]));
        let orphan = tree.insert(Node::leaf("__".into(), "ab".into(), 2, vec![0, 1]));
        let mut cache = Cache::new();
        cache.register(spec(2), orphan);

        tree.collect(root);
        let reused = tree.insert(Node::leaf("__".into(), "b".into(), 2, vec![1]));

        assert_eq!(reused.index, orphan.index);
        assert_eq!(cache.lookup(&spec(2), &tree), None);
    }
}
