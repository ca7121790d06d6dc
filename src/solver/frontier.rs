//! Best-first frontier of unexpanded nodes
//!
//! Entries are snapshots: the entropy a node had when it was pushed. Values
//! drift as other parts of the tree expand, so consumers discard stale pops
//! instead of reordering in place.

use super::node::NodeId;
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy)]
struct Entry {
    entropy: f64,
    id: NodeId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entropy
            .total_cmp(&other.entropy)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Working set ordered by ascending entropy, ties broken by node identity
#[derive(Debug, Default)]
pub struct Frontier {
    entries: BTreeSet<Entry>,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with its current entropy
    ///
    /// Returns false if the same node is already queued at the same value.
    pub fn push(&mut self, id: NodeId, entropy: f64) -> bool {
        self.entries.insert(Entry { entropy, id })
    }

    /// Remove and return the lowest-entropy entry
    pub fn pop(&mut self) -> Option<(NodeId, f64)> {
        self.entries.pop_first().map(|entry| (entry.id, entry.entropy))
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

    fn id(index: u32) -> NodeId {
        NodeId { index, stamp: 0 }
    }

    #[test]
    fn pops_in_ascending_entropy() {
        let mut frontier = Frontier::new();
        frontier.push(id(0), 3.0);
        frontier.push(id(1), 0.5);
        frontier.push(id(2), 1.5);

        assert_eq!(frontier.pop(), Some((id(1), 0.5)));
        assert_eq!(frontier.pop(), Some((id(2), 1.5)));
        assert_eq!(frontier.pop(), Some((id(0), 3.0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn equal_entropy_keeps_distinct_nodes() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(id(4), 1.0));
        assert!(frontier.push(id(2), 1.0));
        assert!(!frontier.push(id(2), 1.0));

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop(), Some((id(2), 1.0)));
        assert_eq!(frontier.pop(), Some((id(4), 1.0)));
        assert!(frontier.is_empty());
    }
}
