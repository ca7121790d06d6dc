//! Game-state tree nodes
//!
//! A node owns one equivalence class of game states, identified by its
//! [`NodeSpec`]. It starts as a leaf holding the candidate words still
//! consistent with that state and is expanded at most once into a
//! guess → outcome → child map.

use crate::core::{Outcome, PLACEHOLDER};
use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Index of a word in the tree's word table
pub type WordIdx = u32;

/// Entropy reported for a node with no lives left
///
/// Large but finite so that count-weighted sums stay ordered.
pub const DEAD_ENTROPY: f64 = 4_294_967_296.0;

/// Handle to a node in the tree arena
///
/// The stamp changes whenever a slot is freed, so a handle to a collected node
/// never resolves to whatever later reuses its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) stamp: u32,
}

/// Children of an expanded node, keyed by guess letter then outcome
pub type Children = BTreeMap<u8, BTreeMap<Outcome, NodeId>>;

/// Leaf or expanded contents of a node
#[derive(Debug, Clone)]
pub enum Payload {
    Leaf(Vec<WordIdx>),
    Expanded { n_words: usize, children: Children },
}

/// Memoized entropy, tagged with the generation it was computed at
#[derive(Debug, Clone, Copy)]
pub(crate) struct CachedEntropy {
    pub(crate) value: f64,
    pub(crate) best_option: Option<u8>,
    pub(crate) generation: u64,
}

impl Default for CachedEntropy {
    fn default() -> Self {
        Self {
            value: f64::INFINITY,
            best_option: None,
            generation: 0,
        }
    }
}

/// Canonical key of a game state
///
/// Orders by lives, then remaining letters, then knowledge. The order only
/// serves lookup; equality is what merges states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeSpec {
    pub remaining_lives: usize,
    pub knowledge: String,
    pub remaining_letters: String,
}

impl Ord for NodeSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.remaining_lives
            .cmp(&other.remaining_lives)
            .then_with(|| self.remaining_letters.cmp(&other.remaining_letters))
            .then_with(|| self.knowledge.cmp(&other.knowledge))
    }
}

impl PartialOrd for NodeSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
pub struct Node {
    knowledge: String,
    remaining_letters: String,
    remaining_lives: usize,
    pub(crate) payload: Payload,
    pub(crate) cached: Cell<CachedEntropy>,
}

impl Node {
    /// Create an unexpanded node over `words`
    #[must_use]
    pub fn leaf(
        knowledge: String,
        remaining_letters: String,
        remaining_lives: usize,
        words: Vec<WordIdx>,
    ) -> Self {
        Self {
            knowledge,
            remaining_letters,
            remaining_lives,
            payload: Payload::Leaf(words),
            cached: Cell::new(CachedEntropy::default()),
        }
    }

    /// Words under this node: the leaf list, or the total at expansion time
    #[must_use]
    pub fn count(&self) -> usize {
        match &self.payload {
            Payload::Leaf(words) => words.len(),
            Payload::Expanded { n_words, .. } => *n_words,
        }
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        !self.knowledge.contains(PLACEHOLDER)
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.remaining_lives == 0
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        matches!(self.payload, Payload::Expanded { .. })
    }

    #[must_use]
    pub fn lives(&self) -> usize {
        self.remaining_lives
    }

    #[must_use]
    pub fn knowledge(&self) -> &str {
        &self.knowledge
    }

    #[must_use]
    pub fn remaining_letters(&self) -> &str {
        &self.remaining_letters
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Child map, if expanded
    #[must_use]
    pub fn children(&self) -> Option<&Children> {
        match &self.payload {
            Payload::Leaf(_) => None,
            Payload::Expanded { children, .. } => Some(children),
        }
    }

    #[must_use]
    pub fn spec(&self) -> NodeSpec {
        NodeSpec {
            remaining_lives: self.remaining_lives,
            knowledge: self.knowledge.clone(),
            remaining_letters: self.remaining_letters.clone(),
        }
    }
}

/// Entropy of `count` equally likely candidates
#[must_use]
pub fn leaf_entropy(count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        (count as f64).log2()
    }
}
