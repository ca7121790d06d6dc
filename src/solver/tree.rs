//! Game-state tree arena
//!
//! Nodes live in a slot table and refer to each other by [`NodeId`]. Several
//! parents may share one child once the cache has merged equal states. Nodes
//! are freed by [`Tree::collect`], which keeps only what is reachable from the
//! current root.
//!
//! Entropy is memoized per node with a generation stamp. Each top-level
//! request allocates a fresh generation, so every value read after an
//! expansion is recomputed, while nodes shared between several parents are
//! still evaluated once per request.

use super::cache::Cache;
use super::error::OptimiserError;
use super::node::{
    CachedEntropy, Children, DEAD_ENTROPY, Node, NodeId, NodeSpec, Payload, WordIdx, leaf_entropy,
};
use crate::core::{Outcome, Word};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::ops::Index;

#[derive(Debug)]
struct Slot {
    stamp: u32,
    node: Option<Node>,
}

/// Arena of game-state nodes over a shared word table
#[derive(Debug)]
pub struct Tree {
    words: Vec<Word>,
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    generation: Cell<u64>,
}

impl Tree {
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            generation: Cell::new(0),
        }
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn word(&self, idx: WordIdx) -> &Word {
        &self.words[idx as usize]
    }

    /// Number of live nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn insert(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                stamp: slot.stamp,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                stamp: 0,
                node: Some(node),
            });
            NodeId { index, stamp: 0 }
        }
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.stamp == id.stamp)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.stamp == id.stamp)
            .and_then(|slot| slot.node.as_mut())
    }

    /// True while the node behind `id` has not been collected
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Free every node not reachable from `root`
    ///
    /// Returns the number of nodes freed.
    pub fn collect(&mut self, root: NodeId) -> usize {
        let mut reachable = vec![false; self.slots.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let seen = &mut reachable[id.index as usize];
            if *seen {
                continue;
            }
            *seen = true;
            if let Some(children) = self[id].children() {
                stack.extend(children.values().flat_map(BTreeMap::values).copied());
            }
        }

        let mut freed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.is_some() && !reachable[index] {
                slot.node = None;
                slot.stamp = slot.stamp.wrapping_add(1);
                self.free.push(index as u32);
                freed += 1;
            }
        }
        self.live -= freed;
        freed
    }

    /// Allocate the next entropy generation
    pub fn next_generation(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    /// Convert a leaf into an expanded node
    ///
    /// Every remaining letter is tried as a guess; the leaf's words are
    /// partitioned by the outcome they produce, and each bucket becomes a child
    /// (or reuses the live node already registered for that state).
    ///
    /// # Errors
    /// Fails on a dead or won node, and if a word turns up twice while
    /// partitioning. Expanding an already expanded node is a no-op.
    pub fn expand(&mut self, id: NodeId, cache: &mut Cache) -> Result<(), OptimiserError> {
        let node = &self[id];
        if node.is_dead() {
            return Err(OptimiserError::DeadExpansion);
        }
        if node.is_won() {
            return Err(OptimiserError::WonExpansion);
        }
        let Payload::Leaf(words) = node.payload() else {
            return Ok(());
        };
        let words = words.clone();
        let knowledge = node.knowledge().to_string();
        let letters = node.remaining_letters().to_string();
        let lives = node.lives();

        let mut children = Children::new();
        let mut created = 0usize;
        for (guess_idx, guess) in letters.bytes().enumerate() {
            let mut next_letters = letters.clone();
            next_letters.remove(guess_idx);

            let mut outcomes = BTreeMap::new();
            for (outcome, members) in self.partition(&words, guess)? {
                let spec = NodeSpec {
                    remaining_lives: if outcome.is_miss() { lives - 1 } else { lives },
                    knowledge: outcome.apply(guess, &knowledge),
                    remaining_letters: next_letters.clone(),
                };

                let child = if let Some(existing) = cache.lookup(&spec, self) {
                    debug_assert_eq!(self[existing].count(), members.len());
                    existing
                } else {
                    let child = self.insert(Node::leaf(
                        spec.knowledge.clone(),
                        spec.remaining_letters.clone(),
                        spec.remaining_lives,
                        members,
                    ));
                    cache.register(spec, child);
                    created += 1;
                    child
                };
                outcomes.insert(outcome, child);
            }
            children.insert(guess, outcomes);
        }

        log::trace!(
            "expanded {knowledge} ({lives} lives, {} words): {created} new children",
            words.len()
        );

        if let Some(node) = self.get_mut(id) {
            node.payload = Payload::Expanded {
                n_words: words.len(),
                children,
            };
        }
        Ok(())
    }

    /// Group words by the outcome `guess` produces on them
    fn partition(
        &self,
        words: &[WordIdx],
        guess: u8,
    ) -> Result<FxHashMap<Outcome, Vec<WordIdx>>, OptimiserError> {
        let mut seen = FxHashSet::default();
        let mut buckets: FxHashMap<Outcome, Vec<WordIdx>> = FxHashMap::default();
        for &idx in words {
            if !seen.insert(idx) {
                return Err(OptimiserError::DuplicateWord(self.word(idx).text().to_string()));
            }
            buckets
                .entry(Outcome::calculate(self.word(idx), guess))
                .or_default()
                .push(idx);
        }
        Ok(buckets)
    }

    /// Child reached by observing `outcome` after guessing `guess`
    ///
    /// Expands the node first if needed.
    ///
    /// # Errors
    /// Propagates expansion errors, and fails if the pair never occurred.
    pub fn child(
        &mut self,
        id: NodeId,
        guess: u8,
        outcome: &Outcome,
        cache: &mut Cache,
    ) -> Result<NodeId, OptimiserError> {
        self.expand(id, cache)?;
        self[id]
            .children()
            .and_then(|children| children.get(&guess))
            .and_then(|outcomes| outcomes.get(outcome))
            .copied()
            .ok_or_else(|| OptimiserError::UnknownOutcome {
                guess: char::from(guess),
                outcome: outcome.clone(),
            })
    }

    /// Expected remaining entropy of a node, in bits
    ///
    /// Won nodes are 0 and dead nodes report [`DEAD_ENTROPY`]. A leaf of `n`
    /// words is `log2(n)`. An expanded node takes, over every guess, the
    /// count-weighted average of its outcome children and keeps the minimum,
    /// recording the minimizing guess.
    ///
    /// With `generation` unset a new generation is allocated. A cached value is
    /// reused when it was stamped at or after the requested generation.
    pub fn remaining_entropy(&self, id: NodeId, generation: Option<u64>) -> f64 {
        let generation = generation.unwrap_or_else(|| self.next_generation());
        let node = &self[id];
        let cached = node.cached.get();
        if cached.generation >= generation {
            return cached.value;
        }

        let (value, best_option) = if node.is_won() {
            (0.0, None)
        } else if node.is_dead() {
            (DEAD_ENTROPY, None)
        } else {
            match node.payload() {
                Payload::Leaf(words) => (leaf_entropy(words.len()), None),
                Payload::Expanded { n_words: 0, .. } => (0.0, None),
                Payload::Expanded { n_words, children } => {
                    let (best, best_option) = self.best_guess(children, generation);
                    (best / *n_words as f64, best_option)
                }
            }
        };

        node.cached.set(CachedEntropy {
            value,
            best_option,
            generation,
        });
        value
    }

    /// Minimize weighted entropy over guesses; exact ties go to more expected lives
    #[allow(clippy::float_cmp)]
    fn best_guess(&self, children: &Children, generation: u64) -> (f64, Option<u8>) {
        let mut best = f64::INFINITY;
        let mut best_lives = f64::NEG_INFINITY;
        let mut best_option = None;
        for (&guess, outcomes) in children {
            let (entropy, lives) = self.weighted(outcomes, generation);
            if entropy < best || (entropy == best && lives > best_lives) {
                best = entropy;
                best_lives = lives;
                best_option = Some(guess);
            }
        }
        (best, best_option)
    }

    /// Count-weighted sums of child entropy and child lives
    fn weighted(&self, outcomes: &BTreeMap<Outcome, NodeId>, generation: u64) -> (f64, f64) {
        outcomes
            .values()
            .fold((0.0, 0.0), |(entropy, lives), &child| {
                let count = self[child].count() as f64;
                (
                    entropy + self.remaining_entropy(child, Some(generation)) * count,
                    lives + self[child].lives() as f64 * count,
                )
            })
    }

    /// Best guess and entropy of an expanded node
    ///
    /// # Errors
    /// Fails if the node is a leaf, or if it has no guesses left.
    pub fn best(&self, id: NodeId) -> Result<(u8, f64), OptimiserError> {
        if !self[id].is_expanded() {
            return Err(OptimiserError::NotExpanded);
        }
        let entropy = self.remaining_entropy(id, None);
        self[id]
            .cached
            .get()
            .best_option
            .map(|guess| (guess, entropy))
            .ok_or(OptimiserError::NoGuesses)
    }

    /// Expected entropy after each guess of an expanded node, best first
    ///
    /// # Errors
    /// Fails if the node is a leaf.
    pub fn guess_entropies(&self, id: NodeId) -> Result<Vec<(u8, f64)>, OptimiserError> {
        let node = &self[id];
        let Payload::Expanded { n_words, children } = node.payload() else {
            return Err(OptimiserError::NotExpanded);
        };
        let generation = self.next_generation();
        let mut scores: Vec<(u8, f64)> = children
            .iter()
            .map(|(&guess, outcomes)| {
                let (entropy, _) = self.weighted(outcomes, generation);
                (guess, entropy / (*n_words).max(1) as f64)
            })
            .collect();
        scores.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        Ok(scores)
    }

    /// Words still consistent with a node
    ///
    /// Expanded nodes are enumerated through the guess with the fewest
    /// outcome buckets.
    ///
    /// # Errors
    /// Fails if an expanded node on the way has no guesses.
    pub fn remaining_words(&self, id: NodeId) -> Result<Vec<WordIdx>, OptimiserError> {
        let mut words = Vec::new();
        self.gather_words(id, &mut words)?;
        Ok(words)
    }

    fn gather_words(&self, id: NodeId, out: &mut Vec<WordIdx>) -> Result<(), OptimiserError> {
        match self[id].payload() {
            Payload::Leaf(words) => out.extend_from_slice(words),
            Payload::Expanded { children, .. } => {
                let narrowest = children
                    .values()
                    .min_by_key(|outcomes| outcomes.len())
                    .ok_or(OptimiserError::NoGuesses)?;
                for &child in narrowest.values() {
                    self.gather_words(child, out)?;
                }
            }
        }
        Ok(())
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
            .unwrap_or_else(|| panic!("stale node handle {id:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, STANDARD_LETTERS};

    fn build(words: &[&str], lives: usize, letters: &str) -> (Tree, Cache, NodeId) {
        let words: Vec<Word> = words.iter().map(|w| Word::new(*w).unwrap()).collect();
        let state = GameState::new(words[0].len(), lives, letters);
        let indices = (0..words.len() as WordIdx).collect();
        let mut tree = Tree::new(words);
        let root = tree.insert(Node::leaf(
            state.partial_word,
            state.remaining_letters,
            state.remaining_lives,
            indices,
        ));
        (tree, Cache::new(), root)
    }

    fn texts(tree: &Tree, mut words: Vec<WordIdx>) -> Vec<String> {
        words.sort_unstable();
        words.iter().map(|&w| tree.word(w).text().to_string()).collect()
    }

    #[test]
    fn expand_partitions_by_outcome() {
        let (mut tree, mut cache, root) = build(
            &["apple", "angle", "ample", "amble", "eagle"],
            6,
            STANDARD_LETTERS,
        );
        tree.expand(root, &mut cache).unwrap();

        let children = tree[root].children().unwrap();
        assert_eq!(children.len(), 26);
        for (&guess, outcomes) in children {
            let total: usize = outcomes.values().map(|&c| tree[c].count()).sum();
            assert_eq!(total, 5, "guess {}", char::from(guess));

            for (outcome, &child) in outcomes {
                let members = tree.remaining_words(child).unwrap();
                assert!(!members.is_empty());
                for &w in &members {
                    assert!(outcome.matches(tree.word(w), guess));
                }
            }
        }
    }

    #[test]
    fn expand_same_child_iff_same_outcome() {
        let (mut tree, mut cache, root) =
            build(&["apple", "angle", "ample"], 6, STANDARD_LETTERS);
        tree.expand(root, &mut cache).unwrap();

        let words = tree.words().to_vec();
        for guess in b'a'..=b'z' {
            for (i, a) in words.iter().enumerate() {
                for b in &words[i + 1..] {
                    let oa = Outcome::calculate(a, guess);
                    let ob = Outcome::calculate(b, guess);
                    let ca = tree.child(root, guess, &oa, &mut cache).unwrap();
                    let cb = tree.child(root, guess, &ob, &mut cache).unwrap();
                    assert_eq!(ca == cb, oa == ob);
                }
            }
        }
    }

    #[test]
    fn miss_costs_one_life_and_keeps_knowledge() {
        let (mut tree, mut cache, root) = build(&["apple", "angle"], 6, STANDARD_LETTERS);
        let child = tree.child(root, b'z', &Outcome::miss(5), &mut cache).unwrap();

        assert_eq!(tree[child].lives(), 5);
        assert_eq!(tree[child].knowledge(), "_____");
        assert!(!tree[child].remaining_letters().contains('z'));
        assert_eq!(tree[child].remaining_letters().len(), 25);
    }

    #[test]
    fn hit_keeps_lives_and_reveals() {
        let (mut tree, mut cache, root) = build(&["apple", "angle"], 6, STANDARD_LETTERS);
        let outcome = Outcome::calculate(&Word::new("apple").unwrap(), b'p');
        let child = tree.child(root, b'p', &outcome, &mut cache).unwrap();

        assert_eq!(tree[child].lives(), 6);
        assert_eq!(tree[child].knowledge(), "_pp__");
        assert_eq!(tree[child].count(), 1);
    }

    #[test]
    fn equal_states_share_one_node() {
        let (mut tree, mut cache, root) = build(&["abc", "abd"], 4, "abcdxy");
        let miss = Outcome::miss(3);

        let x = tree.child(root, b'x', &miss, &mut cache).unwrap();
        let xy = tree.child(x, b'y', &miss, &mut cache).unwrap();
        let y = tree.child(root, b'y', &miss, &mut cache).unwrap();
        let yx = tree.child(y, b'x', &miss, &mut cache).unwrap();

        assert_ne!(x, y);
        assert_eq!(xy, yx);
        assert_eq!(tree[xy].lives(), 2);
        assert_eq!(tree[xy].remaining_letters(), "abcd");
    }

    #[test]
    fn expand_is_one_way_and_idempotent() {
        let (mut tree, mut cache, root) = build(&["abc", "abd"], 4, "abcdxy");
        tree.expand(root, &mut cache).unwrap();
        let nodes = tree.len();
        let cached = cache.len();

        tree.expand(root, &mut cache).unwrap();
        assert!(tree[root].is_expanded());
        assert_eq!(tree.len(), nodes);
        assert_eq!(cache.len(), cached);
    }

    #[test]
    fn expanding_terminal_nodes_fails() {
        let (mut tree, mut cache, _) = build(&["ab"], 1, "abz");
        let dead = tree.insert(Node::leaf("__".into(), "ab".into(), 0, vec![0]));
        let won = tree.insert(Node::leaf("ab".into(), "z".into(), 1, vec![0]));

        assert_eq!(
            tree.expand(dead, &mut cache),
            Err(OptimiserError::DeadExpansion)
        );
        assert_eq!(tree.expand(won, &mut cache), Err(OptimiserError::WonExpansion));
        assert!(!tree[dead].is_expanded());
    }

    #[test]
    fn unknown_outcome_is_rejected() {
        let (mut tree, mut cache, root) = build(&["apple", "angle"], 6, STANDARD_LETTERS);
        let impossible = Outcome::from_hits(vec![true, true, true, true, true]);

        let err = tree.child(root, b'p', &impossible, &mut cache).unwrap_err();
        assert!(matches!(err, OptimiserError::UnknownOutcome { guess: 'p', .. }));
    }

    #[test]
    fn duplicate_word_aborts_expansion() {
        let (mut tree, mut cache, _) = build(&["abc", "abd"], 3, "abcd");
        let broken = tree.insert(Node::leaf("___".into(), "abcd".into(), 3, vec![0, 1, 0]));

        assert_eq!(
            tree.expand(broken, &mut cache),
            Err(OptimiserError::DuplicateWord("abc".to_string()))
        );
        assert!(!tree[broken].is_expanded());
    }

    #[test]
    fn leaf_entropy_and_best_before_expansion() {
        let (tree, _, root) = build(&["apple", "angle", "ample"], 6, STANDARD_LETTERS);

        assert!((tree.remaining_entropy(root, None) - 3f64.log2()).abs() < 1e-12);
        assert_eq!(tree.best(root), Err(OptimiserError::NotExpanded));
    }

    #[test]
    fn won_node_has_zero_entropy_and_dead_node_sentinel() {
        let (mut tree, _, _) = build(&["ab", "cb"], 2, "abc");
        let won = tree.insert(Node::leaf("ab".into(), "c".into(), 2, vec![0]));
        let dead = tree.insert(Node::leaf("__".into(), "c".into(), 0, vec![0, 1]));

        assert!(tree[won].is_won());
        assert_eq!(tree.remaining_entropy(won, None), 0.0);
        assert_eq!(tree.remaining_entropy(dead, None), DEAD_ENTROPY);
    }

    #[test]
    fn scenario_differentiating_guess_beats_shared_letter() {
        let (mut tree, mut cache, root) =
            build(&["apple", "angle", "ample"], 6, STANDARD_LETTERS);
        tree.expand(root, &mut cache).unwrap();

        let scores: FxHashMap<u8, f64> = tree.guess_entropies(root).unwrap().into_iter().collect();
        assert!((scores[&b'a'] - 3f64.log2()).abs() < 1e-12);
        assert_eq!(scores[&b'p'], 0.0);
        assert!((scores[&b'g'] - 2.0 / 3.0).abs() < 1e-12);

        assert_eq!(tree.best(root), Ok((b'p', 0.0)));
    }

    #[test]
    fn expanded_empty_node_has_no_best_guess() {
        let (mut tree, mut cache, _) = build(&["ab"], 2, "abc");
        let empty = tree.insert(Node::leaf("__".into(), "abc".into(), 2, Vec::new()));
        tree.expand(empty, &mut cache).unwrap();

        assert_eq!(tree.remaining_entropy(empty, None), 0.0);
        assert_eq!(tree.best(empty), Err(OptimiserError::NoGuesses));
        assert!(tree
            .guess_entropies(empty)
            .unwrap()
            .iter()
            .all(|(_, entropy)| entropy.is_finite()));
    }

    #[test]
    fn dead_child_never_chosen_over_survivor() {
        // 'a' and 'c' each kill one branch, 'z' kills both, 'b' is safe
        let (mut tree, mut cache, root) = build(&["ab", "cb"], 1, "abcz");
        tree.expand(root, &mut cache).unwrap();

        let (guess, entropy) = tree.best(root).unwrap();
        assert_eq!(guess, b'b');
        assert!((entropy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn equal_entropy_prefers_more_lives() {
        // 'b' only costs a life, 'p' reveals letters; both leave one word
        let (mut tree, mut cache, root) = build(&["apple"], 3, "bp");
        tree.expand(root, &mut cache).unwrap();

        assert_eq!(tree.best(root), Ok((b'p', 0.0)));
    }

    #[test]
    fn generation_memoizes_until_newer_request() {
        let (mut tree, mut cache, root) =
            build(&["apple", "angle", "ample"], 6, STANDARD_LETTERS);

        let stale_generation = tree.next_generation();
        let leaf_value = tree.remaining_entropy(root, Some(stale_generation));
        tree.expand(root, &mut cache).unwrap();

        // Same generation reuses the pre-expansion value
        assert_eq!(tree.remaining_entropy(root, Some(stale_generation)), leaf_value);
        // A fresh request sees the expansion
        assert_eq!(tree.remaining_entropy(root, None), 0.0);
    }

    #[test]
    fn remaining_words_through_narrowest_guess() {
        let (mut tree, mut cache, root) =
            build(&["apple", "angle", "ample"], 6, STANDARD_LETTERS);
        tree.expand(root, &mut cache).unwrap();

        assert_eq!(
            texts(&tree, tree.remaining_words(root).unwrap()),
            vec!["apple", "angle", "ample"]
        );
    }

    #[test]
    fn collect_keeps_only_reachable_nodes() {
        let (mut tree, mut cache, root) = build(&["abc", "abd"], 4, "abcdxy");
        tree.expand(root, &mut cache).unwrap();
        let miss = Outcome::miss(3);
        let x = tree.child(root, b'x', &miss, &mut cache).unwrap();
        tree.expand(x, &mut cache).unwrap();
        let sibling = tree.child(root, b'y', &miss, &mut cache).unwrap();

        let freed = tree.collect(x);

        assert!(freed > 0);
        assert!(tree.contains(x));
        assert!(!tree.contains(root));
        assert!(!tree.contains(sibling));
        for outcomes in tree[x].children().unwrap().values() {
            for &child in outcomes.values() {
                assert!(tree.contains(child));
            }
        }
    }
}
