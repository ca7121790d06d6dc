//! Turn-level optimiser
//!
//! Owns the game-state tree, the state-merging cache and the current root.
//! [`Optimiser::optimise`] runs a budgeted best-first search and recommends a
//! letter; [`Optimiser::update`] moves the root to the observed outcome and
//! drops everything that can no longer be reached.

use super::cache::Cache;
use super::error::OptimiserError;
use super::frontier::Frontier;
use super::node::{Node, NodeId, WordIdx};
use super::tree::Tree;
use crate::core::{GameState, Outcome, Word};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Limits on one call to [`Optimiser::optimise`]
///
/// Search stops when the frontier empties, when `max_steps` expansions have
/// been made, or when `think_time` has elapsed. The clock is only read every
/// `poll_interval` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub think_time: Duration,
    pub max_steps: Option<u64>,
    pub poll_interval: u64,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            think_time: Duration::from_secs(5),
            max_steps: None,
            poll_interval: 1000,
        }
    }
}

impl SearchBudget {
    /// Budget bounded only by a number of expansions
    #[must_use]
    pub fn steps(max_steps: u64) -> Self {
        Self {
            think_time: Duration::MAX,
            max_steps: Some(max_steps),
            ..Self::default()
        }
    }

    fn spent(&self, steps: u64, start: Instant) -> bool {
        if self.max_steps.is_some_and(|max| steps >= max) {
            return true;
        }
        steps % self.poll_interval.max(1) == 0 && start.elapsed() >= self.think_time
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimiserConfig {
    pub budget: SearchBudget,
}

/// Letter to guess next, with the expected entropy left after guessing it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub letter: char,
    pub entropy: f64,
}

pub struct Optimiser {
    tree: Tree,
    cache: Cache,
    root: NodeId,
    config: OptimiserConfig,
}

impl Optimiser {
    /// Create an optimiser with the default search budget
    #[must_use]
    pub fn new(state: &GameState, words: Vec<Word>) -> Self {
        Self::with_config(state, words, OptimiserConfig::default())
    }

    /// Create an optimiser rooted at `state` over `words`
    ///
    /// Words of the wrong length, words contradicting the revealed letters,
    /// and duplicates are dropped.
    #[must_use]
    pub fn with_config(state: &GameState, mut words: Vec<Word>, config: OptimiserConfig) -> Self {
        let before = words.len();
        words.retain(|word| state.consistent(word));
        words.sort_by(|a, b| a.text().cmp(b.text()));
        words.dedup();
        if words.len() != before {
            log::warn!(
                "dropped {} duplicate or non-matching words for board {}",
                before - words.len(),
                state.partial_word
            );
        }

        let indices = (0..words.len() as WordIdx).collect();
        let mut tree = Tree::new(words);
        let root = tree.insert(Node::leaf(
            state.partial_word.clone(),
            state.remaining_letters.clone(),
            state.remaining_lives,
            indices,
        ));

        Self {
            tree,
            cache: Cache::new(),
            root,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &OptimiserConfig {
        &self.config
    }

    /// Recommend the next guess
    ///
    /// Expands the most promising unexpanded states until the budget is spent,
    /// then reads the best guess off the root. The root itself is always
    /// expanded, so even an exhausted budget yields a recommendation.
    ///
    /// # Errors
    /// Fails if no candidate words remain, if the root is already won or dead,
    /// or if expansion breaks an invariant.
    #[allow(clippy::float_cmp)]
    pub fn optimise(&mut self) -> Result<Recommendation, OptimiserError> {
        if self.tree[self.root].count() == 0 {
            return Err(OptimiserError::NoCandidates);
        }
        if self.tree.remaining_entropy(self.root, None) == 0.0 {
            self.tree.expand(self.root, &mut self.cache)?;
            return self.recommendation();
        }

        let start = Instant::now();
        let mut steps = 0u64;
        if !self.tree[self.root].is_expanded() {
            self.tree.expand(self.root, &mut self.cache)?;
            steps += 1;
        }

        let mut frontier = Frontier::new();
        self.seed(&mut frontier);

        let mut stale = 0u64;
        while !frontier.is_empty() && !self.config.budget.spent(steps, start) {
            let Some((id, _)) = frontier.pop() else {
                break;
            };
            let node = &self.tree[id];
            if node.is_expanded() || node.is_won() {
                stale += 1;
                continue;
            }

            self.tree.expand(id, &mut self.cache)?;
            steps += 1;
            self.push_children(id, &mut frontier);
        }

        log::debug!(
            "search: {steps} expansions, {stale} stale pops, {} queued, {} nodes, {} cached in {:.2?}",
            frontier.len(),
            self.tree.len(),
            self.cache.len(),
            start.elapsed()
        );

        self.recommendation()
    }

    /// Queue every open leaf reachable from the root
    ///
    /// After a re-root the frontier picks up where the previous search
    /// stopped.
    fn seed(&self, frontier: &mut Frontier) {
        let mut visited = FxHashSet::default();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            match self.tree[id].children() {
                None => {
                    frontier.push(id, self.tree.remaining_entropy(id, None));
                }
                Some(children) => stack.extend(
                    children
                        .values()
                        .flat_map(BTreeMap::values)
                        .copied()
                        .filter(|&child| self.is_open(child)),
                ),
            }
        }
    }

    fn push_children(&self, id: NodeId, frontier: &mut Frontier) {
        let Some(children) = self.tree[id].children() else {
            return;
        };
        for &child in children.values().flat_map(BTreeMap::values) {
            if self.is_open(child) && !self.tree[child].is_expanded() {
                frontier.push(child, self.tree.remaining_entropy(child, None));
            }
        }
    }

    fn is_open(&self, id: NodeId) -> bool {
        let node = &self.tree[id];
        node.lives() > 0 && node.count() > 0 && !node.is_won()
    }

    fn recommendation(&self) -> Result<Recommendation, OptimiserError> {
        let (guess, entropy) = self.tree.best(self.root)?;
        Ok(Recommendation {
            letter: char::from(guess),
            entropy,
        })
    }

    /// Move the root to the state reached by `guess` and `outcome`
    ///
    /// Nodes no longer reachable from the new root are freed and their cache
    /// entries swept.
    ///
    /// # Errors
    /// Fails if the outcome is impossible for the remaining words, or if the
    /// root is terminal.
    pub fn update(&mut self, guess: char, outcome: &Outcome) -> Result<(), OptimiserError> {
        let Ok(byte) = u8::try_from(guess.to_ascii_lowercase()) else {
            return Err(OptimiserError::UnknownOutcome {
                guess,
                outcome: outcome.clone(),
            });
        };

        self.root = self.tree.child(self.root, byte, outcome, &mut self.cache)?;
        let freed = self.tree.collect(self.root);
        let evicted = self.cache.clean(&self.tree);

        let root = &self.tree[self.root];
        log::info!(
            "re-rooted at {} ({} lives, {} words): freed {freed} nodes, evicted {evicted} cache entries",
            root.knowledge(),
            root.lives(),
            root.count()
        );
        Ok(())
    }

    /// Number of states in the merging cache
    #[must_use]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Number of live nodes in the tree
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Words under the current root
    #[must_use]
    pub fn root_count(&self) -> usize {
        self.tree[self.root].count()
    }

    #[must_use]
    pub fn root(&self) -> &Node {
        &self.tree[self.root]
    }

    /// Words still consistent with everything observed so far
    ///
    /// # Errors
    /// Fails if an expanded node on the way has no guesses.
    pub fn remaining_words(&self) -> Result<Vec<&Word>, OptimiserError> {
        let mut words: Vec<&Word> = self
            .tree
            .remaining_words(self.root)?
            .into_iter()
            .map(|idx| self.tree.word(idx))
            .collect();
        words.sort_by(|a, b| a.text().cmp(b.text()));
        Ok(words)
    }

    /// Expected entropy after each possible guess at the root, best first
    ///
    /// Expands the root if needed.
    ///
    /// # Errors
    /// Fails if the root is terminal or has no candidate words.
    pub fn guess_scores(&mut self) -> Result<Vec<(char, f64)>, OptimiserError> {
        if self.tree[self.root].count() == 0 {
            return Err(OptimiserError::NoCandidates);
        }
        self.tree.expand(self.root, &mut self.cache)?;
        Ok(self
            .tree
            .guess_entropies(self.root)?
            .into_iter()
            .map(|(guess, entropy)| (char::from(guess), entropy))
            .collect())
    }
}
