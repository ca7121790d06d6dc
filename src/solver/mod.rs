//! Hangman optimiser
//!
//! A lazily expanded tree of game states with cross-branch state merging,
//! an expected-entropy heuristic memoized by generation, and a budgeted
//! best-first search driver.

mod cache;
mod error;
mod frontier;
mod node;
mod optimiser;
mod tree;

pub use cache::Cache;
pub use error::OptimiserError;
pub use frontier::Frontier;
pub use node::{Children, DEAD_ENTROPY, Node, NodeId, NodeSpec, Payload, WordIdx, leaf_entropy};
pub use optimiser::{Optimiser, OptimiserConfig, Recommendation, SearchBudget};
pub use tree::Tree;
