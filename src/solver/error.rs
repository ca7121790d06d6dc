//! Contract violations raised by the optimiser

use crate::core::Outcome;
use std::fmt;

/// Error type for optimiser misuse and broken tree invariants
///
/// None of these are recoverable: they indicate a caller bug or a corrupted
/// tree, and the operation that raised them must not be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimiserError {
    /// Best guess requested from a node that was never expanded
    NotExpanded,
    /// Expansion requested on a node with no lives left
    DeadExpansion,
    /// Expansion requested on a node whose word is fully revealed
    WonExpansion,
    /// Expanded node has no guesses to offer
    NoGuesses,
    /// No candidate word is consistent with the board
    NoCandidates,
    /// The guess/outcome pair never occurred during expansion
    UnknownOutcome { guess: char, outcome: Outcome },
    /// The same candidate word turned up twice while partitioning
    DuplicateWord(String),
}

impl fmt::Display for OptimiserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotExpanded => write!(f, "Best guess requested before expansion"),
            Self::DeadExpansion => write!(f, "Tried to expand a node with no lives left"),
            Self::WonExpansion => write!(f, "Tried to expand a node that is already won"),
            Self::NoGuesses => write!(f, "No guesses remain for this node"),
            Self::NoCandidates => write!(f, "No candidate words match the board"),
            Self::UnknownOutcome { guess, outcome } => write!(
                f,
                "Outcome {} for guess '{guess}' is impossible with the remaining words",
                outcome.render(*guess as u8)
            ),
            Self::DuplicateWord(word) => {
                write!(f, "Word '{word}' appeared twice while partitioning candidates")
            }
        }
    }
}

impl std::error::Error for OptimiserError {}
