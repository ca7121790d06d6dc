//! Command implementations

pub mod analyze;
pub mod benchmark;
pub mod simple;
pub mod solve;

pub use analyze::{AnalysisResult, analyze_opening};
pub use benchmark::{BenchmarkResult, run_benchmark, sample_targets};
pub use simple::run_simple;
pub use solve::{GuessStep, SolveResult, solve_word};

use crate::core::{GameState, STANDARD_INITIAL_LIVES, STANDARD_LETTERS};
use crate::solver::OptimiserConfig;

/// Rules of a game plus the search budget used to play it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub word_len: usize,
    pub lives: usize,
    pub letters: String,
    pub optimiser: OptimiserConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            word_len: 5,
            lives: STANDARD_INITIAL_LIVES,
            letters: STANDARD_LETTERS.to_string(),
            optimiser: OptimiserConfig::default(),
        }
    }
}

impl GameSettings {
    /// Fresh board for these rules
    #[must_use]
    pub fn initial_state(&self) -> GameState {
        GameState::new(self.word_len, self.lives, &self.letters)
    }
}
