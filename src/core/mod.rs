//! Core domain types for Hangman
//!
//! This module contains the game-level value types the optimiser consumes:
//! words, per-guess outcomes, and the plain game-state record.

mod outcome;
mod state;
mod word;

pub use outcome::Outcome;
pub use state::GameState;
pub use word::{Word, WordError};

/// Lives granted at the start of a standard game
pub const STANDARD_INITIAL_LIVES: usize = 9;

/// Letters available for guessing in a standard game
pub const STANDARD_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Marks an unrevealed position in a knowledge string
pub const PLACEHOLDER: char = '_';
