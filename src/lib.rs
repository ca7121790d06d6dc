//! Hangman Solver
//!
//! Picks the letter that minimizes the expected entropy left after the guess,
//! looking ahead through a merged tree of future game states.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hangman_entropy::core::{GameState, Outcome, Word};
//! use hangman_entropy::solver::Optimiser;
//!
//! let words: Vec<Word> = ["apple", "ample", "angle"]
//!     .iter()
//!     .map(|w| Word::new(*w).unwrap())
//!     .collect();
//!
//! let mut optimiser = Optimiser::new(&GameState::standard(5), words);
//! let guess = optimiser.optimise().unwrap();
//! println!("Guess '{}' ({:.3} bits left)", guess.letter, guess.entropy);
//!
//! let outcome = Outcome::parse("_pp__", guess.letter as u8, 5).unwrap();
//! optimiser.update(guess.letter, &outcome).unwrap();
//! ```

// Core domain types
pub mod core;

// Search tree and optimiser
pub mod solver;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
