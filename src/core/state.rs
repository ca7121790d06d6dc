//! Plain Hangman game state
//!
//! Tracks what the player knows: the partially revealed word, the lives left,
//! and the letters not yet guessed.

use super::{Outcome, PLACEHOLDER, STANDARD_INITIAL_LIVES, STANDARD_LETTERS, Word};

/// Game state as seen by the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub partial_word: String,
    pub remaining_lives: usize,
    pub remaining_letters: String,
}

impl GameState {
    /// Start a game for a hidden word of `word_len` letters
    ///
    /// The letter set is lowercased, sorted and deduplicated so that equal
    /// sets always produce equal states.
    #[must_use]
    pub fn new(word_len: usize, initial_lives: usize, letters: &str) -> Self {
        let mut remaining: Vec<u8> = letters
            .bytes()
            .filter(u8::is_ascii_alphabetic)
            .map(|b| b.to_ascii_lowercase())
            .collect();
        remaining.sort_unstable();
        remaining.dedup();

        Self {
            partial_word: PLACEHOLDER.to_string().repeat(word_len),
            remaining_lives: initial_lives,
            remaining_letters: remaining.into_iter().map(char::from).collect(),
        }
    }

    /// Standard game: nine lives, full alphabet
    #[must_use]
    pub fn standard(word_len: usize) -> Self {
        Self::new(word_len, STANDARD_INITIAL_LIVES, STANDARD_LETTERS)
    }

    /// Length of the hidden word
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.partial_word.len()
    }

    /// Apply an observed outcome for `guess`
    ///
    /// A miss costs one life and leaves the partial word unchanged; otherwise
    /// the revealed positions are filled in.
    #[must_use]
    pub fn step(&self, guess: u8, outcome: &Outcome) -> Self {
        let remaining_letters = self
            .remaining_letters
            .chars()
            .filter(|&c| c != char::from(guess))
            .collect();

        if outcome.is_miss() {
            Self {
                partial_word: self.partial_word.clone(),
                remaining_lives: self.remaining_lives.saturating_sub(1),
                remaining_letters,
            }
        } else {
            Self {
                partial_word: outcome.apply(guess, &self.partial_word),
                remaining_lives: self.remaining_lives,
                remaining_letters,
            }
        }
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        !self.partial_word.contains(PLACEHOLDER)
    }

    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.remaining_lives == 0
    }

    /// Check that `word` agrees with every revealed position
    #[must_use]
    pub fn consistent(&self, word: &Word) -> bool {
        word.len() == self.partial_word.len()
            && self
                .partial_word
                .bytes()
                .zip(word.chars())
                .all(|(known, &ch)| known == PLACEHOLDER as u8 || known == ch)
    }
}
