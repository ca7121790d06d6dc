//! Hangman outcome calculation and representation
//!
//! An outcome records where a guessed letter occurred in the hidden word: one
//! boolean per position, `true` where the letter was revealed. An all-false
//! outcome is a miss and costs a life.

use super::{PLACEHOLDER, Word};
use std::fmt;

/// Per-position occurrence pattern of one guessed letter
///
/// Ordering is only used to keep child maps deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outcome(Vec<bool>);

impl Outcome {
    /// An all-miss outcome for a word of `len` letters
    #[must_use]
    pub fn miss(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Build an outcome from explicit hit flags
    #[must_use]
    pub fn from_hits(hits: Vec<bool>) -> Self {
        Self(hits)
    }

    /// Calculate the outcome of guessing `guess` when `word` is hidden
    ///
    /// # Examples
    /// ```
    /// use hangman_entropy::core::{Outcome, Word};
    ///
    /// let word = Word::new("apple").unwrap();
    /// let outcome = Outcome::calculate(&word, b'p');
    /// assert_eq!(outcome.hits(), &[false, true, true, false, false]);
    /// ```
    #[must_use]
    pub fn calculate(word: &Word, guess: u8) -> Self {
        let mut hits = vec![false; word.len()];
        for &pos in word.positions_of(guess) {
            hits[pos] = true;
        }
        Self(hits)
    }

    /// Check whether `word` produces exactly this outcome for `guess`
    #[must_use]
    pub fn matches(&self, word: &Word, guess: u8) -> bool {
        word.len() == self.0.len()
            && word
                .chars()
                .iter()
                .zip(&self.0)
                .all(|(&ch, &hit)| (ch == guess) == hit)
    }

    /// True when the letter occurred nowhere
    #[inline]
    #[must_use]
    pub fn is_miss(&self) -> bool {
        self.count_hits() == 0
    }

    /// Raw hit flags
    #[inline]
    #[must_use]
    pub fn hits(&self) -> &[bool] {
        &self.0
    }

    /// Number of revealed positions
    #[must_use]
    pub fn count_hits(&self) -> usize {
        self.0.iter().filter(|&&hit| hit).count()
    }

    /// Fill the revealed positions of a knowledge string with `guess`
    ///
    /// Positions past the end of `knowledge` are ignored.
    #[must_use]
    pub fn apply(&self, guess: u8, knowledge: &str) -> String {
        knowledge
            .bytes()
            .zip(self.0.iter().chain(std::iter::repeat(&false)))
            .map(|(ch, &hit)| if hit { char::from(guess) } else { char::from(ch) })
            .collect()
    }

    /// Parse a reported outcome for `guess` on a word of `len` letters
    ///
    /// Accepts:
    /// - an empty line for a miss
    /// - a mask of `1`/`0` with one digit per position
    /// - the word as revealed so far, where any position holding the guessed
    ///   letter is a hit (`_pp__` or `apple` for guess `p`)
    ///
    /// # Examples
    /// ```
    /// use hangman_entropy::core::Outcome;
    ///
    /// let a = Outcome::parse("01100", b'p', 5).unwrap();
    /// let b = Outcome::parse("_pp__", b'p', 5).unwrap();
    /// let c = Outcome::parse("apple", b'p', 5).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(b, c);
    /// assert!(Outcome::parse("", b'z', 5).unwrap().is_miss());
    /// ```
    #[must_use]
    pub fn parse(input: &str, guess: u8, len: usize) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Some(Self::miss(len));
        }

        let chars: Vec<char> = input.chars().collect();
        if chars.len() != len {
            return None;
        }

        if chars.iter().all(|&c| c == '0' || c == '1') {
            return Some(Self(chars.into_iter().map(|c| c == '1').collect()));
        }

        let guess = char::from(guess.to_ascii_lowercase());
        Some(Self(
            chars
                .into_iter()
                .map(|c| c.to_ascii_lowercase() == guess)
                .collect(),
        ))
    }

    /// Render the outcome as the guessed letter at hits and placeholders elsewhere
    #[must_use]
    pub fn render(&self, guess: u8) -> String {
        self.0
            .iter()
            .map(|&hit| if hit { char::from(guess) } else { PLACEHOLDER })
            .collect()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &hit in &self.0 {
            write!(f, "{}", if hit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
