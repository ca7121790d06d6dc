//! Opening analysis command
//!
//! Scores every letter that could be guessed first against the word list.

use super::GameSettings;
use crate::core::Word;
use crate::solver::Optimiser;
use anyhow::{Result, bail};

/// Score of one candidate opening guess
#[derive(Debug, Clone, PartialEq)]
pub struct LetterScore {
    pub letter: char,
    /// Expected entropy left after guessing the letter
    pub entropy: f64,
    /// Bits of uncertainty removed on average
    pub info_gain: f64,
    /// Share of candidate words containing the letter
    pub hit_rate: f64,
}

/// Result of analyzing the opening position
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub word_len: usize,
    pub total_words: usize,
    /// Entropy of the board before any guess
    pub root_entropy: f64,
    /// Best letter first
    pub scores: Vec<LetterScore>,
}

/// Analyze every first guess for the given rules
///
/// # Errors
///
/// Returns an error if no words of the configured length are available, or
/// the optimiser cannot expand the opening position.
pub fn analyze_opening(words: &[Word], settings: &GameSettings) -> Result<AnalysisResult> {
    let state = settings.initial_state();
    let mut optimiser = Optimiser::with_config(&state, words.to_vec(), settings.optimiser);
    let total_words = optimiser.root_count();
    if total_words == 0 {
        bail!("No {}-letter words in the word list", settings.word_len);
    }

    let root_entropy = (total_words as f64).log2();
    let candidates = optimiser.remaining_words()?;
    let hit_rates: Vec<(char, f64)> = state
        .remaining_letters
        .chars()
        .map(|letter| {
            let hits = candidates
                .iter()
                .filter(|w| w.has_letter(letter as u8))
                .count();
            (letter, hits as f64 / total_words as f64)
        })
        .collect();

    let scores = optimiser
        .guess_scores()?
        .into_iter()
        .map(|(letter, entropy)| LetterScore {
            letter,
            entropy,
            info_gain: root_entropy - entropy,
            hit_rate: hit_rates
                .iter()
                .find(|(l, _)| *l == letter)
                .map_or(0.0, |(_, rate)| *rate),
        })
        .collect();

    Ok(AnalysisResult {
        word_len: settings.word_len,
        total_words,
        root_entropy,
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;

    fn settings(word_len: usize) -> GameSettings {
        GameSettings {
            word_len,
            ..GameSettings::default()
        }
    }

    #[test]
    fn analyze_scores_every_letter() {
        let words = words_from_slice(&["apple", "ample", "angle", "fable"]);
        let result = analyze_opening(&words, &settings(5)).unwrap();

        assert_eq!(result.total_words, 4);
        assert!((result.root_entropy - 2.0).abs() < 1e-12);
        assert_eq!(result.scores.len(), 26);

        for pair in result.scores.windows(2) {
            assert!(pair[0].entropy <= pair[1].entropy);
        }
    }

    #[test]
    fn analyze_info_gain_and_hit_rate() {
        let words = words_from_slice(&["apple", "ample", "angle"]);
        let result = analyze_opening(&words, &settings(5)).unwrap();

        let p = result.scores.iter().find(|s| s.letter == 'p').unwrap();
        assert!(p.entropy.abs() < 1e-12);
        assert!((p.info_gain - 3f64.log2()).abs() < 1e-12);
        assert!((p.hit_rate - 2.0 / 3.0).abs() < 1e-12);

        let a = result.scores.iter().find(|s| s.letter == 'a').unwrap();
        assert!(a.info_gain.abs() < 1e-12);
        assert!((a.hit_rate - 1.0).abs() < 1e-12);

        let z = result.scores.iter().find(|s| s.letter == 'z').unwrap();
        assert!(z.hit_rate.abs() < 1e-12);
    }

    #[test]
    fn analyze_ignores_other_lengths() {
        let words = words_from_slice(&["cat", "dog", "apple"]);
        let result = analyze_opening(&words, &settings(3)).unwrap();
        assert_eq!(result.total_words, 2);
    }

    #[test]
    fn analyze_without_words_fails() {
        let words = words_from_slice(&["cat", "dog"]);
        assert!(analyze_opening(&words, &settings(7)).is_err());
    }
}
