//! Self-play against a known word
//!
//! The optimiser recommends letters and the true outcome is computed from the
//! target, so a whole game can be replayed without a human in the loop.

use super::GameSettings;
use crate::core::{Outcome, Word};
use crate::solver::Optimiser;
use anyhow::{Context, Result, bail};

/// Result of playing one game to the end
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub target: String,
    pub won: bool,
    pub steps: Vec<GuessStep>,
}

impl SolveResult {
    /// Number of guesses that cost a life
    #[must_use]
    pub fn misses(&self) -> usize {
        self.steps.iter().filter(|step| step.outcome.is_miss()).count()
    }
}

/// A single guess in the game
#[derive(Debug, Clone)]
pub struct GuessStep {
    pub guess: char,
    pub outcome: Outcome,
    /// Board after the guess
    pub knowledge: String,
    /// Lives left after the guess
    pub lives: usize,
    /// Expected entropy the optimiser predicted for the guess
    pub entropy: f64,
    pub words_before: usize,
    pub words_after: usize,
}

/// Play a full game against `target`
///
/// # Errors
///
/// Returns an error if:
/// - The target is not a valid word or has the wrong length
/// - The target is not in `words`
/// - The optimiser fails mid-game
pub fn solve_word(target: &str, words: &[Word], settings: &GameSettings) -> Result<SolveResult> {
    let target = Word::new(target).with_context(|| format!("Invalid target word '{target}'"))?;
    if target.len() != settings.word_len {
        bail!(
            "Target '{target}' has {} letters, expected {}",
            target.len(),
            settings.word_len
        );
    }
    if !words.iter().any(|w| w.text() == target.text()) {
        bail!("Target '{target}' is not in the word list");
    }

    play_against(&target, words, settings)
}

/// Self-play without the membership checks, for callers that sample targets
/// straight from `words`
pub(crate) fn play_against(
    target: &Word,
    words: &[Word],
    settings: &GameSettings,
) -> Result<SolveResult> {
    let mut state = settings.initial_state();
    let mut optimiser = Optimiser::with_config(&state, words.to_vec(), settings.optimiser);
    let mut steps = Vec::new();

    while !state.has_won() && !state.has_lost() && !state.remaining_letters.is_empty() {
        let words_before = optimiser.root_count();
        let recommendation = optimiser
            .optimise()
            .with_context(|| format!("Optimiser failed on board {}", state.partial_word))?;
        let guess = recommendation.letter as u8;
        let outcome = Outcome::calculate(target, guess);

        state = state.step(guess, &outcome);
        optimiser
            .update(recommendation.letter, &outcome)
            .with_context(|| format!("Optimiser rejected outcome for '{}'", recommendation.letter))?;

        log::debug!(
            "{}: guessed '{}' -> {} ({} lives)",
            target,
            recommendation.letter,
            state.partial_word,
            state.remaining_lives
        );

        steps.push(GuessStep {
            guess: recommendation.letter,
            outcome,
            knowledge: state.partial_word.clone(),
            lives: state.remaining_lives,
            entropy: recommendation.entropy,
            words_before,
            words_after: optimiser.root_count(),
        });
    }

    Ok(SolveResult {
        target: target.text().to_string(),
        won: state.has_won(),
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{OptimiserConfig, SearchBudget};
    use crate::wordlists::loader::words_from_slice;

    const LIST: &[&str] = &[
        "amble", "ample", "angle", "apple", "cable", "eagle", "fable", "table",
    ];

    fn settings() -> GameSettings {
        GameSettings {
            optimiser: OptimiserConfig {
                budget: SearchBudget::steps(200),
            },
            ..GameSettings::default()
        }
    }

    #[test]
    fn solve_word_wins_small_list() {
        let words = words_from_slice(LIST);
        let result = solve_word("fable", &words, &settings()).unwrap();

        assert!(result.won);
        assert_eq!(result.target, "fable");
        assert_eq!(result.steps.last().unwrap().knowledge, "fable");
        assert!(result.misses() < 9);
    }

    #[test]
    fn solve_records_history() {
        let words = words_from_slice(LIST);
        let result = solve_word("apple", &words, &settings()).unwrap();

        let first = &result.steps[0];
        assert_eq!(first.words_before, LIST.len());
        assert!(first.words_after <= first.words_before);

        for pair in result.steps.windows(2) {
            assert_eq!(pair[0].words_after, pair[1].words_before);
            assert!(pair[1].lives <= pair[0].lives);
        }
        assert_eq!(result.steps.last().unwrap().words_after, 1);

        let guesses: Vec<char> = result.steps.iter().map(|s| s.guess).collect();
        let mut unique = guesses.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), guesses.len(), "repeated guess in {guesses:?}");
    }

    #[test]
    fn every_target_is_won_with_ample_lives() {
        let words = words_from_slice(LIST);
        for &target in LIST {
            let result = solve_word(target, &words, &settings()).unwrap();
            assert!(result.won, "lost on {target}");
        }
    }

    #[test]
    fn solve_rejects_unknown_target() {
        let words = words_from_slice(LIST);
        assert!(solve_word("zzzzz", &words, &settings()).is_err());
    }

    #[test]
    fn solve_rejects_wrong_length() {
        let words = words_from_slice(LIST);
        assert!(solve_word("cat", &words, &settings()).is_err());
        assert!(solve_word("", &words, &settings()).is_err());
    }

    #[test]
    fn losing_game_stops_at_zero_lives() {
        let words = words_from_slice(&["ab", "cd"]);
        let settings = GameSettings {
            word_len: 2,
            lives: 1,
            letters: "abcd".to_string(),
            ..settings()
        };

        // With one life the first miss ends the game
        let results: Vec<SolveResult> = ["ab", "cd"]
            .iter()
            .map(|t| solve_word(t, &words, &settings).unwrap())
            .collect();
        assert!(results.iter().any(|r| r.won));
        for result in &results {
            if !result.won {
                assert_eq!(result.steps.last().unwrap().lives, 0);
            }
        }
    }
}
