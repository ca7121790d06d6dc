//! Benchmark command
//!
//! Plays the optimiser against a random sample of words from the list.

use super::GameSettings;
use super::solve::play_against;
use crate::core::Word;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{SeedableRng, rng};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_words: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub total_misses: usize,
    pub average_misses: f64,
    pub average_guesses: f64,
    /// Games keyed by number of wrong guesses
    pub distribution: HashMap<usize, usize>,
    /// Targets the optimiser failed to uncover
    pub lost_words: Vec<String>,
    pub duration: Duration,
    pub words_per_second: f64,
}

/// Draw up to `count` distinct targets from `words`
///
/// A fixed `seed` makes the sample reproducible.
#[must_use]
pub fn sample_targets(words: &[Word], count: usize, seed: Option<u64>) -> Vec<Word> {
    let count = count.min(words.len());
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            words.choose_multiple(&mut rng, count).cloned().collect()
        }
        None => words.choose_multiple(&mut rng(), count).cloned().collect(),
    }
}

/// Play every target in `targets` against the full candidate list `words`
///
/// # Errors
///
/// Returns an error if the optimiser fails on any game.
pub fn run_benchmark(
    words: &[Word],
    targets: &[Word],
    settings: &GameSettings,
    show_progress: bool,
) -> Result<BenchmarkResult> {
    let pb = if show_progress {
        let pb = ProgressBar::new(targets.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")?
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let mut wins = 0;
    let mut total_misses = 0;
    let mut total_guesses = 0;
    let mut distribution: HashMap<usize, usize> = HashMap::new();
    let mut lost_words = Vec::new();

    for target in targets {
        let result = play_against(target, words, settings)?;
        let misses = result.misses();

        total_misses += misses;
        total_guesses += result.steps.len();
        *distribution.entry(misses).or_insert(0) += 1;
        if result.won {
            wins += 1;
        } else {
            log::info!("lost on '{}'", result.target);
            lost_words.push(result.target);
        }

        pb.set_message(format!("{} | {wins} won", target.text()));
        pb.inc(1);
    }

    pb.finish_with_message(format!("{wins}/{} won", targets.len()));

    let duration = start.elapsed();
    let total_words = targets.len();
    let per_game = |total: usize| {
        if total_words == 0 {
            0.0
        } else {
            total as f64 / total_words as f64
        }
    };

    Ok(BenchmarkResult {
        total_words,
        wins,
        win_rate: per_game(wins),
        total_misses,
        average_misses: per_game(total_misses),
        average_guesses: per_game(total_guesses),
        distribution,
        lost_words,
        duration,
        words_per_second: total_words as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}
