//! Formatting utilities for terminal output

use crate::core::{Outcome, PLACEHOLDER};

/// Spread a board out for display: `_pp__` becomes `_ P P _ _`
#[must_use]
pub fn spaced_board(knowledge: &str) -> String {
    knowledge
        .chars()
        .map(|c| {
            if c == PLACEHOLDER {
                c.to_string()
            } else {
                c.to_ascii_uppercase().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Describe the result of a guess: hit positions (1-based) or a miss
#[must_use]
pub fn outcome_summary(outcome: &Outcome) -> String {
    if outcome.is_miss() {
        return "miss".to_string();
    }
    let positions: Vec<String> = outcome
        .hits()
        .iter()
        .enumerate()
        .filter(|&(_, &hit)| hit)
        .map(|(i, _)| (i + 1).to_string())
        .collect();
    format!("hit at {}", positions.join(", "))
}

/// Lives as filled and empty hearts
#[must_use]
pub fn lives_bar(lives: usize, initial: usize) -> String {
    let lives = lives.min(initial);
    format!("{}{}", "♥".repeat(lives), "♡".repeat(initial - lives))
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Entropy as a bar scaled against the opening entropy
#[must_use]
pub fn entropy_bar(entropy: f64, max_entropy: f64, width: usize) -> String {
    create_progress_bar(entropy, max_entropy, width)
}
