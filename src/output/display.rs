//! Display functions for command results

use super::formatters::{entropy_bar, lives_bar, outcome_summary, spaced_board};
use crate::commands::{AnalysisResult, BenchmarkResult, SolveResult};
use colored::Colorize;

/// Print the result of a self-played game
pub fn print_solve_result(result: &SolveResult, initial_lives: usize, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        result.target.to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.steps.iter().enumerate() {
        let summary = outcome_summary(&step.outcome);
        let summary = if step.outcome.is_miss() {
            summary.red()
        } else {
            summary.green()
        };
        println!(
            "\nTurn {}: {}  {}  {}  {}",
            i + 1,
            step.guess.to_ascii_uppercase().to_string().bold(),
            spaced_board(&step.knowledge),
            lives_bar(step.lives, initial_lives).red(),
            summary
        );

        if verbose {
            println!("  Words:      {} → {}", step.words_before, step.words_after);
            println!("  Entropy:    {:.3} bits expected", step.entropy);
            if step.words_after > 0 {
                let actual = (step.words_before as f64 / step.words_after as f64).log2();
                println!("  Info gained: {actual:.3} bits");
            }
        }
    }

    println!();
    let misses = result.misses();
    if result.won {
        println!(
            "{}",
            format!("✅ Solved in {} guesses ({misses} wrong)", result.steps.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Hanged after {} guesses ({misses} wrong)", result.steps.len())
                .red()
                .bold()
        );
    }
}

/// Print the ranking of opening letters
pub fn print_analysis_result(result: &AnalysisResult, limit: usize) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "OPENING ANALYSIS:".bright_cyan().bold(),
        format!("{}-letter words", result.word_len)
            .bright_yellow()
            .bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n📊 {} candidate words, {:.3} bits of uncertainty\n",
        result.total_words, result.root_entropy
    );
    println!("   Letter  Entropy   Gain     Hit rate");
    for score in result.scores.iter().take(limit) {
        let bar = entropy_bar(score.info_gain, result.root_entropy, 20);
        println!(
            "   {}       {:>7.3}   {:>6.3}   {:>5.1}%  [{}]",
            score.letter.to_ascii_uppercase().to_string().bright_yellow().bold(),
            score.entropy,
            score.info_gain,
            score.hit_rate * 100.0,
            bar.green()
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Words tested:     {}", result.total_words);
    println!(
        "   Win rate:         {}",
        format!("{:.1}%", result.win_rate * 100.0)
            .bright_yellow()
            .bold()
    );
    println!("   Average misses:   {:.2}", result.average_misses);
    println!("   Average guesses:  {:.2}", result.average_guesses);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Words/second:     {:.1}", result.words_per_second);

    println!("\n📈 {}", "Wrong guesses:".bright_cyan().bold());
    let mut buckets: Vec<(usize, usize)> = result
        .distribution
        .iter()
        .map(|(&misses, &count)| (misses, count))
        .collect();
    buckets.sort_unstable();
    for (misses, count) in buckets {
        let pct = (count as f64 / result.total_words as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░"
                .repeat(40_usize.saturating_sub(bar_width))
                .bright_black()
        );
        println!("   {misses:2}: {bar} {count:4} ({pct:5.1}%)");
    }

    if !result.lost_words.is_empty() {
        println!("\n❌ {}", "Lost on:".red().bold());
        println!("   {}", result.lost_words.join(", "));
    }
}
