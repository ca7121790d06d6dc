//! Hangman Solver - CLI
//!
//! Recommends letters by minimizing the expected entropy left after each
//! guess, searching the tree of future game states best-first.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hangman_entropy::{
    commands::{GameSettings, analyze_opening, run_benchmark, run_simple, sample_targets, solve_word},
    core::{STANDARD_INITIAL_LIVES, STANDARD_LETTERS, Word},
    output::{print_analysis_result, print_benchmark_result, print_solve_result},
    solver::{OptimiserConfig, SearchBudget},
    wordlists::{
        WORDS,
        loader::{filter_by_length, load_from_file, words_from_slice},
    },
};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "hangman_entropy",
    about = "Hangman solver using expected-entropy best-first tree search",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'all' (default, embedded dictionary) or path to file
    #[arg(short = 'w', long, global = true, default_value = "all")]
    wordlist: String,

    /// Length of the hidden word
    #[arg(short = 'l', long, global = true, default_value_t = 5)]
    length: usize,

    /// Wrong guesses allowed before the game is lost
    #[arg(long, global = true, default_value_t = STANDARD_INITIAL_LIVES)]
    lives: usize,

    /// Letters available for guessing
    #[arg(long, global = true, default_value = STANDARD_LETTERS)]
    letters: String,

    /// Thinking time per guess in milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    think_ms: u64,

    /// Cap on node expansions per guess
    #[arg(long, global = true)]
    max_steps: Option<u64>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode (default): report the result of each suggested letter
    Play,

    /// Play against a known word and show every step
    Solve {
        /// The target word to solve
        word: String,

        /// Show word counts and entropy per guess
        #[arg(long)]
        detail: bool,
    },

    /// Rank every opening letter by expected entropy
    Analyze {
        /// Number of letters to show
        #[arg(short = 'n', long, default_value_t = 26)]
        top: usize,
    },

    /// Benchmark solver performance on random words
    Benchmark {
        /// Number of random words to test
        #[arg(short = 'n', long, default_value_t = 50)]
        count: usize,

        /// Seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Cli {
    fn settings(&self) -> GameSettings {
        GameSettings {
            word_len: self.length,
            lives: self.lives,
            letters: self.letters.clone(),
            optimiser: OptimiserConfig {
                budget: SearchBudget {
                    think_time: Duration::from_millis(self.think_ms),
                    max_steps: self.max_steps,
                    ..SearchBudget::default()
                },
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .init();
}

/// Load the word list named by the -w flag, keeping words of `length` letters
fn load_wordlist(wordlist: &str, length: usize) -> Result<Vec<Word>> {
    let words = match wordlist {
        "all" => words_from_slice(WORDS),
        path => load_from_file(path).with_context(|| format!("Failed to read wordlist {path}"))?,
    };

    let words = filter_by_length(words, length);
    if words.is_empty() {
        bail!("No {length}-letter words in wordlist '{wordlist}'");
    }
    log::info!("{} candidate words of length {length}", words.len());
    Ok(words)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = cli.settings();
    let words = load_wordlist(&cli.wordlist, settings.word_len)?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_simple(&words, &settings),
        Commands::Solve { word, detail } => {
            let result = solve_word(&word, &words, &settings)?;
            print_solve_result(&result, settings.lives, detail);
            Ok(())
        }
        Commands::Analyze { top } => {
            let result = analyze_opening(&words, &settings)?;
            print_analysis_result(&result, top);
            Ok(())
        }
        Commands::Benchmark { count, seed } => {
            let targets = sample_targets(&words, count, seed);
            println!("Running benchmark on {} random words...", targets.len());
            let result = run_benchmark(&words, &targets, &settings, true)?;
            print_benchmark_result(&result);
            Ok(())
        }
    }
}
