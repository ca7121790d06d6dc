//! Interactive CLI mode
//!
//! The player thinks of a word (or plays against someone else) and reports
//! the result of every recommended letter.

use super::GameSettings;
use crate::core::{GameState, Outcome, Word};
use crate::solver::{Optimiser, OptimiserError};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Show the remaining words once there are at most this many
const SHOW_WORDS_BELOW: usize = 10;

/// Run the interactive mode on stdin and stdout
///
/// # Errors
///
/// Returns an error if there's an I/O error, or if no words of the configured
/// length are available.
pub fn run_simple(words: &[Word], settings: &GameSettings) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_session(&mut input, &mut output, words, settings)
}

enum Turn {
    Continue,
    NewGame,
    Quit,
}

fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    words: &[Word],
    settings: &GameSettings,
) -> Result<()> {
    writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║                 Hangman Solver - Interactive                 ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(out, "Think of a {}-letter word. After each guess, enter the result:", settings.word_len)?;
    writeln!(out, "  - the word with only the guessed letter shown (e.g. _pp__)")?;
    writeln!(out, "  - or a 1/0 mask of the hit positions (e.g. 01100)")?;
    writeln!(out, "  - or an empty line if the letter is not in the word\n")?;
    writeln!(out, "Commands: 'quit' to exit, 'new' for a new game\n")?;

    loop {
        let state = settings.initial_state();
        let mut optimiser = Optimiser::with_config(&state, words.to_vec(), settings.optimiser);
        if optimiser.root_count() == 0 {
            bail!("No {}-letter words in the word list", settings.word_len);
        }

        match play_game(input, out, state, &mut optimiser)? {
            Turn::Quit => break,
            Turn::NewGame => {
                writeln!(out, "\n🔄 New game started!\n")?;
                continue;
            }
            Turn::Continue => {}
        }

        let again = prompt(input, out, "Play again? (yes/no)")?;
        if !matches!(again.as_deref(), Some("yes" | "y")) {
            break;
        }
        writeln!(out, "\n🔄 New game started!\n")?;
    }

    writeln!(out, "\n👋 Thanks for playing!\n")?;
    Ok(())
}

fn play_game<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    mut state: GameState,
    optimiser: &mut Optimiser,
) -> Result<Turn> {
    let mut turn = 1;
    loop {
        if state.has_won() {
            writeln!(out, "\n{}", "═".repeat(60).bright_cyan())?;
            writeln!(out, "  {}  {}", "WIN".bright_green().bold(), state.partial_word.to_uppercase())?;
            writeln!(out, "  Solved with {} lives to spare", state.remaining_lives)?;
            writeln!(out, "{}\n", "═".repeat(60).bright_cyan())?;
            return Ok(Turn::Continue);
        }
        if state.has_lost() || state.remaining_letters.is_empty() {
            writeln!(out, "\n{}", "═".repeat(60).red())?;
            writeln!(out, "  {}  {}", "LOSE".red().bold(), state.partial_word)?;
            writeln!(out, "{}\n", "═".repeat(60).red())?;
            return Ok(Turn::Continue);
        }

        let count = optimiser.root_count();
        writeln!(out, "{}", "─".repeat(60))?;
        writeln!(
            out,
            "Turn {turn}: {}   lives {}   {count} words",
            state.partial_word.bright_white().bold(),
            state.remaining_lives
        )?;
        writeln!(out, "{}", "─".repeat(60))?;

        if count == 0 {
            writeln!(out, "\n❌ No words match these results. One of them may be wrong.")?;
            return Ok(Turn::Continue);
        }

        let recommendation = optimiser.optimise().context("Optimiser failed")?;
        writeln!(
            out,
            "\n📊 Suggested guess: {}",
            recommendation.letter.to_ascii_uppercase().to_string().bright_yellow().bold()
        )?;
        writeln!(out, "   Expected entropy: {:.3} bits", recommendation.entropy)?;
        writeln!(out, "   Cached states:    {}", optimiser.cache_size())?;

        if count <= SHOW_WORDS_BELOW {
            let remaining = optimiser.remaining_words()?;
            let list: Vec<&str> = remaining.iter().map(|w| w.text()).collect();
            writeln!(out, "   Remaining:        {}", list.join(", "))?;
        }
        writeln!(out)?;

        let guess = recommendation.letter as u8;
        let outcome = loop {
            let Some(line) = prompt(input, out, "Result")? else {
                return Ok(Turn::Quit);
            };
            match line.to_lowercase().as_str() {
                "quit" | "q" | "exit" => return Ok(Turn::Quit),
                "new" | "n" => return Ok(Turn::NewGame),
                _ => {}
            }

            let Some(outcome) = Outcome::parse(&line, guess, state.word_len()) else {
                writeln!(out, "❌ Expected {} characters, a 1/0 mask, or an empty line\n", state.word_len())?;
                continue;
            };
            match optimiser.update(recommendation.letter, &outcome) {
                Ok(()) => break outcome,
                Err(e @ OptimiserError::UnknownOutcome { .. }) => {
                    writeln!(out, "❌ {e}\n")?;
                }
                Err(e) => return Err(e.into()),
            }
        };

        state = state.step(guess, &outcome);
        turn += 1;
    }
}

/// Read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
