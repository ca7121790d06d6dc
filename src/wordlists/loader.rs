//! Word list loading utilities
//!
//! Reads dictionaries from disk or from the embedded list and narrows them to
//! the word length of a game.

use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file, one per line
///
/// Blank lines and lines starting with `#` are ignored. Entries that are not
/// plain ASCII letters are skipped with a warning.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use hangman_entropy::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/words.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let mut skipped = 0usize;
    let words: Vec<Word> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match Word::new(line) {
            Ok(word) => Some(word),
            Err(e) => {
                log::debug!("skipping '{line}': {e}");
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        log::warn!("skipped {skipped} invalid entries in {}", path.display());
    }
    log::info!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Convert an embedded string slice to words
///
/// # Examples
/// ```
/// use hangman_entropy::wordlists::loader::words_from_slice;
/// use hangman_entropy::wordlists::WORDS;
///
/// let words = words_from_slice(WORDS);
/// assert_eq!(words.len(), WORDS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}

/// Keep only words of exactly `len` letters
#[must_use]
pub fn filter_by_length(words: Vec<Word>, len: usize) -> Vec<Word> {
    words.into_iter().filter(|w| w.len() == len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn words_from_slice_converts_valid_words() {
        let words = words_from_slice(&["apple", "Fable", "ox"]);

        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text(), "apple");
        assert_eq!(words[1].text(), "fable");
        assert_eq!(words[2].text(), "ox");
    }

    #[test]
    fn words_from_slice_skips_invalid() {
        let words = words_from_slice(&["apple", "can't", "", "r2d2", "table"]);

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "apple");
        assert_eq!(words[1].text(), "table");
    }

    #[test]
    fn filter_by_length_keeps_exact_matches() {
        let words = words_from_slice(&["cat", "apple", "fable", "banana"]);
        let five = filter_by_length(words, 5);

        let texts: Vec<&str> = five.iter().map(Word::text).collect();
        assert_eq!(texts, vec!["apple", "fable"]);
    }

    #[test]
    fn load_from_file_reads_lines() {
        let path = std::env::temp_dir().join(format!(
            "hangman_entropy_loader_{}.txt",
            std::process::id()
        ));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "# comment").unwrap();
            writeln!(file, "Apple").unwrap();
            writeln!(file).unwrap();
            writeln!(file, "  table  ").unwrap();
            writeln!(file, "no-way").unwrap();
        }

        let words = load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let texts: Vec<&str> = words.iter().map(Word::text).collect();
        assert_eq!(texts, vec!["apple", "table"]);
    }

    #[test]
    fn load_from_missing_file_errors() {
        assert!(load_from_file("/definitely/not/here.txt").is_err());
    }

    #[test]
    fn load_from_embedded_words() {
        use crate::wordlists::WORDS;

        let words = words_from_slice(WORDS);
        assert_eq!(words.len(), WORDS.len());
    }
}
