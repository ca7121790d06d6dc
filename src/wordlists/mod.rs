//! Candidate word lists
//!
//! The default dictionary is embedded at build time; `loader` reads
//! user-supplied lists and narrows them to a game's word length.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
