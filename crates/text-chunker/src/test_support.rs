//! Tokenizer doubles shared by unit tests.

use crate::error::{ChunkerError, Result};
use crate::tokenizer::{TokenizerAdapter, WhitespaceTokenizer};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Whitespace words plus a fixed number of special tokens per encode, so
/// counts are not additive across joins (like BOS/EOS in real models).
pub struct PaddedTokenizer {
    pub specials: usize,
}

impl TokenizerAdapter for PaddedTokenizer {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(WhitespaceTokenizer.count_tokens(text)? + self.specials)
    }

    fn decode_suffix(&self, text: &str, n: usize) -> Result<String> {
        // The trailing special token occupies one slot of the suffix.
        WhitespaceTokenizer.decode_suffix(text, n.saturating_sub(1))
    }
}

/// Fails once `budget` adapter calls have been made
pub struct FailingTokenizer {
    pub budget: usize,
    pub calls: AtomicUsize,
}

impl FailingTokenizer {
    pub fn after(budget: usize) -> Self {
        Self {
            budget,
            calls: AtomicUsize::new(0),
        }
    }

    fn tick(&self) -> Result<()> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.budget {
            return Err(ChunkerError::tokenizer("adapter unavailable"));
        }
        Ok(())
    }
}

impl TokenizerAdapter for FailingTokenizer {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        self.tick()?;
        WhitespaceTokenizer.count_tokens(text)
    }

    fn decode_suffix(&self, text: &str, n: usize) -> Result<String> {
        self.tick()?;
        WhitespaceTokenizer.decode_suffix(text, n)
    }
}

/// `count` distinct words tagged with `tag`, e.g. `p0 p1 p2`
pub fn words(tag: &str, count: usize) -> String {
    (0..count)
        .map(|i| format!("{tag}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `sentences` sentences of `words_each` words, each ending with a period
pub fn sentences(tag: &str, sentences: usize, words_each: usize) -> String {
    (0..sentences)
        .map(|s| format!("{}.", words(&format!("{tag}{s}w"), words_each)))
        .collect::<Vec<_>>()
        .join(" ")
}
