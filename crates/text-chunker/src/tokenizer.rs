use crate::error::Result;
use std::sync::Arc;

/// Token counting and suffix decoding used by the chunker.
///
/// Implementations must be deterministic and must never truncate: the count
/// of a long text is the count of the whole text.
pub trait TokenizerAdapter: Send + Sync {
    /// Exact number of tokens for `text`
    fn count_tokens(&self, text: &str) -> Result<usize>;

    /// Tokenize `text`, keep the last `n` tokens (all of them when there are
    /// fewer) and decode them back to text without special tokens.
    fn decode_suffix(&self, text: &str, n: usize) -> Result<String>;
}

impl<T: TokenizerAdapter + ?Sized> TokenizerAdapter for &T {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        (**self).count_tokens(text)
    }

    fn decode_suffix(&self, text: &str, n: usize) -> Result<String> {
        (**self).decode_suffix(text, n)
    }
}

impl<T: TokenizerAdapter + ?Sized> TokenizerAdapter for Arc<T> {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        (**self).count_tokens(text)
    }

    fn decode_suffix(&self, text: &str, n: usize) -> Result<String> {
        (**self).decode_suffix(text, n)
    }
}

impl<T: TokenizerAdapter + ?Sized> TokenizerAdapter for Box<T> {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        (**self).count_tokens(text)
    }

    fn decode_suffix(&self, text: &str, n: usize) -> Result<String> {
        (**self).decode_suffix(text, n)
    }
}

/// Whitespace-delimited words as tokens.
///
/// Additive across `"\n\n"` and `" "` joins, which makes budgets easy to
/// reason about in tests. Also the CLI fallback when no tokenizer file is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl TokenizerAdapter for WhitespaceTokenizer {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(text.split_whitespace().count())
    }

    fn decode_suffix(&self, text: &str, n: usize) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let start = words.len().saturating_sub(n);
        Ok(words[start..].join(" "))
    }
}
