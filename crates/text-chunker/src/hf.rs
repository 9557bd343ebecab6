use crate::error::{ChunkerError, Result};
use crate::tokenizer::TokenizerAdapter;
use std::path::Path;
use tokenizers::Tokenizer;

/// [`TokenizerAdapter`] over a HuggingFace `tokenizer.json`.
///
/// Truncation and padding are switched off so counts cover the whole text.
/// Special tokens are added on encode (matching what the embedding model
/// sees) and stripped on decode.
pub struct HfTokenizer {
    tokenizer: Tokenizer,
    add_special_tokens: bool,
}

impl HfTokenizer {
    /// Load a tokenizer from a local `tokenizer.json`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChunkerError::tokenizer(format!(
                "tokenizer file not found: {}",
                path.display()
            )));
        }

        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            ChunkerError::tokenizer(format!("Tokenizer load failed ({}): {e}", path.display()))
        })?;
        let adapter = Self::from_tokenizer(tokenizer)?;

        log::info!("Loaded tokenizer from {}", path.display());
        Ok(adapter)
    }

    /// Wrap an already constructed tokenizer
    pub fn from_tokenizer(mut tokenizer: Tokenizer) -> Result<Self> {
        // Single-threaded tokenization keeps counts cheap for the many short
        // calls the chunker makes, unless the caller opted in explicitly.
        if !tokenizers::utils::parallelism::is_parallelism_configured() {
            tokenizers::utils::parallelism::set_parallelism(false);
        }

        tokenizer
            .with_truncation(None)
            .map_err(|e| ChunkerError::tokenizer(format!("Disabling truncation failed: {e}")))?;
        tokenizer.with_padding(None);

        Ok(Self {
            tokenizer,
            add_special_tokens: true,
        })
    }

    /// Builder: whether encode adds the model's special tokens
    #[must_use]
    pub fn with_special_tokens(mut self, add_special_tokens: bool) -> Self {
        self.add_special_tokens = add_special_tokens;
        self
    }

    fn encode_ids(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, self.add_special_tokens)
            .map_err(|e| ChunkerError::tokenizer(format!("Tokenization failed: {e}")))?;
        Ok(encoding.get_ids().to_vec())
    }
}

impl TokenizerAdapter for HfTokenizer {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(self.encode_ids(text)?.len())
    }

    fn decode_suffix(&self, text: &str, n: usize) -> Result<String> {
        if n == 0 {
            return Ok(String::new());
        }

        let ids = self.encode_ids(text)?;
        let start = ids.len().saturating_sub(n);
        self.tokenizer
            .decode(&ids[start..], true)
            .map_err(|e| ChunkerError::tokenizer(format!("Decoding failed: {e}")))
    }
}

impl std::fmt::Debug for HfTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfTokenizer")
            .field("vocab_size", &self.tokenizer.get_vocab_size(true))
            .field("add_special_tokens", &self.add_special_tokens)
            .finish()
    }
}
