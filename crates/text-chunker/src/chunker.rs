use crate::accumulator::chunk_paragraphs;
use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::normalize::{normalize, split_paragraphs};
use crate::tokenizer::{TokenizerAdapter, WhitespaceTokenizer};
use crate::types::{ChunkRecord, ChunkingStats, Metadata};
use std::sync::Arc;

/// Main chunker interface: a validated config plus the tokenizer it counts with.
///
/// The tokenizer is injected once and reused for every document; each call
/// owns its own accumulation state, so a `Chunker` can be shared across
/// threads whenever its tokenizer can.
pub struct Chunker<T> {
    config: ChunkingConfig,
    tokenizer: T,
}

impl<T: TokenizerAdapter> Chunker<T> {
    /// Create a new chunker, rejecting invalid budgets up front
    pub fn new(config: ChunkingConfig, tokenizer: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, tokenizer })
    }

    /// Normalize, split into paragraphs and pack into chunk texts
    pub fn chunk_text(&self, text: &str) -> Result<Vec<String>> {
        let normalized = normalize(text);
        let paragraphs = split_paragraphs(&normalized);
        log::trace!("{} paragraphs after normalization", paragraphs.len());
        self.chunk_paragraphs(&paragraphs)
    }

    /// Pack already split paragraphs into chunk texts
    pub fn chunk_paragraphs<P: AsRef<str>>(&self, paragraphs: &[P]) -> Result<Vec<String>> {
        chunk_paragraphs(paragraphs, &self.config, &self.tokenizer)
    }

    /// Chunk a document into records carrying ids, token counts and the
    /// document metadata. All records share the same metadata allocation.
    pub fn build_chunks(
        &self,
        doc_id: &str,
        text: &str,
        metadata: impl Into<Arc<Metadata>>,
    ) -> Result<Vec<ChunkRecord>> {
        let metadata = metadata.into();
        let chunks = self.chunk_text(text)?;

        let records = chunks
            .into_iter()
            .enumerate()
            .map(|(index, text)| -> Result<ChunkRecord> {
                let token_count = self.tokenizer.count_tokens(&text)?;
                Ok(ChunkRecord {
                    doc_id: doc_id.to_string(),
                    chunk_id: ChunkRecord::chunk_id(doc_id, index),
                    text,
                    token_count,
                    metadata: Arc::clone(&metadata),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("{doc_id}: {}", Self::get_stats(&records));
        Ok(records)
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Get the injected tokenizer
    #[must_use]
    pub const fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Get statistics about chunking
    #[must_use]
    pub fn get_stats(records: &[ChunkRecord]) -> ChunkingStats {
        ChunkingStats::from_records(records)
    }
}

impl Default for Chunker<WhitespaceTokenizer> {
    fn default() -> Self {
        Self {
            config: ChunkingConfig::default(),
            tokenizer: WhitespaceTokenizer,
        }
    }
}
