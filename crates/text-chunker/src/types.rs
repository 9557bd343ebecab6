use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Caller-supplied document metadata, attached to every chunk record
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One chunk of a document, ready for embedding or indexing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkRecord {
    /// Identifier of the source document
    pub doc_id: String,

    /// `"{doc_id}_chunk_{index}"`, zero-based in emission order
    pub chunk_id: String,

    /// The chunk text
    pub text: String,

    /// Token count of `text` as reported by the tokenizer
    pub token_count: usize,

    /// Document metadata, shared by every record of the document
    pub metadata: Arc<Metadata>,
}

impl ChunkRecord {
    /// Build the chunk id for position `index` of `doc_id`
    #[must_use]
    pub fn chunk_id(doc_id: &str, index: usize) -> String {
        format!("{doc_id}_chunk_{index}")
    }
}

/// Statistics about chunking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_tokens: usize,
    pub avg_tokens_per_chunk: usize,
    pub min_tokens: usize,
    pub max_tokens: usize,
}

impl ChunkingStats {
    #[must_use]
    pub fn from_records(records: &[ChunkRecord]) -> Self {
        let total_tokens: usize = records.iter().map(|r| r.token_count).sum();
        Self {
            total_chunks: records.len(),
            total_tokens,
            avg_tokens_per_chunk: if records.is_empty() {
                0
            } else {
                total_tokens / records.len()
            },
            min_tokens: records.iter().map(|r| r.token_count).min().unwrap_or(0),
            max_tokens: records.iter().map(|r| r.token_count).max().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Tokens: {} | Avg: {} | Range: {}-{}",
            self.total_chunks,
            self.total_tokens,
            self.avg_tokens_per_chunk,
            self.min_tokens,
            self.max_tokens
        )
    }
}
