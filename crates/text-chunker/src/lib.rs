//! # Context Text Chunker
//!
//! Deterministic, token-budgeted chunking of prose documents for retrieval
//! and embedding pipelines.
//!
//! ## Philosophy
//!
//! The chunker keeps paragraphs intact whenever it can:
//! - Paragraphs are packed greedily until the next one would overflow `max_tokens`
//! - Chunks below `min_tokens` absorb the next paragraph instead of being emitted
//! - Paragraphs larger than the budget fall back to sentence packing
//! - Consecutive chunks share a sliding overlap of `overlap_tokens` tokens
//!
//! Token counts always come from the injected [`TokenizerAdapter`] on the
//! full text being measured; subword tokenizers are not additive across joins.
//!
//! ## Architecture
//!
//! ```text
//! Raw Text
//!     │
//!     ├──> Normalizer (line endings, blank lines, horizontal whitespace)
//!     │
//!     ├──> Paragraph Splitter ("\n\n")
//!     │
//!     ├──> Chunk Accumulator
//!     │    ├─> Sentence Splitter (oversized paragraphs only)
//!     │    └─> TokenizerAdapter (counts, overlap suffixes)
//!     │
//!     └──> Record Assembly
//!          └─> ChunkRecord[] { doc_id, chunk_id, text, token_count, metadata }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_text_chunker::{Chunker, ChunkingConfig, Metadata, WhitespaceTokenizer};
//!
//! let config = ChunkingConfig::new(80, 350, 50);
//! let chunker = Chunker::new(config, WhitespaceTokenizer).unwrap();
//!
//! let text = "First paragraph.\r\n\r\n\r\nSecond   paragraph.";
//! let records = chunker.build_chunks("doc_01", text, Metadata::new()).unwrap();
//!
//! for record in &records {
//!     println!("{} ({} tokens)", record.chunk_id, record.token_count);
//! }
//! assert_eq!(records[0].text, "First paragraph.\n\nSecond paragraph.");
//! ```

mod accumulator;
mod cache;
mod chunker;
mod config;
mod error;
mod hf;
mod normalize;
mod sentence;
mod tokenizer;
mod types;

#[cfg(test)]
mod test_support;

pub use accumulator::chunk_paragraphs;
pub use cache::CachingTokenizer;
pub use chunker::Chunker;
pub use config::{ChunkingConfig, OversizedPolicy};
pub use error::{ChunkerError, Result};
pub use hf::HfTokenizer;
pub use normalize::{normalize, split_paragraphs, PARAGRAPH_SEPARATOR};
pub use sentence::{split_long_paragraph, split_sentences};
pub use tokenizer::{TokenizerAdapter, WhitespaceTokenizer};
pub use types::{ChunkRecord, ChunkingStats, Metadata};
