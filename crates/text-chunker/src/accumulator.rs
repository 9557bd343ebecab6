use crate::config::{ChunkingConfig, OversizedPolicy};
use crate::error::Result;
use crate::normalize::PARAGRAPH_SEPARATOR;
use crate::sentence::split_long_paragraph;
use crate::tokenizer::TokenizerAdapter;

/// Greedily pack paragraphs into chunks under the configured token budget.
///
/// Per paragraph, the first matching rule applies:
/// 1. the paragraph alone exceeds `max_tokens`: its sentence sub-chunks go
///    straight to the output (see [`OversizedPolicy`] for the pending chunk);
/// 2. it fits next to the pending chunk: append it;
/// 3. the pending chunk is still below `min_tokens`: append it anyway;
/// 4. otherwise finalize the pending chunk and start a new one, seeded with
///    the last `overlap_tokens` tokens of the finalized chunk.
///
/// The config is expected to be validated already.
pub fn chunk_paragraphs<P, T>(
    paragraphs: &[P],
    config: &ChunkingConfig,
    tokenizer: &T,
) -> Result<Vec<String>>
where
    P: AsRef<str>,
    T: TokenizerAdapter + ?Sized,
{
    let mut acc = Accumulator::new(config, tokenizer);
    for paragraph in paragraphs {
        acc.push(paragraph.as_ref())?;
    }
    Ok(acc.finish())
}

struct Accumulator<'a, T: ?Sized> {
    config: &'a ChunkingConfig,
    tokenizer: &'a T,
    chunks: Vec<String>,
    current: String,
    current_tokens: usize,
}

impl<'a, T> Accumulator<'a, T>
where
    T: TokenizerAdapter + ?Sized,
{
    fn new(config: &'a ChunkingConfig, tokenizer: &'a T) -> Self {
        Self {
            config,
            tokenizer,
            chunks: Vec::new(),
            current: String::new(),
            current_tokens: 0,
        }
    }

    fn push(&mut self, paragraph: &str) -> Result<()> {
        let paragraph_tokens = self.tokenizer.count_tokens(paragraph)?;
        let max_tokens = self.config.max_tokens;

        if paragraph_tokens > max_tokens {
            return self.push_oversized(paragraph, paragraph_tokens);
        }

        if self.current_tokens + paragraph_tokens <= max_tokens {
            return self.append(paragraph, paragraph_tokens);
        }

        if self.current_tokens < self.config.min_tokens {
            log::trace!(
                "pending chunk at {} tokens is below min_tokens={}; appending {} tokens past the budget",
                self.current_tokens,
                self.config.min_tokens,
                paragraph_tokens
            );
            return self.append(paragraph, paragraph_tokens);
        }

        let finalized = self.finalize();
        self.seed(finalized.as_deref(), paragraph, paragraph_tokens)
    }

    fn push_oversized(&mut self, paragraph: &str, paragraph_tokens: usize) -> Result<()> {
        if self.config.oversized_policy == OversizedPolicy::FlushPending {
            self.finalize();
        }

        let sub_chunks = split_long_paragraph(paragraph, self.config.max_tokens, self.tokenizer)?;
        log::debug!(
            "paragraph of {paragraph_tokens} tokens exceeds max_tokens={}; split into {} sentence chunks",
            self.config.max_tokens,
            sub_chunks.len()
        );
        self.chunks.extend(sub_chunks);
        Ok(())
    }

    fn append(&mut self, paragraph: &str, paragraph_tokens: usize) -> Result<()> {
        if self.current.is_empty() {
            self.current.push_str(paragraph);
            self.current_tokens = paragraph_tokens;
        } else {
            self.current.push_str(PARAGRAPH_SEPARATOR);
            self.current.push_str(paragraph);
            self.current_tokens = self.tokenizer.count_tokens(&self.current)?;
        }
        Ok(())
    }

    /// Emit the pending chunk (trimmed) and reset the state. Returns the
    /// emitted text, or `None` when nothing was pending.
    fn finalize(&mut self) -> Option<String> {
        let pending = std::mem::take(&mut self.current);
        let tokens = std::mem::take(&mut self.current_tokens);

        let trimmed = pending.trim();
        if trimmed.is_empty() {
            return None;
        }

        log::debug!("chunk {} finalized at {tokens} tokens", self.chunks.len());
        self.chunks.push(trimmed.to_string());
        Some(trimmed.to_string())
    }

    fn seed(
        &mut self,
        previous: Option<&str>,
        paragraph: &str,
        paragraph_tokens: usize,
    ) -> Result<()> {
        let overlap_tokens = self.config.overlap_tokens;
        let overlap = match previous {
            Some(previous) if overlap_tokens > 0 => {
                self.tokenizer.decode_suffix(previous, overlap_tokens)?
            }
            _ => String::new(),
        };

        if overlap.trim().is_empty() {
            self.current = paragraph.to_string();
            self.current_tokens = paragraph_tokens;
            return Ok(());
        }

        self.current = format!("{overlap}{PARAGRAPH_SEPARATOR}{paragraph}");
        self.current_tokens = self.tokenizer.count_tokens(&self.current)?;
        Ok(())
    }

    fn finish(mut self) -> Vec<String> {
        self.finalize();
        self.chunks
    }
}
