use crate::error::Result;
use crate::tokenizer::TokenizerAdapter;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

const DEFAULT_CAPACITY: usize = 4096;

/// Memoizes `count_tokens` for exact strings.
///
/// Only whole-string counts are stored; nothing is ever summed. Suffix
/// decoding is passed straight through.
pub struct CachingTokenizer<T> {
    inner: T,
    counts: Mutex<LruCache<String, usize>>,
}

impl<T: TokenizerAdapter> CachingTokenizer<T> {
    pub fn new(inner: T) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: T, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            counts: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Number of cached counts
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, usize>> {
        // A poisoned cache only holds plain counts, so keep using it.
        self.counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<T: TokenizerAdapter> TokenizerAdapter for CachingTokenizer<T> {
    fn count_tokens(&self, text: &str) -> Result<usize> {
        if let Some(count) = self.lock().get(text) {
            return Ok(*count);
        }

        let count = self.inner.count_tokens(text)?;
        self.lock().put(text.to_string(), count);
        Ok(count)
    }

    fn decode_suffix(&self, text: &str, n: usize) -> Result<String> {
        self.inner.decode_suffix(text, n)
    }
}
