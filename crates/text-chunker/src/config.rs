use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Token budget for one chunking run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkingConfig {
    /// Chunks below this size absorb the next paragraph even past `max_tokens`
    pub min_tokens: usize,

    /// Maximum chunk size in tokens
    pub max_tokens: usize,

    /// Tokens carried from the end of a finalized chunk into the next one (0 = off)
    pub overlap_tokens: usize,

    /// What happens to the pending chunk when an oversized paragraph shows up
    pub oversized_policy: OversizedPolicy,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_tokens: 80,
            max_tokens: 350,
            overlap_tokens: 50,
            oversized_policy: OversizedPolicy::KeepPending,
        }
    }
}

impl ChunkingConfig {
    /// Config with explicit budgets and the default oversized policy
    #[must_use]
    pub fn new(min_tokens: usize, max_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            min_tokens,
            max_tokens,
            overlap_tokens,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(ChunkerError::invalid_config("max_tokens must be > 0"));
        }

        if self.min_tokens >= self.max_tokens {
            return Err(ChunkerError::invalid_config(format!(
                "min_tokens ({}) must be lower than max_tokens ({})",
                self.min_tokens, self.max_tokens
            )));
        }

        Ok(())
    }

    /// Load a config file. JSON is tried first, then TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_slice(&bytes)
    }

    /// Parse a JSON or TOML document into a validated config
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let config: Self = match serde_json::from_slice(bytes) {
            Ok(config) => config,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| ChunkerError::config(format!("{json_err}; {err}")))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    ChunkerError::config(format!(
                        "config is not valid JSON ({json_err}) or TOML ({toml_err})"
                    ))
                })?
            }
        };

        config.validate()?;
        Ok(config)
    }
}

/// Handling of the pending chunk when a paragraph alone exceeds `max_tokens`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizedPolicy {
    /// Emit the sentence sub-chunks and keep accumulating into the pending
    /// chunk, which then merges with the paragraphs after the oversized one.
    /// Output is not in document order around the oversized paragraph.
    #[default]
    KeepPending,

    /// Finalize the pending chunk first (without an overlap seed), so the
    /// output follows document order.
    FlushPending,
}
