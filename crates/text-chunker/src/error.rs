use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during text chunking
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Invalid token budget configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The tokenizer adapter failed to count, encode or decode
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// A configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a tokenizer error
    pub fn tokenizer(msg: impl Into<String>) -> Self {
        Self::Tokenizer(msg.into())
    }

    /// Create a config parse error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
