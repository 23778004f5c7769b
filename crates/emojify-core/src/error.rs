use std::path::PathBuf;

use thiserror::Error;

/// Startup-time failures. Anything per-token (unknown words, zero vectors,
/// emoji without resolvable words) degrades instead of surfacing here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Lexicon not found: {}", .0.display())]
    LexiconMissing(PathBuf),

    #[error("Malformed lexicon {}:{line}: {reason}", path.display())]
    LexiconMalformed { path: PathBuf, line: usize, reason: String },

    #[error("Embedding provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Stale index cache: {0}")]
    StaleIndex(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
