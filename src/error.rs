//! Error types for the counting engine and its detection sources.

use thiserror::Error;

/// Errors raised by the counting engine.
#[derive(Debug, Error)]
pub enum CounterError {
    /// A detection violated the input contract (non-finite values, inverted
    /// box, confidence outside `[0, 1]`).
    #[error("invalid detection at index {index}: {reason}")]
    InvalidDetection { index: usize, reason: String },

    /// Writing the count summary failed.
    #[error("failed to export count: {0}")]
    Export(#[from] std::io::Error),
}

/// Errors raised while reading detections from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read detection stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed detection frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid detection on line {line}: {source}")]
    Detection {
        line: usize,
        #[source]
        source: CounterError,
    },
}

/// Errors raised while loading an [`AppConfig`](crate::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
