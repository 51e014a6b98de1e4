//! Error types for the topogram SOM engine.

use thiserror::Error;

/// The main error type for topogram operations.
#[derive(Error, Debug)]
pub enum TopogramError {
    /// Invalid map configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Violated training precondition or a metric queried on an untrained map.
    #[error("Training error: {0}")]
    Training(String),

    /// Empty dataset or dataset without feature columns.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Shape mismatch between the dataset and a codebook.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected extent.
        expected: usize,
        /// The extent that was provided.
        actual: usize,
    },
}

/// Result type alias for topogram operations.
pub type Result<T> = std::result::Result<T, TopogramError>;
