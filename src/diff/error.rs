use thiserror::Error;

/// Custom error types for the deck diffing process.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Text diff generation failed: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}
