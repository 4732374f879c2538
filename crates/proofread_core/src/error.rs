//! Error types for store access and page editing.
use thiserror::Error;

/// Top-level error type for the proofreading core.
#[derive(Error, Debug)]
pub enum ProofreadError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Span end {end} is out of range for text of {len} characters")]
    OutOfRange { end: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
