//! Error types for the docqa pipeline.
//!
//! This module defines a unified error enum covering all error categories
//! in the application: chunking configuration, embedding, vector index
//! invariants, generation, extraction, and ambient I/O concerns.

use thiserror::Error;

/// Unified error type for the docqa pipeline.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated. The only
/// places errors are converted to plain text instead of propagated are the
/// answer composer (user-facing final step) and the extraction dispatcher
/// (empty-text policy); both conversions are explicit.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid chunking or session parameters (e.g., overlap >= chunk_size)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Embedding backend unreachable or returned an invalid payload
    #[error("Embedding unavailable: {0}")]
    Embedding(String),

    /// Parallel vector/chunk batches of differing length passed to the index
    #[error("Length mismatch: {vectors} vectors but {chunks} chunks")]
    LengthMismatch { vectors: usize, chunks: usize },

    /// Vector length does not match the index dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vector contains NaN or infinite components
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    /// Vector search attempted before any index was created
    #[error("Vector index is not initialized")]
    IndexNotInitialized,

    /// Answer-generation call to the LLM collaborator failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// External extraction collaborator (document/OCR/transcription) failed
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::LengthMismatch {
            vectors: 2,
            chunks: 3,
        };
        assert_eq!(err.to_string(), "Length mismatch: 2 vectors but 3 chunks");

        let err = AppError::DimensionMismatch {
            expected: 384,
            actual: 4,
        };
        assert!(err.to_string().contains("expected 384"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
