//! Embedding gateway for the retrieval pipeline.
//!
//! The core consumes embeddings through the `EmbeddingProvider` trait; the
//! concrete model is an external, swappable capability. A provider is fixed
//! per session and its dimension is the session index's dimension.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};

use serde::{Deserialize, Serialize};

/// Configuration for the embedding backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider name ("ollama" or "trigram")
    pub provider: String,

    /// Model identifier (e.g., "all-minilm")
    pub model: String,

    /// Embedding vector dimension
    pub dimensions: usize,

    /// Base URL for remote providers
    pub endpoint: String,

    /// Request timeout for remote providers, in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "all-minilm".to_string(),
            dimensions: 384,
            endpoint: "http://localhost:11434".to_string(),
            timeout_secs: 120,
        }
    }
}
