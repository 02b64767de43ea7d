//! Embedding provider implementations.

pub mod ollama;
pub mod trigram;

pub use ollama::OllamaEmbedding;
pub use trigram::TrigramProvider;
