//! Configuration management for the docqa CLI.
//!
//! Configuration is merged from two sources, lowest precedence first:
//! - Environment variables (`DOCQA_*`, `RUST_LOG`, `NO_COLOR`)
//! - Command-line flags
//!
//! The vector index itself is session-scoped and in-memory, so there is no
//! workspace state directory; configuration covers only the external
//! collaborators (embedding and generation backends) and the chunking and
//! retrieval parameters.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

fn default_chunk_size() -> usize {
    1000
}

fn default_overlap() -> usize {
    100
}

fn default_top_k() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    120
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Ollama endpoint used for embeddings and generation
    pub endpoint: String,

    /// Embedding provider ("ollama" or "trigram")
    pub embed_provider: String,

    /// Embedding model identifier
    pub embed_model: String,

    /// Embedding vector dimension
    pub embed_dimensions: usize,

    /// Generation provider ("ollama")
    pub gen_provider: String,

    /// Generation model identifier
    pub gen_model: String,

    /// Request timeout for external calls, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks, in characters
    #[serde(default = "default_overlap")]
    pub overlap: usize,

    /// Number of chunks to retrieve per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            embed_provider: "ollama".to_string(),
            embed_model: "all-minilm".to_string(),
            embed_dimensions: 384,
            gen_provider: "ollama".to_string(),
            gen_model: "llama3.2".to_string(),
            timeout_secs: default_timeout_secs(),
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
            top_k: default_top_k(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `DOCQA_ENDPOINT`: Ollama base URL
    /// - `DOCQA_EMBED_PROVIDER` / `DOCQA_EMBED_MODEL`: embedding backend
    /// - `DOCQA_GEN_PROVIDER` / `DOCQA_GEN_MODEL`: generation backend
    /// - `DOCQA_TIMEOUT_SECS`: external call timeout
    /// - `RUST_LOG`: log level
    /// - `NO_COLOR`: disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("DOCQA_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(provider) = std::env::var("DOCQA_EMBED_PROVIDER") {
            config.embed_provider = provider;
        }

        if let Ok(model) = std::env::var("DOCQA_EMBED_MODEL") {
            config.embed_model = model;
        }

        if let Ok(provider) = std::env::var("DOCQA_GEN_PROVIDER") {
            config.gen_provider = provider;
        }

        if let Ok(model) = std::env::var("DOCQA_GEN_MODEL") {
            config.gen_model = model;
        }

        if let Ok(timeout) = std::env::var("DOCQA_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                AppError::Config(format!("Invalid DOCQA_TIMEOUT_SECS value: {}", timeout))
            })?;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        embed_model: Option<String>,
        gen_model: Option<String>,
        chunk_size: Option<usize>,
        overlap: Option<usize>,
        top_k: Option<usize>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(embed_model) = embed_model {
            self.embed_model = embed_model;
        }

        if let Some(gen_model) = gen_model {
            self.gen_model = gen_model;
        }

        if let Some(chunk_size) = chunk_size {
            self.chunk_size = chunk_size;
        }

        if let Some(overlap) = overlap {
            self.overlap = overlap;
        }

        if let Some(top_k) = top_k {
            self.top_k = top_k;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration for the active providers and chunk policy.
    pub fn validate(&self) -> AppResult<()> {
        let known_embed = ["ollama", "trigram"];
        if !known_embed.contains(&self.embed_provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embed_provider,
                known_embed.join(", ")
            )));
        }

        let known_gen = ["ollama"];
        if !known_gen.contains(&self.gen_provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown generation provider: {}. Supported: {}",
                self.gen_provider,
                known_gen.join(", ")
            )));
        }

        if self.chunk_size == 0 {
            return Err(AppError::InvalidConfiguration(
                "chunk_size must be greater than zero".to_string(),
            ));
        }

        if self.overlap >= self.chunk_size {
            return Err(AppError::InvalidConfiguration(format!(
                "overlap ({}) must be strictly less than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}
