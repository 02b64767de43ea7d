//! Retrieval session: ties chunking, embedding and the vector index
//! together for one document-QA session.
//!
//! The session exclusively owns the index handle and the embedding provider
//! for its lifetime. `add`-and-`retrieve` are not safe to interleave from
//! multiple tasks; callers serialize access (the CLI naturally does, one
//! command at a time).

use crate::chunker::chunk_text;
use crate::embeddings::EmbeddingProvider;
use crate::index::FlatIndex;
use chrono::{DateTime, Utc};
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Chunking and retrieval parameters for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Chunk size in characters
    pub chunk_size: usize,

    /// Overlap between consecutive chunks, in characters
    pub overlap: usize,

    /// Default number of chunks to retrieve per query
    pub top_k: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 100,
            top_k: 3,
        }
    }
}

/// A retrieved chunk with its distance to the query embedding.
///
/// Lower distance means closer; distances are retained mainly for callers
/// and tests, ordering is the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Chunk text
    pub text: String,

    /// Squared Euclidean distance to the query vector
    pub distance: f32,
}

/// Bookkeeping for one indexed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Human-readable source name (usually the file name)
    pub name: String,

    /// Number of chunks produced from this source
    pub chunk_count: u32,

    /// When the source was indexed
    pub indexed_at: DateTime<Utc>,
}

/// Statistics for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Sources indexed so far
    pub sources: Vec<SourceRecord>,

    /// Total chunks held by the index
    pub chunk_count: usize,

    /// Index dimension, if an index exists yet
    pub dimension: Option<usize>,
}

/// Session object owning the index and the embedding gateway.
#[derive(Debug)]
pub struct RetrievalSession {
    config: SessionConfig,
    provider: Arc<dyn EmbeddingProvider>,
    index: Option<FlatIndex>,
    sources: Vec<SourceRecord>,
}

impl RetrievalSession {
    /// Create a session with the given embedding provider and parameters.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the chunking parameters are unusable, so a
    /// bad session cannot be constructed at all.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: SessionConfig) -> AppResult<Self> {
        if config.chunk_size == 0 {
            return Err(AppError::InvalidConfiguration(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if config.overlap >= config.chunk_size {
            return Err(AppError::InvalidConfiguration(format!(
                "overlap ({}) must be strictly less than chunk_size ({})",
                config.overlap, config.chunk_size
            )));
        }

        Ok(Self {
            config,
            provider,
            index: None,
            sources: Vec::new(),
        })
    }

    /// The session's default retrieval count.
    pub fn top_k(&self) -> usize {
        self.config.top_k
    }

    /// Chunk, embed and index one document. Returns the number of chunks
    /// indexed.
    ///
    /// The whole batch is embedded before anything touches the index, and
    /// the index validates the batch before appending, so a failure at any
    /// point leaves the index exactly as it was. Empty or whitespace-only
    /// text indexes nothing and returns 0.
    pub async fn index_document(&mut self, name: &str, text: &str) -> AppResult<u32> {
        let chunks = chunk_text(text, self.config.chunk_size, self.config.overlap)?;
        if chunks.is_empty() {
            tracing::info!("No indexable text in '{}', skipping", name);
            return Ok(0);
        }

        let embeddings = self.provider.embed_batch(&chunks).await?;

        if self.index.is_none() {
            tracing::debug!(
                "Creating index with dimension {}",
                self.provider.dimensions()
            );
        }
        let dimensions = self.provider.dimensions();
        let index = self.index.get_or_insert_with(|| FlatIndex::new(dimensions));

        let count = chunks.len() as u32;
        index.add(embeddings, chunks)?;

        self.sources.push(SourceRecord {
            name: name.to_string(),
            chunk_count: count,
            indexed_at: Utc::now(),
        });

        tracing::info!("Indexed {} chunks from '{}'", count, name);
        Ok(count)
    }

    /// Answer-time retrieval: embed the query once, search once.
    ///
    /// A session that has never indexed anything returns an empty list;
    /// the caller decides how to present "no context".
    pub async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<ScoredChunk>> {
        let index = match self.index.as_ref() {
            Some(index) => index,
            None => {
                tracing::debug!("Retrieve on an unpopulated session, returning no chunks");
                return Ok(Vec::new());
            }
        };

        let query_embedding = self.provider.embed(query).await?;
        let hits = index.search(&query_embedding, k)?;

        Ok(hits
            .into_iter()
            .map(|(text, distance)| ScoredChunk { text, distance })
            .collect())
    }

    /// Vector-only search against the session index.
    ///
    /// Unlike [`retrieve`](Self::retrieve), this is the programmer-facing
    /// path: calling it before any document was indexed is an error.
    pub fn search_vector(&self, query: &[f32], k: usize) -> AppResult<Vec<ScoredChunk>> {
        let index = self.index.as_ref().ok_or(AppError::IndexNotInitialized)?;
        let hits = index.search(query, k)?;

        Ok(hits
            .into_iter()
            .map(|(text, distance)| ScoredChunk { text, distance })
            .collect())
    }

    /// Discard the index and all source records. The next indexed document
    /// creates a fresh index.
    pub fn reset(&mut self) {
        self.index = None;
        self.sources.clear();
        tracing::info!("Session reset");
    }

    /// Current session statistics.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            sources: self.sources.clone(),
            chunk_count: self.index.as_ref().map_or(0, |i| i.len()),
            dimension: self.index.as_ref().map(|i| i.dimension()),
        }
    }
}
