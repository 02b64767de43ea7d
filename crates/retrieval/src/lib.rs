//! Chunk-indexing and retrieval core for docqa.
//!
//! Pipeline: extracted text -> [`chunker`] -> chunk strings ->
//! [`embeddings`] -> vectors -> [`index::FlatIndex`]. At query time the
//! question is embedded once, searched once, and the top chunks are handed
//! to [`compose`] for a grounded answer.

pub mod chunker;
pub mod compose;
pub mod embeddings;
pub mod extract;
pub mod index;
pub mod session;

// Re-export commonly used types
pub use chunker::chunk_text;
pub use compose::{compose_answer, NO_INFORMATION};
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use extract::ExtractionPipeline;
pub use index::FlatIndex;
pub use session::{RetrievalSession, ScoredChunk, SessionConfig, SessionStats, SourceRecord};

use docqa_core::AppResult;
use docqa_llm::LlmClient;

/// Retrieve context for `query` and compose a grounded answer.
///
/// Retrieval errors (embedding backend down, dimension violations) are
/// structured and propagate to the caller; only the final generation step
/// degrades to a plain-text reply inside [`compose_answer`].
pub async fn answer(
    session: &RetrievalSession,
    client: &dyn LlmClient,
    model: &str,
    query: &str,
    k: usize,
) -> AppResult<String> {
    let context = session.retrieve(query, k).await?;

    tracing::info!(
        "Retrieved {} context chunks for query ({} requested)",
        context.len(),
        k
    );

    Ok(compose_answer(client, model, query, &context).await)
}
