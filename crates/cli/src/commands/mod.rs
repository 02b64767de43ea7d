//! Command handlers for the docqa CLI.

pub mod chat;
pub mod extract;
pub mod query;

pub use chat::ChatCommand;
pub use extract::ExtractCommand;
pub use query::QueryCommand;

use docqa_core::{config::AppConfig, AppError, AppResult};
use docqa_llm::LlmClient;
use docqa_retrieval::{
    create_provider, EmbeddingConfig, ExtractionPipeline, RetrievalSession, SessionConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use walkdir::WalkDir;

/// Build a retrieval session from the application configuration.
pub fn build_session(config: &AppConfig) -> AppResult<RetrievalSession> {
    let embedding_config = EmbeddingConfig {
        provider: config.embed_provider.clone(),
        model: config.embed_model.clone(),
        dimensions: config.embed_dimensions,
        endpoint: config.endpoint.clone(),
        timeout_secs: config.timeout_secs,
    };
    let provider = create_provider(&embedding_config)?;

    RetrievalSession::new(
        provider,
        SessionConfig {
            chunk_size: config.chunk_size,
            overlap: config.overlap,
            top_k: config.top_k,
        },
    )
}

/// Build the generation client from the application configuration.
pub fn build_llm(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    docqa_llm::create_client(
        &config.gen_provider,
        Some(&config.endpoint),
        Some(Duration::from_secs(config.timeout_secs)),
    )
}

/// Expand path arguments: directories are walked, files pass through.
pub fn collect_files(paths: &[PathBuf]) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.path().is_file() {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            return Err(AppError::Config(format!("No such file: {:?}", path)));
        }
    }

    Ok(files)
}

/// Extract and index each file into the session.
///
/// Files with no readable text are skipped with a warning; extraction never
/// aborts the run. Indexing errors (embedding backend down, invariant
/// violations) are structured and do abort.
pub async fn index_files(
    session: &mut RetrievalSession,
    pipeline: &ExtractionPipeline,
    files: &[PathBuf],
) -> AppResult<u32> {
    let mut total = 0u32;

    for file in files {
        let text = pipeline.extract_text(file).await;
        if text.is_empty() {
            tracing::warn!("No readable text found in {:?}, skipping", file);
            continue;
        }

        let name = file_name(file);
        total += session.index_document(&name, &text).await?;
    }

    Ok(total)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
