//! Ollama embedding provider.
//!
//! Uses the batch `/api/embed` endpoint, which accepts a list of inputs and
//! returns one embedding per input in the same order.

use crate::embeddings::provider::EmbeddingProvider;
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

/// Pinned response schema; anything else is an embedding failure.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Embedding provider backed by a local Ollama runtime.
#[derive(Debug)]
pub struct OllamaEmbedding {
    base_url: String,
    model: String,
    dimensions: usize,
    client: reqwest::Client,
}

impl OllamaEmbedding {
    /// Create a provider for the given endpoint, model and dimension.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            dimensions,
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaEmbedding {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(
            "Embedding {} texts via Ollama (model: {})",
            texts.len(),
            self.model
        );

        let url = format!("{}/api/embed", self.base_url);
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to reach Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Embedding(format!(
                "Ollama embed API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to parse embed response: {}", e)))?;

        // Length preservation is part of the gateway contract; a divergent
        // reply must not reach the index
        if body.embeddings.len() != texts.len() {
            return Err(AppError::Embedding(format!(
                "Backend returned {} embeddings for {} inputs",
                body.embeddings.len(),
                texts.len()
            )));
        }

        for embedding in &body.embeddings {
            if embedding.len() != self.dimensions {
                return Err(AppError::Embedding(format!(
                    "Backend returned dimension {} but {} was configured",
                    embedding.len(),
                    self.dimensions
                )));
            }
        }

        Ok(body.embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_metadata() {
        let provider = OllamaEmbedding::new(
            "http://localhost:11434",
            "all-minilm",
            384,
            Duration::from_secs(30),
        );
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "all-minilm");
        assert_eq!(provider.dimensions(), 384);
    }

    #[tokio::test]
    async fn test_empty_batch_short_circuits() {
        // No network call is made for an empty batch
        let provider = OllamaEmbedding::new(
            "http://invalid.localhost:1",
            "all-minilm",
            384,
            Duration::from_secs(1),
        );
        let embeddings = provider.embed_batch(&[]).await.unwrap();
        assert!(embeddings.is_empty());
    }

    #[test]
    fn test_embed_response_schema() {
        let body = r#"{"model": "all-minilm", "embeddings": [[0.1, 0.2], [0.3, 0.4]]}"#;
        let parsed: EmbedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.embeddings.len(), 2);
        assert_eq!(parsed.embeddings[0], vec![0.1, 0.2]);
    }
}
