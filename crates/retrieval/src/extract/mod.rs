//! Text extraction front for heterogeneous documents.
//!
//! Plain text and markdown are read natively; structured documents, images
//! and audio/video are delegated to external collaborator tools. Extraction
//! failures are a non-fatal "no content" outcome: the dispatcher converts
//! every error into an empty string, logs it, and downstream code treats
//! empty text as "nothing to index". That degrade-to-empty behavior is an
//! explicit policy of this module, applied only at [`ExtractionPipeline::extract_text`].

pub mod command;

pub use command::CommandExtractor;

use docqa_core::{AppError, AppResult};
use std::path::Path;

/// Content classification by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Plain text, read natively
    PlainText,
    /// Markdown, read natively with light cleanup
    Markdown,
    /// PDF / Word / slide formats, external extractor
    Document,
    /// Raster images, external OCR
    Image,
    /// Audio/video, external transcription
    Media,
    /// Anything else
    Unknown,
}

impl ContentKind {
    /// Detect content kind from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("txt") => Self::PlainText,
            Some("md") | Some("markdown") => Self::Markdown,
            Some("pdf") | Some("docx") | Some("pptx") => Self::Document,
            Some("png") | Some("jpg") | Some("jpeg") => Self::Image,
            Some("mp3") | Some("mp4") => Self::Media,
            _ => Self::Unknown,
        }
    }
}

/// External collaborator that turns one file into plain text.
#[async_trait::async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Extract text from the file at `path`.
    async fn extract(&self, path: &Path) -> AppResult<String>;
}

/// Extension-dispatching extraction pipeline.
pub struct ExtractionPipeline {
    document: Box<dyn MediaExtractor>,
    ocr: Box<dyn MediaExtractor>,
    transcriber: Box<dyn MediaExtractor>,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self {
            document: Box::new(CommandExtractor::pdftotext()),
            ocr: Box::new(CommandExtractor::tesseract()),
            transcriber: Box::new(CommandExtractor::whisper()),
        }
    }
}

impl ExtractionPipeline {
    /// Build a pipeline with explicit collaborators (used by tests and by
    /// deployments with non-default tools).
    pub fn new(
        document: Box<dyn MediaExtractor>,
        ocr: Box<dyn MediaExtractor>,
        transcriber: Box<dyn MediaExtractor>,
    ) -> Self {
        Self {
            document,
            ocr,
            transcriber,
        }
    }

    /// Extract plain text from `path`, degrading to an empty string on any
    /// failure or unsupported format.
    pub async fn extract_text(&self, path: &Path) -> String {
        match self.try_extract(path).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!("Extraction failed for {:?}: {}", path, e);
                String::new()
            }
        }
    }

    async fn try_extract(&self, path: &Path) -> AppResult<String> {
        match ContentKind::from_path(path) {
            ContentKind::PlainText => read_native(path),
            ContentKind::Markdown => Ok(clean_markdown(&read_native(path)?)),
            ContentKind::Document => self.document.extract(path).await,
            ContentKind::Image => self.ocr.extract(path).await,
            ContentKind::Media => self.transcriber.extract(path).await,
            ContentKind::Unknown => Err(AppError::Extraction(format!(
                "Unsupported file format: {:?}",
                path
            ))),
        }
    }
}

/// Read a text file, tolerating invalid UTF-8.
fn read_native(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Extraction(format!("Failed to read {:?}: {}", path, e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Strip markdown headers, horizontal rules and code fences so the chunker
/// sees prose.
fn clean_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim_start_matches('#').trim();

        if trimmed.starts_with("---") || trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            continue;
        }

        result.push_str(trimmed);
        result.push('\n');
    }

    result
}
