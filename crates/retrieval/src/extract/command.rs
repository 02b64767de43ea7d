//! Subprocess-backed extraction collaborators.
//!
//! The original extraction tools (PDF text dumpers, OCR, speech-to-text)
//! live outside this process; each is wrapped as a command template whose
//! `{input}` placeholder is replaced with the file path and whose stdout is
//! the extracted text.

use crate::extract::MediaExtractor;
use docqa_core::{AppError, AppResult};
use std::path::Path;
use tokio::process::Command;

/// Placeholder replaced with the input file path.
const INPUT_PLACEHOLDER: &str = "{input}";

/// Extraction collaborator that shells out to an external tool.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
}

impl CommandExtractor {
    /// Create an extractor running `program` with an argument template.
    ///
    /// Every `{input}` occurrence in `args` is substituted with the file
    /// path at extraction time.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `pdftotext <file> -` — PDF text extraction to stdout.
    pub fn pdftotext() -> Self {
        Self::new(
            "pdftotext",
            vec![INPUT_PLACEHOLDER.to_string(), "-".to_string()],
        )
    }

    /// `tesseract <file> stdout` — OCR to stdout.
    pub fn tesseract() -> Self {
        Self::new(
            "tesseract",
            vec![INPUT_PLACEHOLDER.to_string(), "stdout".to_string()],
        )
    }

    /// `whisper-cli -f <file> --no-prints` — speech-to-text to stdout.
    pub fn whisper() -> Self {
        Self::new(
            "whisper-cli",
            vec![
                "-f".to_string(),
                INPUT_PLACEHOLDER.to_string(),
                "--no-prints".to_string(),
            ],
        )
    }
}

#[async_trait::async_trait]
impl MediaExtractor for CommandExtractor {
    async fn extract(&self, path: &Path) -> AppResult<String> {
        let input = path.to_string_lossy();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(INPUT_PLACEHOLDER, &input))
            .collect();

        tracing::debug!("Running extractor: {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                AppError::Extraction(format!("Failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Extraction(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
