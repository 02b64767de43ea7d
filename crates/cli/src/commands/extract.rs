//! Extract command handler: print the extracted text of one file.

use clap::Args;
use docqa_core::AppResult;
use docqa_retrieval::ExtractionPipeline;
use std::path::PathBuf;

/// Extract and print the text of a file
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// File to extract
    pub file: PathBuf,
}

impl ExtractCommand {
    pub async fn execute(&self) -> AppResult<()> {
        let pipeline = ExtractionPipeline::default();
        let text = pipeline.extract_text(&self.file).await;

        if text.is_empty() {
            eprintln!("No readable text found in {:?}", self.file);
        } else {
            println!("{}", text);
        }

        Ok(())
    }
}
