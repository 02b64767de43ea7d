//! Query command handler: one-shot index-and-answer.

use clap::Args;
use docqa_core::{config::AppConfig, AppResult};
use docqa_retrieval::ExtractionPipeline;
use std::path::PathBuf;

/// Index files and answer a single question
#[derive(Args, Debug)]
pub struct QueryCommand {
    /// The question to answer
    pub question: String,

    /// Files or directories to index
    #[arg(long = "file", required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON (answer plus retrieved context)
    #[arg(long)]
    pub json: bool,
}

impl QueryCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing query command over {} paths", self.files.len());

        let mut session = super::build_session(config)?;
        let pipeline = ExtractionPipeline::default();

        let files = super::collect_files(&self.files)?;
        let chunk_count = super::index_files(&mut session, &pipeline, &files).await?;

        tracing::info!("Indexed {} chunks from {} files", chunk_count, files.len());

        let client = super::build_llm(config)?;
        let k = session.top_k();

        let context = session.retrieve(&self.question, k).await?;
        let answer =
            docqa_retrieval::compose_answer(client.as_ref(), &config.gen_model, &self.question, &context)
                .await;

        if self.json {
            let output = serde_json::json!({
                "question": self.question,
                "answer": answer,
                "chunksIndexed": chunk_count,
                "context": context.iter().map(|c| {
                    serde_json::json!({ "text": c.text, "distance": c.distance })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}
