//! Chat command handler: index once, answer questions interactively.

use clap::Args;
use docqa_core::{config::AppConfig, AppResult};
use docqa_retrieval::ExtractionPipeline;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Index files, then answer questions from stdin until EOF or "exit"
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Files or directories to index
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command over {} paths", self.files.len());

        let mut session = super::build_session(config)?;
        let pipeline = ExtractionPipeline::default();

        let files = super::collect_files(&self.files)?;
        let chunk_count = super::index_files(&mut session, &pipeline, &files).await?;

        if chunk_count == 0 {
            println!("No readable text found in any input; nothing to ask about.");
            return Ok(());
        }

        println!(
            "Indexed {} chunks from {} files. Ask away (exit/quit to stop).",
            chunk_count,
            files.len()
        );

        let client = super::build_llm(config)?;
        let k = session.top_k();

        let stdin = std::io::stdin();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                break;
            }

            let answer = docqa_retrieval::answer(
                &session,
                client.as_ref(),
                &config.gen_model,
                question,
                k,
            )
            .await?;

            println!("{}\n", answer);
        }

        Ok(())
    }
}
