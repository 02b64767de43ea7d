//! Answer composition: turns retrieved chunks and a question into a
//! grounded prompt and delegates to the generation collaborator.
//!
//! This is the only user-facing step in the pipeline, so it degrades
//! gracefully: every failure of the external call becomes a descriptive
//! string rather than an error. Errors internal to retrieval never pass
//! through here.

use crate::session::ScoredChunk;
use docqa_llm::{LlmClient, LlmRequest};

/// Fixed reply when retrieval produced no context.
pub const NO_INFORMATION: &str = "No relevant information found.";

/// Fixed reply when the model returned a blank completion.
pub const NO_ANSWER: &str = "No answer generated. Please verify the model output.";

/// Compose a grounded answer for `query` from the retrieved `context`.
///
/// With empty context the fixed [`NO_INFORMATION`] string is returned
/// without calling the generation collaborator at all; skipping the call is
/// part of the contract, not an optimization detail left to chance.
pub async fn compose_answer(
    client: &dyn LlmClient,
    model: &str,
    query: &str,
    context: &[ScoredChunk],
) -> String {
    if context.is_empty() {
        tracing::info!("No context retrieved, skipping generation");
        return NO_INFORMATION.to_string();
    }

    let prompt = build_prompt(query, context);

    tracing::debug!(
        "Generating answer from {} context chunks ({} prompt bytes)",
        context.len(),
        prompt.len()
    );

    let request = LlmRequest::new(prompt, model)
        .with_temperature(0.3)
        .with_max_tokens(1000);

    match client.complete(&request).await {
        Ok(response) => {
            let answer = response.content.trim();
            if answer.is_empty() {
                NO_ANSWER.to_string()
            } else {
                answer.to_string()
            }
        }
        Err(e) => {
            tracing::error!("Generation call failed: {}", e);
            format!("Answer generation failed: {}", e)
        }
    }
}

/// Build the deterministic grounding prompt: an instruction header, a
/// numbered enumeration of the context chunks, and the question.
fn build_prompt(query: &str, context: &[ScoredChunk]) -> String {
    let mut prompt = String::from(
        "You are a helpful assistant. Use only the following context to answer.\n\nContext:\n",
    );

    for (i, chunk) in context.iter().enumerate() {
        prompt.push_str(&format!("[Chunk {}]: {}\n\n", i + 1, chunk.text));
    }

    prompt.push_str(&format!("Question: {}\nAnswer concisely:", query));
    prompt
}
