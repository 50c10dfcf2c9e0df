use crate::answer::{self, StructuredAnswer};
use crate::gather::Gatherer;
use agent::Result;
use agent::llm::{self, Message};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = include_str!("prompts/system.md");

/// Runs one question through gather, prompt, model call and answer parsing.
pub struct Orchestrator {
    llm: Arc<dyn llm::LLM + Send + Sync>,
    gatherer: Gatherer,
    system_prompt: String,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn llm::LLM + Send + Sync>, gatherer: Gatherer) -> Result<Self> {
        let system_prompt =
            SYSTEM_PROMPT.replace("{format_instructions}", &answer::format_instructions()?);

        Ok(Self {
            llm,
            gatherer,
            system_prompt,
        })
    }

    /// Model endpoint errors are returned as-is; everything after the call
    /// degrades to a fallback answer instead of failing.
    pub async fn answer(&self, question: &str) -> Result<StructuredAnswer> {
        let tool_results = self.gatherer.gather(question).await;
        tracing::debug!(context_len = tool_results.len(), "gathered tool results");

        let messages = vec![
            Message::System(self.system_prompt.clone()),
            Message::User(format!(
                "Question: {}\nTool Results: {}",
                question, tool_results
            )),
        ];
        for message in &messages {
            tracing::trace!(%message, "prompt message");
        }

        let response = self
            .llm
            .completion(llm::CompletionRequest {
                messages: &messages,
            })
            .await?;
        tracing::debug!(reply = %response.content, "model replied");

        Ok(answer::parse_answer(&response.content))
    }
}
