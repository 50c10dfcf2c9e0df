use crate::Result;
use async_trait::async_trait;

mod openai;
pub use async_openai::config::OpenAIConfig;
pub use openai::{GenerationConfig, OpenAI};

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    System(String),
    User(String),
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::System(content) => write!(f, "[system]\n{}\n", content),
            Message::User(content) => write!(f, "[user]\n{}\n", content),
        }
    }
}

pub struct CompletionRequest<'a> {
    pub messages: &'a [Message],
}

pub struct CompletionResponse {
    pub content: String,
}

#[async_trait]
pub trait LLM {
    async fn completion<'a>(&self, request: CompletionRequest<'a>) -> Result<CompletionResponse>;
}
