use crate::llm;
use crate::{Error, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs, Role,
    },
};
use async_trait::async_trait;

/// Sampling settings sent with every completion request.
#[derive(Clone, Debug, Default)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Chat completions client for any OpenAI-compatible endpoint.
pub struct OpenAI {
    model: String,
    generation: GenerationConfig,
    client: Client<OpenAIConfig>,
}

impl OpenAI {
    pub fn with_config(
        model: String,
        config: OpenAIConfig,
        generation: GenerationConfig,
    ) -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self {
            model,
            generation,
            client: Client::with_config(config),
        })
    }
}

impl From<&llm::Message> for ChatCompletionRequestMessage {
    fn from(msg: &llm::Message) -> Self {
        match msg {
            llm::Message::User(msg) => {
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(msg.clone()),
                    name: None,
                })
            }
            llm::Message::System(msg) => {
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(msg.clone()),
                    name: None,
                })
            }
        }
    }
}

#[async_trait]
impl llm::LLM for OpenAI {
    #[allow(deprecated)]
    async fn completion<'a>(
        &self,
        request: llm::CompletionRequest<'a>,
    ) -> Result<llm::CompletionResponse> {
        let mut completion = CreateChatCompletionRequestArgs::default();
        completion.model(&self.model).messages(
            request
                .messages
                .iter()
                .map(ChatCompletionRequestMessage::from)
                .collect::<Vec<_>>(),
        );

        if let Some(temperature) = self.generation.temperature {
            completion.temperature(temperature);
        }
        if let Some(max_tokens) = self.generation.max_tokens {
            completion.max_tokens(max_tokens);
        }

        let completion = completion.build()?;

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            "sending chat completion"
        );

        let res = self.client.chat().create(completion).await?;

        let Some(choice) = res.choices.first() else {
            return Err(Error::LLMResponseError("choices is empty".to_string()));
        };

        if choice.message.role != Role::Assistant {
            return Err(Error::LLMResponseError(
                "expected role to be assistant".to_string(),
            ));
        }

        let content = choice
            .message
            .content
            .as_ref()
            .ok_or(Error::LLMResponseError("content is empty".to_string()))?;

        Ok(llm::CompletionResponse {
            content: content.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{GenerationConfig, OpenAI};
    use crate::llm::{CompletionRequest, LLM, Message, OpenAIConfig};
    use crate::{Error, Result};
    use mockito::Matcher;
    use serde_json::json;

    fn completion_body(choices: serde_json::Value) -> String {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "test-model",
            "choices": choices,
        })
        .to_string()
    }

    fn client(server: &mockito::Server) -> std::sync::Arc<OpenAI> {
        OpenAI::with_config(
            "test-model".to_string(),
            OpenAIConfig::new()
                .with_api_base(server.url())
                .with_api_key("test-token"),
            GenerationConfig {
                temperature: Some(0.2),
                max_tokens: Some(2000),
            },
        )
    }

    #[tokio::test]
    async fn test_completion_returns_assistant_content() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::PartialJson(json!({
                "model": "test-model",
                "max_tokens": 2000
            })))
            .with_header("content-type", "application/json")
            .with_body(completion_body(json!([{
                "index": 0,
                "message": {"role": "assistant", "content": "hi there"},
                "finish_reason": "stop"
            }])))
            .create_async()
            .await;

        let messages = vec![
            Message::System("be brief".to_string()),
            Message::User("hello".to_string()),
        ];
        let res = client(&server)
            .completion(CompletionRequest {
                messages: &messages,
            })
            .await?;

        assert_eq!(res.content, "hi there");
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_completion_without_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_header("content-type", "application/json")
            .with_body(completion_body(json!([])))
            .create_async()
            .await;

        let messages = vec![Message::User("hello".to_string())];
        let res = client(&server)
            .completion(CompletionRequest {
                messages: &messages,
            })
            .await;

        assert!(matches!(res, Err(Error::LLMResponseError(_))));
    }
}
