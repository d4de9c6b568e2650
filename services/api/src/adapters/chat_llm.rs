//! services/api/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for the chat-completion LLM used for both
//! summaries and answers. It implements the `ChatCompletionService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{error, info};
use video_summarizer_core::ports::{
    ChatCompletionService, CompletionRequest, PortError, PortResult,
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ChatCompletionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiChatAdapter {
    client: Client<OpenAIConfig>,
}

impl OpenAiChatAdapter {
    /// Creates a new `OpenAiChatAdapter`.
    pub fn new(client: Client<OpenAIConfig>) -> Self {
        Self { client }
    }

    /// Translates a core request into a single-choice chat completion request.
    fn build_request(request: &CompletionRequest) -> PortResult<CreateChatCompletionRequest> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(request.system.as_str())
                    .build()
                    .map_err(PortError::llm_request_failed)?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(request.user.as_str())
                    .build()
                    .map_err(PortError::llm_request_failed)?,
            ),
        ];

        CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .n(1)
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .build()
            .map_err(PortError::llm_request_failed)
    }
}

//=========================================================================================
// `ChatCompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChatCompletionService for OpenAiChatAdapter {
    /// Runs the completion and returns the content of the first choice.
    async fn complete(&self, request: &CompletionRequest) -> PortResult<String> {
        let chat_request = Self::build_request(request)?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e: OpenAIError| {
                error!(model = %request.model, error = %e, "Chat completion failed");
                PortError::llm_request_failed(e)
            })?;

        if let Some(usage) = &response.usage {
            info!(
                model = %request.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished."
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::llm_request_failed("LLM response contained no text content.")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_model_messages_and_sampling() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            system: "persona".to_string(),
            user: "question".to_string(),
            temperature: 0.5,
            max_tokens: 800,
        };

        let chat_request = OpenAiChatAdapter::build_request(&request).unwrap();

        assert_eq!(chat_request.model, "gpt-3.5-turbo");
        assert_eq!(chat_request.messages.len(), 2);
        assert!(matches!(
            chat_request.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            chat_request.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
        assert_eq!(chat_request.temperature, Some(0.5));
        assert_eq!(chat_request.n, Some(1));
    }
}
