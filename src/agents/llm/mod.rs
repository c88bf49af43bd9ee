//! Text-completion service providers
//!
//! Agents delegate narrative generation to a chat-completion endpoint:
//! - OpenAI (or any OpenAI-compatible server)
//! - Azure OpenAI deployments

mod azure;
mod openai;
#[cfg(test)]
pub(crate) mod testing;

pub use azure::AzureOpenAiProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agents::config::{LlmProviderConfig, LlmProviderType};
use crate::agents::domain::Message;
use crate::agents::error::LlmResult;

/// Trait for completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the model or deployment being used
    fn model(&self) -> &str;

    /// Complete a request
    async fn complete(&self, request: CompletionRequest) -> LlmResult<CompletionResponse>;
}

/// Request for LLM completion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Messages in the conversation
    pub messages: Vec<Message>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// System prompt, optional serialized context, then the user's message
    pub fn for_agent(
        system_prompt: &str,
        user_message: &str,
        context: Option<&serde_json::Value>,
    ) -> Self {
        let mut messages = vec![Message::system(system_prompt)];
        if let Some(context) = context {
            messages.push(Message::system(format!("Context: {}", context)));
        }
        messages.push(Message::user(user_message));

        Self {
            messages,
            ..Default::default()
        }
    }
}

/// Response from LLM completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated message
    pub message: Message,
    /// Reason the completion stopped
    pub finish_reason: FinishReason,
    /// Token usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// Reason completion stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop
    Stop,
    /// Hit max tokens
    Length,
    /// Content filtered
    ContentFilter,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
    match config.provider {
        LlmProviderType::OpenAI => {
            let provider = OpenAiProvider::new(config)?;
            Ok(Arc::new(provider))
        }
        LlmProviderType::AzureOpenAI => {
            let provider = AzureOpenAiProvider::new(config)?;
            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::domain::Role;
    use serde_json::json;

    #[test]
    fn test_agent_request_layout() {
        let context = json!({ "total_gaps": 2 });
        let request = CompletionRequest::for_agent("sys", "hello", Some(&context));

        let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::System, Role::User]);
        assert_eq!(request.messages[1].content, r#"Context: {"total_gaps":2}"#);
        assert_eq!(request.messages[2].content, "hello");
    }

    #[test]
    fn test_agent_request_without_context() {
        let request = CompletionRequest::for_agent("sys", "hello", None);
        assert_eq!(request.messages.len(), 2);
    }
}
