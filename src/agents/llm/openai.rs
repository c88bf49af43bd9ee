//! OpenAI-compatible chat completion provider

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

use super::{CompletionRequest, CompletionResponse, FinishReason, LlmProvider, TokenUsage};
use crate::agents::config::LlmProviderConfig;
use crate::agents::domain::Message;
use crate::agents::error::{LlmError, LlmResult};

/// How the API key is presented to the endpoint
#[derive(Debug, Clone)]
pub(super) enum ApiKeyHeader {
    /// `Authorization: Bearer <key>`
    Bearer(String),
    /// `api-key: <key>` (Azure)
    ApiKey(String),
}

/// OpenAI LLM Provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    endpoint: String,
    auth: ApiKeyHeader,
    model: String,
    /// Azure selects the model through the URL, so the body omits it
    send_model: bool,
    default_temperature: f32,
    default_max_tokens: u32,
}

/// Read the API key named by the configuration
pub(super) fn resolve_api_key(config: &LlmProviderConfig) -> LlmResult<String> {
    let var = config.api_key_var();
    match env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(LlmError::Authentication(format!(
            "Environment variable {} not set",
            var
        ))),
    }
}

impl OpenAiProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &LlmProviderConfig) -> LlmResult<Self> {
        let api_key = resolve_api_key(config)?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        Self::with_endpoint(config, endpoint, ApiKeyHeader::Bearer(api_key), true)
    }

    pub(super) fn with_endpoint(
        config: &LlmProviderConfig,
        endpoint: String,
        auth: ApiKeyHeader,
        send_model: bool,
    ) -> LlmResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LlmError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            auth,
            model: config.model.clone(),
            send_model,
            default_temperature: config.temperature,
            default_max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the chat completions API
    fn build_request_body(&self, request: &CompletionRequest) -> Value {
        let mut body = json!({
            "messages": request.messages,
            "temperature": request.temperature.unwrap_or(self.default_temperature),
            "max_tokens": request.max_tokens.unwrap_or(self.default_max_tokens),
        });

        if self.send_model {
            body["model"] = json!(self.model);
        }

        body
    }

    /// Parse a non-streaming response
    fn parse_response(response: OpenAiResponse) -> LlmResult<CompletionResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Parse("No choices in response".to_string()))?;

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        };

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(CompletionResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            finish_reason,
            usage,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> LlmResult<CompletionResponse> {
        let body = self.build_request_body(&request);

        let builder = self.client.post(&self.endpoint).json(&body);
        let builder = match &self.auth {
            ApiKeyHeader::Bearer(key) => builder.bearer_auth(key),
            ApiKeyHeader::ApiKey(key) => builder.header("api-key", key),
        };

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Authentication(message),
                code => LlmError::Api {
                    status: code,
                    message,
                },
            });
        }

        let parsed: OpenAiResponse = response.json().await?;
        Self::parse_response(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
