//! Azure OpenAI provider

use async_trait::async_trait;

use super::openai::{resolve_api_key, ApiKeyHeader, OpenAiProvider};
use super::{CompletionRequest, CompletionResponse, LlmProvider};
use crate::agents::config::LlmProviderConfig;
use crate::agents::error::{LlmError, LlmResult};

/// Azure OpenAI LLM Provider
///
/// Same wire format as OpenAI, but the deployment is addressed through the
/// URL and the key travels in an `api-key` header.
pub struct AzureOpenAiProvider {
    inner: OpenAiProvider,
}

impl AzureOpenAiProvider {
    /// Create a new Azure OpenAI provider from configuration
    pub fn new(config: &LlmProviderConfig) -> LlmResult<Self> {
        let api_key = resolve_api_key(config)?;
        let endpoint = Self::endpoint(config)?;

        let inner =
            OpenAiProvider::with_endpoint(config, endpoint, ApiKeyHeader::ApiKey(api_key), false)?;

        Ok(Self { inner })
    }

    /// `{base}/openai/deployments/{deployment}/chat/completions?api-version={version}`
    fn endpoint(config: &LlmProviderConfig) -> LlmResult<String> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            LlmError::InvalidRequest(
                "Azure OpenAI requires base_url to be set (e.g., https://your-resource.openai.azure.com)"
                    .to_string(),
            )
        })?;

        Ok(format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            base_url.trim_end_matches('/'),
            config.model,
            config.api_version
        ))
    }
}

#[async_trait]
impl LlmProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure-openai"
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn complete(&self, request: CompletionRequest) -> LlmResult<CompletionResponse> {
        self.inner.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::config::LlmProviderType;

    fn config(base_url: Option<&str>) -> LlmProviderConfig {
        LlmProviderConfig {
            enabled: true,
            provider: LlmProviderType::AzureOpenAI,
            model: "gpt-4o".to_string(),
            api_key_env: None,
            base_url: base_url.map(String::from),
            api_version: "2024-02-01".to_string(),
            timeout_seconds: 30,
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    #[test]
    fn test_endpoint_format() {
        let endpoint =
            AzureOpenAiProvider::endpoint(&config(Some("https://example.openai.azure.com/"))).unwrap();
        assert_eq!(
            endpoint,
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-01"
        );
    }

    #[test]
    fn test_endpoint_requires_base_url() {
        assert!(matches!(
            AzureOpenAiProvider::endpoint(&config(None)),
            Err(LlmError::InvalidRequest(_))
        ));
    }
}
