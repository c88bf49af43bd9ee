//! Narrative generation with deterministic demo fallback

use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::agents::config::LlmProviderConfig;
use crate::agents::domain::AgentKind;
use crate::agents::error::{AgentError, AgentResult};
use crate::agents::llm::{create_provider, CompletionRequest, LlmProvider};

/// Produces agent narratives.
///
/// Whether a completion service is present is decided once, at construction.
/// Without one every narrative is the agent's templated demo text; with one,
/// any service failure also degrades to the demo text.
#[derive(Clone, Default)]
pub struct Narrator {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl Narrator {
    /// Demo mode: templated text only
    pub fn demo() -> Self {
        Self { provider: None }
    }

    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Capability check against the completion settings
    pub fn from_config(config: Option<&LlmProviderConfig>) -> Self {
        match config {
            Some(config) if config.enabled => match create_provider(config) {
                Ok(provider) => {
                    info!(
                        provider = provider.name(),
                        model = provider.model(),
                        "Completion service configured"
                    );
                    Self::with_provider(provider)
                }
                Err(e) => {
                    warn!("Completion service unavailable, running in demo mode: {}", e);
                    Self::demo()
                }
            },
            _ => {
                info!("No completion service configured, running in demo mode");
                Self::demo()
            }
        }
    }

    /// True when a completion service backs this narrator
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate narrative text for one agent call.
    ///
    /// Only cancellation is an error; every other failure returns `fallback()`.
    pub async fn narrate<F>(
        &self,
        kind: AgentKind,
        system_prompt: &str,
        message: &str,
        context: &Value,
        cancel: &CancellationToken,
        fallback: F,
    ) -> AgentResult<String>
    where
        F: FnOnce() -> String + Send,
    {
        if cancel.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        let Some(provider) = &self.provider else {
            return Ok(fallback());
        };

        let request = CompletionRequest::for_agent(system_prompt, message, Some(context));

        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(AgentError::Cancelled),
            result = provider.complete(request) => result,
        };

        match result {
            Ok(response) if !response.message.content.trim().is_empty() => {
                debug!(agent = %kind, "Completion service answered");
                Ok(response.message.content)
            }
            Ok(_) => {
                warn!(agent = %kind, "Completion service returned empty text, using demo response");
                Ok(fallback())
            }
            Err(e) => {
                warn!(agent = %kind, "Completion service error, using demo response: {}", e);
                Ok(fallback())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::llm::testing::ScriptedProvider;
    use serde_json::json;

    async fn narrate(narrator: &Narrator, cancel: &CancellationToken) -> AgentResult<String> {
        narrator
            .narrate(
                AgentKind::History,
                "system",
                "hello",
                &json!({}),
                cancel,
                || "demo text".to_string(),
            )
            .await
    }

    #[tokio::test]
    async fn test_demo_mode_uses_fallback() {
        let narrator = Narrator::demo();
        assert!(!narrator.is_configured());
        assert_eq!(narrate(&narrator, &CancellationToken::new()).await.unwrap(), "demo text");
    }

    #[tokio::test]
    async fn test_service_text_is_used() {
        let provider = Arc::new(ScriptedProvider::reply("from the model"));
        let narrator = Narrator::with_provider(provider.clone());
        assert!(narrator.is_configured());
        assert_eq!(
            narrate(&narrator, &CancellationToken::new()).await.unwrap(),
            "from the model"
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_service_failure_falls_back() {
        let narrator = Narrator::with_provider(Arc::new(ScriptedProvider::failing()));
        assert_eq!(narrate(&narrator, &CancellationToken::new()).await.unwrap(), "demo text");
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back() {
        let narrator = Narrator::with_provider(Arc::new(ScriptedProvider::reply("   ")));
        assert_eq!(narrate(&narrator, &CancellationToken::new()).await.unwrap(), "demo text");
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_slow_service() {
        let narrator = Narrator::with_provider(Arc::new(ScriptedProvider::hanging()));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            trigger.cancel();
        });

        assert!(matches!(narrate(&narrator, &cancel).await, Err(AgentError::Cancelled)));
    }

    #[test]
    fn test_disabled_config_is_demo() {
        let config = LlmProviderConfig {
            enabled: false,
            provider: Default::default(),
            model: "gpt-4o".to_string(),
            api_key_env: None,
            base_url: Some("https://example.openai.azure.com".to_string()),
            api_version: "2024-02-01".to_string(),
            timeout_seconds: 30,
            max_tokens: 1000,
            temperature: 0.7,
        };
        assert!(!Narrator::from_config(Some(&config)).is_configured());
        assert!(!Narrator::from_config(None).is_configured());
    }
}
