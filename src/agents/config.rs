//! Configuration types for the care agents

use serde::{Deserialize, Serialize};

/// Text-completion service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmProviderConfig {
    /// Set to false to force demo mode while keeping the section in place
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Provider type
    #[serde(default)]
    pub provider: LlmProviderType,
    /// Model name, or deployment name for Azure
    pub model: String,
    /// Environment variable containing the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Custom base URL (required for Azure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Azure REST API version
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_enabled() -> bool {
    true
}

fn default_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

impl LlmProviderConfig {
    /// Name of the environment variable holding the API key
    pub fn api_key_var(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_key_var())
    }
}

/// Supported completion providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// OpenAI or any OpenAI-compatible endpoint
    OpenAI,
    /// Azure OpenAI deployment
    #[default]
    #[serde(alias = "azure")]
    AzureOpenAI,
}

impl LlmProviderType {
    fn default_key_var(self) -> &'static str {
        match self {
            LlmProviderType::OpenAI => "OPENAI_API_KEY",
            LlmProviderType::AzureOpenAI => "AZURE_OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for LlmProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderType::OpenAI => write!(f, "openai"),
            LlmProviderType::AzureOpenAI => write!(f, "azure"),
        }
    }
}

/// Orchestration tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrchestrationConfig {
    /// Upper bound on a single agent call; expiry drops that agent
    #[serde(default = "default_agent_timeout")]
    pub agent_timeout_seconds: u64,
    /// Responses at or below this confidence are left out of a composite reply
    #[serde(default = "default_inclusion_threshold")]
    pub inclusion_threshold: f32,
    /// Cap on the merged recommendation list
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
    /// Recommendations skimmed from each included response
    #[serde(default = "default_recommendations_per_agent")]
    pub recommendations_per_agent: usize,
}

fn default_agent_timeout() -> u64 {
    35
}

fn default_inclusion_threshold() -> f32 {
    0.7
}

fn default_max_recommendations() -> usize {
    4
}

fn default_recommendations_per_agent() -> usize {
    2
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            agent_timeout_seconds: default_agent_timeout(),
            inclusion_threshold: default_inclusion_threshold(),
            max_recommendations: default_max_recommendations(),
            recommendations_per_agent: default_recommendations_per_agent(),
        }
    }
}

/// Keyword sets used to route a message to agents.
///
/// Matching is by lowercase substring, so `exam` also matches `exams`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    #[serde(default = "default_history_keywords")]
    pub history: Vec<String>,
    #[serde(default = "default_medication_keywords")]
    pub medication: Vec<String>,
    #[serde(default = "default_care_gap_keywords")]
    pub care_gap: Vec<String>,
    #[serde(default = "default_appointment_keywords")]
    pub appointment: Vec<String>,
    /// Any match here selects every agent
    #[serde(default = "default_broad_keywords")]
    pub broad: Vec<String>,
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_history_keywords() -> Vec<String> {
    keywords(&["history", "condition", "diagnosis", "health", "overview", "summary"])
}

fn default_medication_keywords() -> Vec<String> {
    keywords(&[
        "medication",
        "medicine",
        "drug",
        "pill",
        "prescription",
        "dose",
        "interaction",
    ])
}

fn default_care_gap_keywords() -> Vec<String> {
    keywords(&[
        "screening",
        "test",
        "exam",
        "checkup",
        "preventive",
        "gap",
        "overdue",
        "due",
    ])
}

fn default_appointment_keywords() -> Vec<String> {
    keywords(&[
        "appointment",
        "visit",
        "schedule",
        "doctor",
        "specialist",
        "telehealth",
    ])
}

fn default_broad_keywords() -> Vec<String> {
    keywords(&["help", "everything", "all my", "how am i", "what should i"])
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: default_history_keywords(),
            medication: default_medication_keywords(),
            care_gap: default_care_gap_keywords(),
            appointment: default_appointment_keywords(),
            broad: default_broad_keywords(),
        }
    }
}
