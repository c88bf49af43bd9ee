use thiserror::Error;

use crate::agents::config::{LlmProviderConfig, LlmProviderType, OrchestrationConfig, RouterConfig};
use crate::config::{ServerSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    fn invalid(field: &str, reason: &str) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Collects every problem instead of stopping at the first
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&settings.server, &mut errors);
        Self::validate_orchestration(&settings.orchestration, &mut errors);
        Self::validate_router(&settings.router, &mut errors);
        if let Some(completion) = &settings.completion {
            Self::validate_completion(completion, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings, errors: &mut Vec<ValidationError>) {
        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::invalid(
                "server.port",
                "Port must be greater than 0",
            ));
        }
    }

    fn validate_orchestration(config: &OrchestrationConfig, errors: &mut Vec<ValidationError>) {
        if config.agent_timeout_seconds == 0 {
            errors.push(ValidationError::invalid(
                "orchestration.agent_timeout_seconds",
                "Timeout must be greater than 0",
            ));
        }

        if !(0.0..=1.0).contains(&config.inclusion_threshold) {
            errors.push(ValidationError::invalid(
                "orchestration.inclusion_threshold",
                "Threshold must be between 0 and 1",
            ));
        }
    }

    fn validate_router(router: &RouterConfig, errors: &mut Vec<ValidationError>) {
        let sets = [
            ("router.history", &router.history),
            ("router.medication", &router.medication),
            ("router.care_gap", &router.care_gap),
            ("router.appointment", &router.appointment),
        ];

        for (field, words) in sets {
            if words.iter().all(|w| w.trim().is_empty()) {
                errors.push(ValidationError::invalid(
                    field,
                    "At least one keyword is required",
                ));
            }
        }
    }

    fn validate_completion(config: &LlmProviderConfig, errors: &mut Vec<ValidationError>) {
        if config.model.is_empty() {
            errors.push(ValidationError::MissingField("completion.model".to_string()));
        }

        if config.timeout_seconds == 0 {
            errors.push(ValidationError::invalid(
                "completion.timeout_seconds",
                "Timeout must be greater than 0",
            ));
        }

        if config.provider == LlmProviderType::AzureOpenAI
            && config.base_url.as_deref().map_or(true, str::is_empty)
        {
            errors.push(ValidationError::MissingField(
                "completion.base_url (required for Azure OpenAI)".to_string(),
            ));
        }
    }
}
