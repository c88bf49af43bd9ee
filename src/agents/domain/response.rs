//! Agent and orchestration response types

use serde::{Deserialize, Serialize};

use crate::domain::CareGap;

/// Structured output of one agent for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Display name of the producing agent
    pub agent_name: String,
    /// Narrative text
    pub response: String,
    /// Agent-assigned confidence in [0, 1]; not comparable across agents
    pub confidence: f32,
    #[serde(default)]
    pub actions_taken: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AgentResponse {
    pub fn new(agent_name: impl Into<String>, response: impl Into<String>, confidence: f32) -> Self {
        Self {
            agent_name: agent_name.into(),
            response: response.into(),
            confidence: confidence.clamp(0.0, 1.0),
            actions_taken: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions_taken = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations = recommendations.into_iter().map(Into::into).collect();
        self
    }
}

/// Merged reply to one user message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub primary_response: String,
    /// Successful agent responses in invocation order
    pub agent_contributions: Vec<AgentResponse>,
    /// Up to three unresolved gaps, store order
    #[serde(default)]
    pub care_gaps_detected: Vec<CareGap>,
    #[serde(default)]
    pub medication_alerts: Vec<String>,
    #[serde(default)]
    pub appointment_suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(AgentResponse::new("a", "b", 1.5).confidence, 1.0);
        assert_eq!(AgentResponse::new("a", "b", -0.2).confidence, 0.0);
    }

    #[test]
    fn test_builder() {
        let response = AgentResponse::new("Agent", "text", 0.9)
            .with_actions(["one", "two"])
            .with_recommendations(vec!["rec".to_string()]);
        assert_eq!(response.actions_taken, vec!["one", "two"]);
        assert_eq!(response.recommendations, vec!["rec"]);
    }
}
