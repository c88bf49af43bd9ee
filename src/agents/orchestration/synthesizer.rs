//! Merging of agent responses into one reply

use crate::agents::config::OrchestrationConfig;
use crate::agents::domain::AgentResponse;

pub const FALLBACK_PROMPT: &str =
    "I'm here to help coordinate your healthcare. Could you tell me more about what you'd like to know?";

const COMPOSITE_HEADER: &str = "Based on my analysis across your care team:\n\n";

/// Builds the primary response text.
///
/// Confidences are only compared against the fixed inclusion threshold,
/// never against each other.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    inclusion_threshold: f32,
    max_recommendations: usize,
    recommendations_per_agent: usize,
}

impl Synthesizer {
    pub fn new(config: &OrchestrationConfig) -> Self {
        Self {
            inclusion_threshold: config.inclusion_threshold,
            max_recommendations: config.max_recommendations,
            recommendations_per_agent: config.recommendations_per_agent,
        }
    }

    pub fn synthesize(&self, responses: &[AgentResponse]) -> String {
        match responses {
            [] => FALLBACK_PROMPT.to_string(),
            [only] => only.response.clone(),
            _ => self.composite(responses),
        }
    }

    fn composite(&self, responses: &[AgentResponse]) -> String {
        let included: Vec<&AgentResponse> = responses
            .iter()
            .filter(|r| r.confidence > self.inclusion_threshold)
            .collect();

        let mut text = String::from(COMPOSITE_HEADER);
        for response in &included {
            text.push_str(&format!("**{}**: {}\n\n", response.agent_name, response.response));
        }

        let recommendations = self.merged_recommendations(&included);
        if !recommendations.is_empty() {
            text.push_str("**Key Recommendations:**\n");
            for recommendation in recommendations {
                text.push_str(&format!("• {}\n", recommendation));
            }
        }

        text
    }

    /// First few recommendations of each response, deduplicated in response order
    fn merged_recommendations<'a>(&self, included: &[&'a AgentResponse]) -> Vec<&'a str> {
        let mut merged: Vec<&str> = Vec::new();
        let per_agent = self.recommendations_per_agent;
        let skimmed = included.iter().copied().flat_map(|r| {
            r.recommendations
                .iter()
                .take(per_agent)
                .map(String::as_str)
        });

        for recommendation in skimmed {
            if merged.len() >= self.max_recommendations {
                break;
            }
            if !merged.contains(&recommendation) {
                merged.push(recommendation);
            }
        }
        merged
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(&OrchestrationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(name: &str, confidence: f32, recs: &[&str]) -> AgentResponse {
        AgentResponse::new(name, format!("{} says hi", name), confidence)
            .with_recommendations(recs.iter().copied())
    }

    #[test]
    fn test_empty_is_fallback_prompt() {
        assert_eq!(Synthesizer::default().synthesize(&[]), FALLBACK_PROMPT);
    }

    #[test]
    fn test_single_response_passes_through() {
        let only = AgentResponse::new("A", "exact text\nwith lines", 0.1);
        assert_eq!(
            Synthesizer::default().synthesize(&[only]),
            "exact text\nwith lines"
        );
    }

    #[test]
    fn test_composite_skips_low_confidence() {
        let text = Synthesizer::default().synthesize(&[
            response("High", 0.9, &["keep"]),
            response("Edge", 0.7, &["dropped"]),
        ]);

        assert!(text.starts_with(COMPOSITE_HEADER));
        assert!(text.contains("**High**: High says hi"));
        assert!(!text.contains("Edge"));
        assert!(!text.contains("dropped"));
        assert!(text.ends_with("**Key Recommendations:**\n• keep\n"));
    }

    #[test]
    fn test_recommendations_deduplicated_and_capped() {
        let text = Synthesizer::default().synthesize(&[
            response("A", 0.9, &["one", "two", "three"]),
            response("B", 0.95, &["two", "four"]),
            response("C", 0.85, &["five", "six"]),
        ]);

        let bullets: Vec<&str> = text
            .lines()
            .filter_map(|l| l.strip_prefix("• "))
            .collect();
        assert_eq!(bullets, vec!["one", "two", "four", "five"]);
    }

    #[test]
    fn test_composite_without_recommendations_has_no_section() {
        let text = Synthesizer::default().synthesize(&[
            response("A", 0.9, &[]),
            response("B", 0.9, &[]),
        ]);
        assert!(!text.contains("Key Recommendations"));
    }
}
