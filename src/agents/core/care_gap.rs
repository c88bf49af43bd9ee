//! Care gap detection agent

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{context_value, CareAgent, Narrator};
use crate::agents::domain::{AgentKind, AgentResponse};
use crate::agents::error::AgentResult;
use crate::domain::CareGap;
use crate::persistence::SharedCareStore;

const SYSTEM_PROMPT: &str = "You are a Care Gap Detection Agent in a healthcare coordination system. \
Your role is to identify gaps in care based on clinical guidelines and help patients \
understand what preventive care and screenings they need.\n\n\
Prioritize high-severity gaps and provide clear, actionable recommendations. \
Be supportive and help patients feel empowered to address these gaps.";

const CARE_GAP_CONFIDENCE: f32 = 0.9;
const MAX_GAP_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Serialize)]
struct CareGapContext {
    care_gaps: Vec<CareGap>,
    total_gaps: usize,
    high_priority_count: usize,
}

impl CareGapContext {
    fn new(care_gaps: Vec<CareGap>) -> Self {
        Self {
            total_gaps: care_gaps.len(),
            high_priority_count: care_gaps
                .iter()
                .filter(|g| g.severity.is_high_priority())
                .count(),
            care_gaps,
        }
    }

    fn demo_text(&self) -> String {
        if self.care_gaps.is_empty() {
            return "I monitor your care against clinical guidelines to ensure you're receiving all recommended screenings and preventive care.".to_string();
        }
        format!(
            "I've identified {} care gaps, with {} requiring prompt attention. Let me help you prioritize these.",
            self.total_gaps, self.high_priority_count
        )
    }
}

/// Reports unresolved guideline gaps
pub struct CareGapAgent {
    store: SharedCareStore,
    narrator: Narrator,
}

impl CareGapAgent {
    pub fn new(store: SharedCareStore, narrator: Narrator) -> Self {
        Self { store, narrator }
    }
}

#[async_trait]
impl CareAgent for CareGapAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::CareGap
    }

    async fn process(
        &self,
        patient_id: &str,
        message: &str,
        context: Option<&Value>,
        cancel: &CancellationToken,
    ) -> AgentResult<AgentResponse> {
        let open = self.store.open_care_gaps(patient_id).await?;

        // Store order, not severity order
        let recommendations: Vec<String> = open
            .iter()
            .take(MAX_GAP_RECOMMENDATIONS)
            .map(|g| g.recommended_action.clone())
            .collect();

        let snapshot = CareGapContext::new(open);
        let payload = context_value(&snapshot, context)?;

        let text = self
            .narrator
            .narrate(self.kind(), SYSTEM_PROMPT, message, &payload, cancel, || {
                snapshot.demo_text()
            })
            .await?;

        Ok(AgentResponse::new(self.name(), text, CARE_GAP_CONFIDENCE)
            .with_actions(["Reviewed clinical guidelines", "Identified care gaps"])
            .with_recommendations(recommendations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::demo::DEMO_PATIENT_ID;
    use crate::persistence::{CareRecordStore, InMemoryCareStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_demo_gaps_counted_and_capped() {
        let store = Arc::new(InMemoryCareStore::with_demo_data());
        let agent = CareGapAgent::new(store, Narrator::demo());

        let response = agent
            .process(DEMO_PATIENT_ID, "Any overdue screenings?", None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            response.response,
            "I've identified 4 care gaps, with 2 requiring prompt attention. Let me help you prioritize these."
        );
        assert_eq!(
            response.recommendations,
            vec![
                "Schedule dilated eye exam with ophthalmologist within 30 days",
                "Request foot exam at next endocrinology appointment",
                "Complete PHQ-9 questionnaire before next psychiatry visit",
            ]
        );
        assert_eq!(response.confidence, 0.9);
    }

    #[tokio::test]
    async fn test_resolved_gaps_are_skipped() {
        let store = Arc::new(InMemoryCareStore::with_demo_data());
        store.resolve_care_gap("gap-001").await.unwrap();
        store.resolve_care_gap("gap-004").await.unwrap();

        let agent = CareGapAgent::new(store, Narrator::demo());
        let response = agent
            .process(DEMO_PATIENT_ID, "gaps", None, &CancellationToken::new())
            .await
            .unwrap();

        assert!(response.response.contains("2 care gaps, with 0 requiring"));
        assert_eq!(response.recommendations.len(), 2);
    }
}
