//! Patient history agent

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{context_value, CareAgent, Narrator};
use crate::agents::domain::{AgentKind, AgentResponse};
use crate::agents::error::AgentResult;
use crate::domain::Patient;
use crate::persistence::SharedCareStore;

const SYSTEM_PROMPT: &str = "You are a Patient History Agent in a healthcare coordination system. \
Your role is to analyze and summarize patient medical history, identifying key patterns, \
relationships between conditions, and important historical events.\n\n\
Be empathetic, clear, and focus on helping the patient understand their health journey. \
Always emphasize the importance of coordinated care across specialists.";

const NOT_FOUND_RESPONSE: &str = "Patient not found in the system.";
const HISTORY_CONFIDENCE: f32 = 0.9;

#[derive(Debug, Serialize)]
struct HistoryContext {
    patient: Patient,
    conditions: Vec<String>,
    allergies: Vec<String>,
    demographics: String,
}

impl HistoryContext {
    fn new(patient: Patient) -> Self {
        let demographics = format!(
            "{}, {}-year-old {}",
            patient.full_name(),
            patient.age_on(Utc::now().date_naive()),
            patient.gender
        );
        Self {
            conditions: patient.conditions.clone(),
            allergies: patient.allergies.clone(),
            demographics,
            patient,
        }
    }

    fn demo_text(&self) -> String {
        if self.conditions.is_empty() {
            return "I can help you understand your complete medical history and how your conditions relate to each other.".to_string();
        }
        let conditions: Vec<&str> = self.conditions.iter().take(3).map(String::as_str).collect();
        format!(
            "Based on the patient's history, they are managing {}. Their care involves multiple specialists coordinating treatment across these conditions.",
            conditions.join(", ")
        )
    }
}

/// Summarizes conditions and how they relate
pub struct HistoryAgent {
    store: SharedCareStore,
    narrator: Narrator,
}

impl HistoryAgent {
    pub fn new(store: SharedCareStore, narrator: Narrator) -> Self {
        Self { store, narrator }
    }
}

#[async_trait]
impl CareAgent for HistoryAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::History
    }

    async fn process(
        &self,
        patient_id: &str,
        message: &str,
        context: Option<&Value>,
        cancel: &CancellationToken,
    ) -> AgentResult<AgentResponse> {
        let Some(patient) = self.store.get_patient(patient_id).await? else {
            return Ok(AgentResponse::new(self.name(), NOT_FOUND_RESPONSE, 0.0));
        };

        let snapshot = HistoryContext::new(patient);
        let payload = context_value(&snapshot, context)?;

        let text = self
            .narrator
            .narrate(self.kind(), SYSTEM_PROMPT, message, &payload, cancel, || {
                snapshot.demo_text()
            })
            .await?;

        Ok(AgentResponse::new(self.name(), text, HISTORY_CONFIDENCE)
            .with_actions(["Analyzed patient history", "Reviewed condition relationships"])
            .with_recommendations(["Continue coordinating care across all specialists"]))
    }
}
