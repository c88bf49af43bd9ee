//! Appointment coordination agent

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tokio_util::sync::CancellationToken;

use super::{context_value, CareAgent, Narrator};
use crate::agents::domain::{AgentKind, AgentResponse};
use crate::agents::error::AgentResult;
use crate::domain::Appointment;
use crate::persistence::SharedCareStore;

const SYSTEM_PROMPT: &str = "You are an Appointment Coordination Agent in a healthcare coordination system. \
Your role is to help patients manage appointments across multiple specialists, \
prepare for visits, and optimize their healthcare schedule.\n\n\
Provide practical scheduling advice and help patients prepare questions for their doctors. \
Consider travel time, telehealth options, and appointment grouping opportunities.";

const APPOINTMENT_CONFIDENCE: f32 = 0.85;
const MAX_PREPARATION_TIPS: usize = 2;

#[derive(Debug, Serialize)]
struct AppointmentContext {
    appointments: Vec<Appointment>,
    upcoming_count: usize,
    specialties: BTreeSet<String>,
}

impl AppointmentContext {
    fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            upcoming_count: appointments.len(),
            specialties: appointments.iter().map(|a| a.specialty.clone()).collect(),
            appointments,
        }
    }

    fn demo_text(&self) -> String {
        if self.appointments.is_empty() {
            return "I help coordinate your appointments across all your specialists to minimize travel and ensure comprehensive care.".to_string();
        }
        format!(
            "You have {} upcoming appointments. I can help you prepare for each visit and ensure your doctors have the information they need.",
            self.upcoming_count
        )
    }
}

fn preparation_tip(appointment: &Appointment) -> String {
    format!(
        "Prepare questions for {} appointment on {}",
        appointment.specialty,
        appointment.appointment_date.format("%B %d")
    )
}

/// Helps the patient prepare for upcoming visits
pub struct AppointmentAgent {
    store: SharedCareStore,
    narrator: Narrator,
}

impl AppointmentAgent {
    pub fn new(store: SharedCareStore, narrator: Narrator) -> Self {
        Self { store, narrator }
    }
}

#[async_trait]
impl CareAgent for AppointmentAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Appointment
    }

    async fn process(
        &self,
        patient_id: &str,
        message: &str,
        context: Option<&Value>,
        cancel: &CancellationToken,
    ) -> AgentResult<AgentResponse> {
        let now = Utc::now();
        let upcoming: Vec<Appointment> = self
            .store
            .appointments_for(patient_id)
            .await?
            .into_iter()
            .filter(|a| a.is_upcoming(now))
            .collect();

        // Store order, not date order
        let recommendations: Vec<String> = upcoming
            .iter()
            .take(MAX_PREPARATION_TIPS)
            .map(preparation_tip)
            .collect();

        let snapshot = AppointmentContext::new(upcoming);
        let payload = context_value(&snapshot, context)?;

        let text = self
            .narrator
            .narrate(self.kind(), SYSTEM_PROMPT, message, &payload, cancel, || {
                snapshot.demo_text()
            })
            .await?;

        Ok(AgentResponse::new(self.name(), text, APPOINTMENT_CONFIDENCE)
            .with_actions([
                "Reviewed appointment schedule",
                "Analyzed coordination opportunities",
            ])
            .with_recommendations(recommendations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::demo::{self, DEMO_PATIENT_ID};
    use crate::persistence::InMemoryCareStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_upcoming_only_and_capped_at_two() {
        let now = Utc::now();
        let data = demo::dataset(now);
        let expected = vec![
            preparation_tip(&data.appointments[0]),
            preparation_tip(&data.appointments[1]),
        ];

        let store = Arc::new(InMemoryCareStore::from_dataset(data));
        let agent = AppointmentAgent::new(store, Narrator::demo());

        let response = agent
            .process(DEMO_PATIENT_ID, "When is my next visit?", None, &CancellationToken::new())
            .await
            .unwrap();

        assert!(response.response.starts_with("You have 3 upcoming appointments."));
        assert_eq!(response.recommendations, expected);
        assert!(response.recommendations[0].starts_with("Prepare questions for Endocrinology appointment on "));
        assert_eq!(response.confidence, 0.85);
    }

    #[tokio::test]
    async fn test_no_appointments() {
        let agent = AppointmentAgent::new(Arc::new(InMemoryCareStore::new()), Narrator::demo());
        let response = agent
            .process("nobody", "schedule", None, &CancellationToken::new())
            .await
            .unwrap();

        assert!(response.recommendations.is_empty());
        assert!(response.response.starts_with("I help coordinate your appointments"));
    }
}
