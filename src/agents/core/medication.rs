//! Medication reconciliation agent

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tokio_util::sync::CancellationToken;

use super::{context_value, CareAgent, Narrator};
use crate::agents::config::RouterConfig;
use crate::agents::domain::{AgentKind, AgentResponse};
use crate::agents::error::AgentResult;
use crate::domain::Medication;
use crate::persistence::SharedCareStore;

const SYSTEM_PROMPT: &str = "You are a Medication Reconciliation Agent in a healthcare coordination system. \
Your role is to help patients understand their medications, identify potential interactions, \
and ensure safe management of multiple prescriptions from different specialists.\n\n\
Be clear about medication purposes, timing, and any precautions. \
Always recommend discussing concerns with healthcare providers.";

const MEDICATION_CONFIDENCE: f32 = 0.95;

/// Drug-name pairs and the warning raised when either is on the active list
const INTERACTIONS: &[(&str, &str, &str)] = &[
    (
        "metformin",
        "contrast",
        "Metformin should be held 48 hours before and after IV contrast procedures",
    ),
    (
        "lisinopril",
        "potassium",
        "ACE inhibitors can increase potassium levels - monitor carefully",
    ),
    (
        "carvedilol",
        "metformin",
        "Beta-blockers may mask hypoglycemia symptoms in diabetics",
    ),
    ("sertraline", "nsaids", "SSRIs with NSAIDs increase bleeding risk"),
    (
        "furosemide",
        "lisinopril",
        "Both affect blood pressure - monitor for hypotension",
    ),
];

const BETA_BLOCKERS: &[&str] = &[
    "carvedilol",
    "metoprolol",
    "atenolol",
    "bisoprolol",
    "propranolol",
    "nebivolol",
];

const BIGUANIDES: &[&str] = &["metformin"];

pub const MASKED_HYPOGLYCEMIA_ALERT: &str =
    "⚠️ Carvedilol and other beta-blockers may mask low blood sugar symptoms. Monitor glucose carefully.";

const CONTINUE_REGIMEN: &str = "Continue current medication regimen";

/// Interaction alerts for a set of active medications.
///
/// Names are matched case-insensitively by substring. Each distinct alert
/// appears once, in first-raised order.
pub fn check_interactions(medications: &[Medication]) -> Vec<String> {
    let names: Vec<String> = medications.iter().map(|m| m.name.to_lowercase()).collect();
    let on_list = |drug: &str| names.iter().any(|name| name.contains(drug));

    let mut alerts: Vec<String> = Vec::new();
    let mut push = |alert: &str| {
        if !alerts.iter().any(|a| a == alert) {
            alerts.push(alert.to_string());
        }
    };

    for &(first, second, warning) in INTERACTIONS {
        if on_list(first) || on_list(second) {
            push(warning);
        }
    }

    let beta_blocker = BETA_BLOCKERS.iter().copied().any(|d| on_list(d));
    let biguanide = BIGUANIDES.iter().copied().any(|d| on_list(d));
    if beta_blocker && biguanide {
        push(MASKED_HYPOGLYCEMIA_ALERT);
    }

    alerts
}

#[derive(Debug, Serialize)]
struct MedicationContext {
    medications: Vec<Medication>,
    total_medications: usize,
    specialists_prescribing: BTreeSet<String>,
}

impl MedicationContext {
    fn new(medications: Vec<Medication>) -> Self {
        Self {
            total_medications: medications.len(),
            specialists_prescribing: medications.iter().map(|m| m.specialty.clone()).collect(),
            medications,
        }
    }

    fn demo_text(&self) -> String {
        if self.medications.is_empty() {
            return "I help manage your medications and check for potential interactions between drugs from different doctors.".to_string();
        }
        format!(
            "You are currently taking {} active medications from multiple specialists. I'm monitoring for interactions and will alert you to any concerns.",
            self.total_medications
        )
    }
}

/// Reviews active medications and flags interactions
pub struct MedicationAgent {
    store: SharedCareStore,
    narrator: Narrator,
    keywords: Vec<String>,
}

impl MedicationAgent {
    pub fn new(store: SharedCareStore, narrator: Narrator) -> Self {
        Self::with_keywords(store, narrator, RouterConfig::default().medication)
    }

    /// Alerts are appended to the narrative only when the message hits one of
    /// `keywords`
    pub fn with_keywords(store: SharedCareStore, narrator: Narrator, keywords: Vec<String>) -> Self {
        let keywords = keywords.into_iter().map(|k| k.to_lowercase()).collect();
        Self {
            store,
            narrator,
            keywords,
        }
    }

    fn mentions_medication(&self, message: &str) -> bool {
        let message = message.to_lowercase();
        self.keywords.iter().any(|k| message.contains(k.as_str()))
    }
}

#[async_trait]
impl CareAgent for MedicationAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Medication
    }

    async fn process(
        &self,
        patient_id: &str,
        message: &str,
        context: Option<&Value>,
        cancel: &CancellationToken,
    ) -> AgentResult<AgentResponse> {
        let active = self.store.active_medications(patient_id).await?;
        let alerts = check_interactions(&active);

        let snapshot = MedicationContext::new(active);
        let payload = context_value(&snapshot, context)?;

        let mut text = self
            .narrator
            .narrate(self.kind(), SYSTEM_PROMPT, message, &payload, cancel, || {
                snapshot.demo_text()
            })
            .await?;

        if !alerts.is_empty() && self.mentions_medication(message) {
            text.push_str("\n\n⚠️ **Important Alerts:**\n");
            let lines: Vec<String> = alerts.iter().map(|a| format!("• {}", a)).collect();
            text.push_str(&lines.join("\n"));
        }

        let recommendations = if alerts.is_empty() {
            vec![CONTINUE_REGIMEN.to_string()]
        } else {
            alerts
        };

        Ok(AgentResponse::new(self.name(), text, MEDICATION_CONFIDENCE)
            .with_actions(["Reviewed medication list", "Checked drug interactions"])
            .with_recommendations(recommendations))
    }
}
