//! Specialist care agents
//!
//! Each agent reads a scoped, read-only snapshot of patient data, asks the
//! [`Narrator`] for narrative text and returns a structured
//! [`AgentResponse`](crate::agents::domain::AgentResponse):
//! - HistoryAgent: conditions, allergies, demographics
//! - MedicationAgent: active medications and interaction alerts
//! - CareGapAgent: unresolved guideline gaps
//! - AppointmentAgent: upcoming scheduled visits

mod appointment;
mod care_gap;
mod history;
mod medication;
mod narrator;

pub use appointment::AppointmentAgent;
pub use care_gap::CareGapAgent;
pub use history::HistoryAgent;
pub use medication::{check_interactions, MedicationAgent};
pub use narrator::Narrator;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::agents::domain::{AgentKind, AgentResponse};
use crate::agents::error::AgentResult;

/// Trait for the specialist agents
#[async_trait]
pub trait CareAgent: Send + Sync {
    /// Which slot of the registry this agent fills
    fn kind(&self) -> AgentKind;

    /// Display name used in responses
    fn name(&self) -> &str {
        self.kind().display_name()
    }

    /// Answer `message` for `patient_id`.
    ///
    /// `context` carries optional caller-supplied hints that are forwarded to
    /// the completion service. `cancel` is honored at the completion call.
    async fn process(
        &self,
        patient_id: &str,
        message: &str,
        context: Option<&Value>,
        cancel: &CancellationToken,
    ) -> AgentResult<AgentResponse>;
}

/// Serialize an agent's scoped snapshot, attaching caller hints if present
pub(crate) fn context_value<T: Serialize>(
    snapshot: &T,
    caller_context: Option<&Value>,
) -> AgentResult<Value> {
    let mut value = serde_json::to_value(snapshot)?;
    if let (Some(caller), Value::Object(map)) = (caller_context, &mut value) {
        map.insert("caller_context".to_string(), caller.clone());
    }
    Ok(value)
}
