//! Multi-agent orchestration
//!
//! One user message runs through a fixed pipeline:
//! - Routing: keyword match picks the agents
//! - Dispatching: each selected agent runs as its own task
//! - Collecting: results are joined in launch order, failures dropped
//! - Synthesizing: responses merge into one reply
//! - Done: care gap, medication and appointment signals are attached

mod registry;
mod router;
mod synthesizer;

pub use registry::AgentRegistry;
pub use router::KeywordRouter;
pub use synthesizer::{Synthesizer, FALLBACK_PROMPT};

use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::agents::config::{OrchestrationConfig, RouterConfig};
use crate::agents::core::Narrator;
use crate::agents::domain::{AgentInfo, AgentKind, AgentResponse, OrchestrationResult};
use crate::agents::error::{AgentError, AgentResult};
use crate::domain::CareGap;
use crate::persistence::SharedCareStore;

const MAX_CARE_GAPS_DETECTED: usize = 3;
const MAX_APPOINTMENT_SUGGESTIONS: usize = 2;
const WARNING_GLYPH: &str = "⚠";

/// Pipeline phases, logged as they are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Routing,
    Dispatching,
    Collecting,
    Synthesizing,
    Done,
}

fn enter(phase: &mut Phase, next: Phase, patient_id: &str) {
    debug!(patient_id, from = ?phase, to = ?next, "Orchestration phase");
    *phase = next;
}

/// Routes a message to agents, runs them concurrently and merges the results
pub struct Orchestrator {
    store: SharedCareStore,
    registry: AgentRegistry,
    router: KeywordRouter,
    synthesizer: Synthesizer,
    agent_timeout: Duration,
}

impl Orchestrator {
    /// Standard agents over `store`
    pub fn new(
        store: SharedCareStore,
        narrator: Narrator,
        orchestration: &OrchestrationConfig,
        router: &RouterConfig,
    ) -> Self {
        let registry = AgentRegistry::standard(store.clone(), narrator, router);
        Self::with_registry(store, registry, orchestration, router)
    }

    /// Custom agent registry
    pub fn with_registry(
        store: SharedCareStore,
        registry: AgentRegistry,
        orchestration: &OrchestrationConfig,
        router: &RouterConfig,
    ) -> Self {
        Self {
            store,
            registry,
            router: KeywordRouter::new(router),
            synthesizer: Synthesizer::new(orchestration),
            agent_timeout: Duration::from_secs(orchestration.agent_timeout_seconds),
        }
    }

    /// Override the per-agent time budget
    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    pub fn agents(&self) -> Vec<AgentInfo> {
        self.registry.roster()
    }

    pub fn completion_configured(&self) -> bool {
        self.registry.completion_configured()
    }

    pub fn router(&self) -> &KeywordRouter {
        &self.router
    }

    /// Answer one message for one patient
    pub async fn process_message(
        &self,
        patient_id: &str,
        message: &str,
    ) -> AgentResult<OrchestrationResult> {
        self.process_message_with(patient_id, message, None, &CancellationToken::new())
            .await
    }

    /// Answer one message with optional caller hints.
    ///
    /// Cancelling `cancel`, or dropping the returned future, cancels every
    /// in-flight agent. Only an unknown patient is an error.
    pub async fn process_message_with(
        &self,
        patient_id: &str,
        message: &str,
        context: Option<Value>,
        cancel: &CancellationToken,
    ) -> AgentResult<OrchestrationResult> {
        let mut phase = Phase::Idle;

        if self.store.get_patient(patient_id).await?.is_none() {
            return Err(AgentError::PatientNotFound(patient_id.to_string()));
        }

        enter(&mut phase, Phase::Routing, patient_id);
        let mut selected = self.router.select(message);
        if selected.is_empty() {
            selected = AgentKind::ALL.into_iter().collect();
        }

        enter(&mut phase, Phase::Dispatching, patient_id);
        let token = cancel.child_token();
        let _cancel_on_drop = token.clone().drop_guard();
        let handles = self.dispatch(&selected, patient_id, message, context, &token);

        enter(&mut phase, Phase::Collecting, patient_id);
        let collected = Self::collect(handles).await;

        enter(&mut phase, Phase::Synthesizing, patient_id);
        let contributions: Vec<AgentResponse> =
            collected.iter().map(|(_, r)| r.clone()).collect();
        let primary_response = self.synthesizer.synthesize(&contributions);

        enter(&mut phase, Phase::Done, patient_id);
        let care_gaps_detected = self.care_gaps_detected(patient_id).await;
        let medication_alerts = medication_alerts(&collected);
        let appointment_suggestions = appointment_suggestions(&collected);

        info!(
            patient_id,
            selected = selected.len(),
            contributed = contributions.len(),
            "Processed message"
        );

        Ok(OrchestrationResult {
            primary_response,
            agent_contributions: contributions,
            care_gaps_detected,
            medication_alerts,
            appointment_suggestions,
        })
    }

    fn dispatch(
        &self,
        selected: &BTreeSet<AgentKind>,
        patient_id: &str,
        message: &str,
        context: Option<Value>,
        token: &CancellationToken,
    ) -> Vec<(AgentKind, JoinHandle<AgentResult<AgentResponse>>)> {
        let context = context.map(Arc::new);

        // BTreeSet iteration follows AgentKind order, which is dispatch order
        selected
            .iter()
            .map(|&kind| {
                let agent = self.registry.get(kind);
                let patient_id = patient_id.to_string();
                let message = message.to_string();
                let context = context.clone();
                let token = token.clone();
                let budget = self.agent_timeout;

                let handle = tokio::spawn(async move {
                    let call = agent.process(&patient_id, &message, context.as_deref(), &token);
                    match tokio::time::timeout(budget, call).await {
                        Ok(result) => result,
                        Err(_) => Err(AgentError::Timeout(budget.as_secs())),
                    }
                });
                (kind, handle)
            })
            .collect()
    }

    async fn collect(
        handles: Vec<(AgentKind, JoinHandle<AgentResult<AgentResponse>>)>,
    ) -> Vec<(AgentKind, AgentResponse)> {
        let mut collected = Vec::with_capacity(handles.len());
        for (kind, handle) in handles {
            match handle.await {
                Ok(Ok(response)) => collected.push((kind, response)),
                Ok(Err(e)) => warn!(agent = %kind, "Agent dropped from result: {}", e),
                Err(e) => warn!(agent = %kind, "Agent task failed: {}", e),
            }
        }
        collected
    }

    async fn care_gaps_detected(&self, patient_id: &str) -> Vec<CareGap> {
        match self.store.open_care_gaps(patient_id).await {
            Ok(gaps) => gaps.into_iter().take(MAX_CARE_GAPS_DETECTED).collect(),
            Err(e) => {
                warn!(patient_id, "Could not read care gaps: {}", e);
                Vec::new()
            }
        }
    }
}

fn response_of(collected: &[(AgentKind, AgentResponse)], kind: AgentKind) -> Option<&AgentResponse> {
    collected
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, response)| response)
}

/// Medication recommendations that read as warnings
fn medication_alerts(collected: &[(AgentKind, AgentResponse)]) -> Vec<String> {
    response_of(collected, AgentKind::Medication)
        .map(|response| {
            response
                .recommendations
                .iter()
                .filter(|r| r.contains(WARNING_GLYPH) || r.to_lowercase().contains("alert"))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Only the first appointment recommendation is taken
fn appointment_suggestions(collected: &[(AgentKind, AgentResponse)]) -> Vec<String> {
    response_of(collected, AgentKind::Appointment)
        .and_then(|response| response.recommendations.first())
        .into_iter()
        .take(MAX_APPOINTMENT_SUGGESTIONS)
        .cloned()
        .collect()
}
