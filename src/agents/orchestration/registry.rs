//! Fixed registry of the four specialist agents

use std::sync::Arc;

use crate::agents::config::RouterConfig;
use crate::agents::core::{
    AppointmentAgent, CareAgent, CareGapAgent, HistoryAgent, MedicationAgent, Narrator,
};
use crate::agents::domain::{AgentInfo, AgentKind};
use crate::persistence::SharedCareStore;

/// One slot per [`AgentKind`]; never discovered dynamically
#[derive(Clone)]
pub struct AgentRegistry {
    history: Arc<dyn CareAgent>,
    medication: Arc<dyn CareAgent>,
    care_gap: Arc<dyn CareAgent>,
    appointment: Arc<dyn CareAgent>,
    completion_configured: bool,
}

impl AgentRegistry {
    /// The standard agents sharing one store handle and one narrator
    pub fn standard(store: SharedCareStore, narrator: Narrator, router: &RouterConfig) -> Self {
        Self {
            history: Arc::new(HistoryAgent::new(store.clone(), narrator.clone())),
            medication: Arc::new(MedicationAgent::with_keywords(
                store.clone(),
                narrator.clone(),
                router.medication.clone(),
            )),
            care_gap: Arc::new(CareGapAgent::new(store.clone(), narrator.clone())),
            appointment: Arc::new(AppointmentAgent::new(store, narrator.clone())),
            completion_configured: narrator.is_configured(),
        }
    }

    /// Replace the slot matching `agent.kind()`
    pub fn with_agent(mut self, agent: Arc<dyn CareAgent>) -> Self {
        match agent.kind() {
            AgentKind::History => self.history = agent,
            AgentKind::Medication => self.medication = agent,
            AgentKind::CareGap => self.care_gap = agent,
            AgentKind::Appointment => self.appointment = agent,
        }
        self
    }

    pub fn get(&self, kind: AgentKind) -> Arc<dyn CareAgent> {
        match kind {
            AgentKind::History => self.history.clone(),
            AgentKind::Medication => self.medication.clone(),
            AgentKind::CareGap => self.care_gap.clone(),
            AgentKind::Appointment => self.appointment.clone(),
        }
    }

    /// Roster in dispatch order
    pub fn roster(&self) -> Vec<AgentInfo> {
        AgentKind::ALL.into_iter().map(AgentInfo::from).collect()
    }

    /// Whether the agents narrate through a completion service
    pub fn completion_configured(&self) -> bool {
        self.completion_configured
    }
}
