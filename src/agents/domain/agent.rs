//! Agent domain types

use serde::{Deserialize, Serialize};

/// The four specialist agents, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Patient history and condition relationships
    History,
    /// Medication reconciliation and interaction checks
    Medication,
    /// Guideline-based care gap detection
    CareGap,
    /// Appointment coordination across specialists
    Appointment,
}

impl AgentKind {
    /// Every kind, in the order agents are invoked and recorded
    pub const ALL: [AgentKind; 4] = [
        AgentKind::History,
        AgentKind::Medication,
        AgentKind::CareGap,
        AgentKind::Appointment,
    ];

    /// Routing key
    pub fn key(self) -> &'static str {
        match self {
            AgentKind::History => "history",
            AgentKind::Medication => "medication",
            AgentKind::CareGap => "care_gap",
            AgentKind::Appointment => "appointment",
        }
    }

    /// Display name used in responses
    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::History => "Patient History Agent",
            AgentKind::Medication => "Medication Reconciliation Agent",
            AgentKind::CareGap => "Care Gap Detection Agent",
            AgentKind::Appointment => "Appointment Coordination Agent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AgentKind::History => {
                "Analyzes and summarizes patient medical history across all providers"
            }
            AgentKind::Medication => {
                "Monitors medications, detects interactions, and ensures safe polypharmacy management"
            }
            AgentKind::CareGap => {
                "Identifies missed preventive care and guideline-recommended screenings"
            }
            AgentKind::Appointment => {
                "Manages and optimizes appointments across multiple healthcare providers"
            }
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Agent information returned from roster/health endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub kind: AgentKind,
    pub name: String,
    pub description: String,
}

impl From<AgentKind> for AgentInfo {
    fn from(kind: AgentKind) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            description: kind.description().to_string(),
        }
    }
}
