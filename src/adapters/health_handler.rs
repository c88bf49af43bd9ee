use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::agents::domain::AgentInfo;
use crate::agents::Orchestrator;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AgentHealth {
    pub status: String,
    pub agents: Vec<AgentInfo>,
    /// `configured` or `demo_mode`
    pub completion_service: String,
}

pub struct HealthHandler {
    orchestrator: Arc<Orchestrator>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        };

        (StatusCode::OK, Json(status))
    }

    /// Agent roster and whether narratives come from the completion service
    pub async fn agents(&self) -> impl IntoResponse {
        let completion_service = if self.orchestrator.completion_configured() {
            "configured"
        } else {
            "demo_mode"
        };

        let health = AgentHealth {
            status: "healthy".to_string(),
            agents: self.orchestrator.agents(),
            completion_service: completion_service.to_string(),
        };

        (StatusCode::OK, Json(health))
    }
}
