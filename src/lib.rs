//! # CareOrbit - multi-agent care coordination
//!
//! CareOrbit answers patient questions by routing each message to a set of
//! specialist agents (history, medication, care gaps, appointments), running
//! them concurrently and merging their answers into one reply.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use careorbit::agents::core::Narrator;
//! use careorbit::agents::{OrchestrationConfig, Orchestrator, RouterConfig};
//! use careorbit::persistence::{demo::DEMO_PATIENT_ID, InMemoryCareStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(InMemoryCareStore::with_demo_data());
//!     let orchestrator = Orchestrator::new(
//!         store,
//!         Narrator::demo(),
//!         &OrchestrationConfig::default(),
//!         &RouterConfig::default(),
//!     );
//!
//!     let result = orchestrator
//!         .process_message(DEMO_PATIENT_ID, "Do I have any overdue screenings?")
//!         .await?;
//!     println!("{}", result.primary_response);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: Patient, medication, appointment and care gap records
//! - **Persistence**: Care record store port and in-memory adapter
//! - **Agents**: Specialist agents, completion providers, orchestration
//! - **Adapters**: REST handlers
//! - **Config**: Configuration management

pub mod adapters;
pub mod agents;
pub mod cli;
pub mod config;
pub mod domain;
pub mod persistence;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(state: ApiState) -> Router {
    let health_handler = Arc::new(HealthHandler::new(state.orchestrator.clone()));

    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/api/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.agents().await }
            }
        }));

    let api_router = Router::new()
        // Patients
        .route("/patients", get(api_handler::list_patients).post(api_handler::create_patient))
        .route("/patients/:id", get(api_handler::get_patient))
        .route("/patients/:id/summary", get(api_handler::get_health_summary))
        // Clinical records
        .route("/patients/:id/medications", get(api_handler::get_medications))
        .route("/medications", post(api_handler::create_medication))
        .route("/patients/:id/appointments", get(api_handler::get_appointments))
        .route("/appointments", post(api_handler::create_appointment))
        .route("/patients/:id/care-gaps", get(api_handler::get_care_gaps))
        .route("/care-gaps/:id/resolve", patch(api_handler::resolve_care_gap))
        // Chat
        .route("/chat", post(api_handler::chat))
        .route("/patients/:id/chat-history", get(api_handler::get_chat_history))
        .with_state(state);

    health_router.nest("/api", api_router).layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
