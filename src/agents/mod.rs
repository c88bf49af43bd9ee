//! Care agent system for CareOrbit
//!
//! Four specialist agents answer patient questions from scoped snapshots of
//! the care record, and an orchestrator routes each message, runs the chosen
//! agents concurrently and merges what they return.
//!
//! ## Architecture
//!
//! - `domain/` - Core types (AgentKind, AgentResponse, OrchestrationResult)
//! - `llm/` - Text-completion providers (OpenAI, Azure OpenAI)
//! - `core/` - The four agents and the narrator with its demo fallback
//! - `orchestration/` - Router, synthesizer, registry and orchestrator

pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod llm;
pub mod orchestration;

// Re-export commonly used types
pub use config::*;
pub use domain::*;
pub use error::*;
pub use orchestration::Orchestrator;
