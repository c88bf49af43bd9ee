//! Domain types for the care agents
//!
//! Core abstractions shared by agents, the orchestrator and the HTTP layer.

mod agent;
mod message;
mod response;

pub use agent::*;
pub use message::*;
pub use response::*;
