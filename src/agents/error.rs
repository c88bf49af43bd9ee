//! Error types for the care agents

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors that can occur during agent operations
#[derive(Debug, Error)]
pub enum AgentError {
    /// Patient id not present in the store
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    /// Data store error
    #[error("Store error: {0}")]
    Store(#[from] PersistenceError),

    /// Completion service error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Agent exceeded its time budget
    #[error("Operation timed out after {0}s")]
    Timeout(u64),

    /// Cancelled by the caller
    #[error("Operation was cancelled")]
    Cancelled,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors specific to completion service calls
#[derive(Debug, Error)]
pub enum LlmError {
    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// API error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else if err.is_connect() {
            LlmError::Network(format!("Connection error: {}", err))
        } else if err.is_decode() {
            LlmError::Parse(err.to_string())
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Internal(format!("Serialization error: {}", err))
    }
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;
