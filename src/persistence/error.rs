//! Persistence layer error types

use thiserror::Error;

/// Errors that can occur in the care record store
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Item not found
    #[error("Item not found: {entity_type} with identifier '{identifier}'")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// Backing store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    pub fn not_found(entity_type: &str, identifier: impl Into<String>) -> Self {
        PersistenceError::NotFound {
            entity_type: entity_type.to_string(),
            identifier: identifier.into(),
        }
    }
}
