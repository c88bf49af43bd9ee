//! Care record persistence
//!
//! The orchestration core only reads from the store; the HTTP layer is the
//! sole writer. Every scan returns records in insertion order.
//!
//! # Architecture
//!
//! - `CareRecordStore`: port used by agents, the orchestrator and handlers
//! - `InMemoryCareStore`: `RwLock`-guarded adapter, optionally seeded with the
//!   demo dataset from [`demo`]

pub mod demo;
pub mod error;
mod in_memory;

pub use error::PersistenceError;
pub use in_memory::InMemoryCareStore;

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    Appointment, CareGap, ChatMessage, Medication, NewAppointment, NewMedication, NewPatient,
    Patient,
};

/// Shared handle to the care record store
pub type SharedCareStore = Arc<dyn CareRecordStore>;

/// Port for patient data access
#[async_trait]
pub trait CareRecordStore: Send + Sync {
    /// Look up a patient by id
    async fn get_patient(&self, patient_id: &str) -> Result<Option<Patient>, PersistenceError>;

    /// All patients in registration order
    async fn list_patients(&self) -> Result<Vec<Patient>, PersistenceError>;

    /// Register a new patient
    async fn create_patient(&self, patient: NewPatient) -> Result<Patient, PersistenceError>;

    /// Every medication recorded for a patient, any status
    async fn medications_for(&self, patient_id: &str) -> Result<Vec<Medication>, PersistenceError>;

    /// Add a prescription
    async fn create_medication(
        &self,
        medication: NewMedication,
    ) -> Result<Medication, PersistenceError>;

    /// Every appointment recorded for a patient, any status
    async fn appointments_for(&self, patient_id: &str)
        -> Result<Vec<Appointment>, PersistenceError>;

    /// Book an appointment
    async fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, PersistenceError>;

    /// Every care gap recorded for a patient, resolved or not
    async fn care_gaps_for(&self, patient_id: &str) -> Result<Vec<CareGap>, PersistenceError>;

    /// Mark a care gap resolved
    async fn resolve_care_gap(&self, gap_id: &str) -> Result<CareGap, PersistenceError>;

    /// Append to a patient's chat transcript
    async fn append_chat(&self, message: ChatMessage) -> Result<(), PersistenceError>;

    /// The most recent `limit` chat messages, oldest first
    async fn chat_history(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, PersistenceError>;

    /// Unresolved gaps in store order
    async fn open_care_gaps(&self, patient_id: &str) -> Result<Vec<CareGap>, PersistenceError> {
        Ok(self
            .care_gaps_for(patient_id)
            .await?
            .into_iter()
            .filter(|g| !g.resolved)
            .collect())
    }

    /// Active medications in store order
    async fn active_medications(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Medication>, PersistenceError> {
        Ok(self
            .medications_for(patient_id)
            .await?
            .into_iter()
            .filter(|m| m.is_active())
            .collect())
    }
}
