//! In-memory care record store

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::demo::{self, DemoDataset};
use super::{CareRecordStore, PersistenceError};
use crate::domain::{
    Appointment, CareGap, ChatMessage, Medication, NewAppointment, NewMedication, NewPatient,
    Patient,
};

#[derive(Default)]
struct Records {
    patients: Vec<Patient>,
    medications: Vec<Medication>,
    appointments: Vec<Appointment>,
    care_gaps: Vec<CareGap>,
    chat: Vec<ChatMessage>,
}

/// In-memory care record store
///
/// Reads take a shared lock, so all agents in an orchestration round scan
/// concurrently. Writes are serialized by the lock.
#[derive(Default)]
pub struct InMemoryCareStore {
    records: RwLock<Records>,
}

impl InMemoryCareStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given dataset
    pub fn from_dataset(data: DemoDataset) -> Self {
        Self {
            records: RwLock::new(Records {
                patients: data.patients,
                medications: data.medications,
                appointments: data.appointments,
                care_gaps: data.care_gaps,
                chat: Vec::new(),
            }),
        }
    }

    /// Create a store seeded with the demo patient
    pub fn with_demo_data() -> Self {
        Self::from_dataset(demo::dataset(Utc::now()))
    }

    /// Record counts as (patients, medications, appointments, care gaps)
    pub async fn counts(&self) -> (usize, usize, usize, usize) {
        let records = self.records.read().await;
        (
            records.patients.len(),
            records.medications.len(),
            records.appointments.len(),
            records.care_gaps.len(),
        )
    }
}

#[async_trait]
impl CareRecordStore for InMemoryCareStore {
    async fn get_patient(&self, patient_id: &str) -> Result<Option<Patient>, PersistenceError> {
        let records = self.records.read().await;
        Ok(records.patients.iter().find(|p| p.id == patient_id).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, PersistenceError> {
        Ok(self.records.read().await.patients.clone())
    }

    async fn create_patient(&self, patient: NewPatient) -> Result<Patient, PersistenceError> {
        let patient = Patient::from(patient);
        self.records.write().await.patients.push(patient.clone());
        Ok(patient)
    }

    async fn medications_for(&self, patient_id: &str) -> Result<Vec<Medication>, PersistenceError> {
        let records = self.records.read().await;
        Ok(records
            .medications
            .iter()
            .filter(|m| m.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn create_medication(
        &self,
        medication: NewMedication,
    ) -> Result<Medication, PersistenceError> {
        let mut records = self.records.write().await;
        if !records.patients.iter().any(|p| p.id == medication.patient_id) {
            return Err(PersistenceError::not_found("patient", medication.patient_id));
        }
        let medication = Medication::from(medication);
        records.medications.push(medication.clone());
        Ok(medication)
    }

    async fn appointments_for(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Appointment>, PersistenceError> {
        let records = self.records.read().await;
        Ok(records
            .appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, PersistenceError> {
        let mut records = self.records.write().await;
        if !records.patients.iter().any(|p| p.id == appointment.patient_id) {
            return Err(PersistenceError::not_found("patient", appointment.patient_id));
        }
        let appointment = Appointment::from(appointment);
        records.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn care_gaps_for(&self, patient_id: &str) -> Result<Vec<CareGap>, PersistenceError> {
        let records = self.records.read().await;
        Ok(records
            .care_gaps
            .iter()
            .filter(|g| g.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn resolve_care_gap(&self, gap_id: &str) -> Result<CareGap, PersistenceError> {
        let mut records = self.records.write().await;
        let gap = records
            .care_gaps
            .iter_mut()
            .find(|g| g.id == gap_id)
            .ok_or_else(|| PersistenceError::not_found("care gap", gap_id))?;

        gap.resolved = true;
        gap.resolved_at = Some(Utc::now());
        Ok(gap.clone())
    }

    async fn append_chat(&self, message: ChatMessage) -> Result<(), PersistenceError> {
        self.records.write().await.chat.push(message);
        Ok(())
    }

    async fn chat_history(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, PersistenceError> {
        let records = self.records.read().await;
        let history: Vec<&ChatMessage> = records
            .chat
            .iter()
            .filter(|m| m.patient_id == patient_id)
            .collect();
        let skip = history.len().saturating_sub(limit);
        Ok(history.into_iter().skip(skip).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatRole;
    use crate::persistence::demo::DEMO_PATIENT_ID;

    #[tokio::test]
    async fn test_demo_scans_preserve_insertion_order() {
        let store = InMemoryCareStore::with_demo_data();

        let meds = store.medications_for(DEMO_PATIENT_ID).await.unwrap();
        let names: Vec<&str> = meds.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Metformin", "Lisinopril", "Carvedilol", "Sertraline", "Furosemide"]);

        let gaps = store.open_care_gaps(DEMO_PATIENT_ID).await.unwrap();
        let ids: Vec<&str> = gaps.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["gap-001", "gap-002", "gap-003", "gap-004"]);
    }

    #[tokio::test]
    async fn test_unknown_patient_scans_are_empty() {
        let store = InMemoryCareStore::with_demo_data();
        assert!(store.get_patient("nobody").await.unwrap().is_none());
        assert!(store.medications_for("nobody").await.unwrap().is_empty());
        assert!(store.care_gaps_for("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_care_gap() {
        let store = InMemoryCareStore::with_demo_data();

        let gap = store.resolve_care_gap("gap-002").await.unwrap();
        assert!(gap.resolved);
        assert!(gap.resolved_at.is_some());

        let open = store.open_care_gaps(DEMO_PATIENT_ID).await.unwrap();
        assert_eq!(open.len(), 3);
        assert!(open.iter().all(|g| g.id != "gap-002"));

        let err = store.resolve_care_gap("gap-999").await.unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_medication_requires_known_patient() {
        let store = InMemoryCareStore::new();
        let result = store
            .create_medication(NewMedication {
                patient_id: "ghost".to_string(),
                name: "Aspirin".to_string(),
                dosage: "81mg".to_string(),
                frequency: "Daily".to_string(),
                prescriber: "Dr. A".to_string(),
                specialty: "Cardiology".to_string(),
                start_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                instructions: None,
            })
            .await;
        assert!(matches!(result, Err(PersistenceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_chat_history_keeps_most_recent() {
        let store = InMemoryCareStore::with_demo_data();
        for i in 0..5 {
            store
                .append_chat(ChatMessage::new(DEMO_PATIENT_ID, ChatRole::User, format!("msg {}", i)))
                .await
                .unwrap();
        }
        store
            .append_chat(ChatMessage::new("other", ChatRole::User, "elsewhere"))
            .await
            .unwrap();

        let history = store.chat_history(DEMO_PATIENT_ID, 2).await.unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["msg 3", "msg 4"]);
    }
}
