//! Record types for patients and their care

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Lifecycle status of a patient record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Active,
    Inactive,
    Deceased,
}

/// Severity of a care gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareGapSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CareGapSeverity {
    /// High and critical gaps need prompt attention
    pub fn is_high_priority(self) -> bool {
        matches!(self, CareGapSeverity::High | CareGapSeverity::Critical)
    }

    /// Sort key, most urgent first
    pub fn urgency_rank(self) -> u8 {
        match self {
            CareGapSeverity::Critical => 0,
            CareGapSeverity::High => 1,
            CareGapSeverity::Medium => 2,
            CareGapSeverity::Low => 3,
        }
    }
}

/// Prescription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MedicationStatus {
    #[default]
    Active,
    Stopped,
    #[serde(rename = "on-hold")]
    OnHold,
    Completed,
}

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    #[serde(rename = "no-show")]
    NoShow,
}

/// A patient and their problem list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub status: PatientStatus,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on the given day
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        today.years_since(self.date_of_birth).unwrap_or(0)
    }
}

/// Payload for registering a patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl From<NewPatient> for Patient {
    fn from(new: NewPatient) -> Self {
        Self {
            id: new_id(),
            first_name: new.first_name,
            last_name: new.last_name,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            email: new.email,
            phone: new.phone,
            address: None,
            emergency_contact: None,
            status: PatientStatus::Active,
            conditions: new.conditions,
            allergies: new.allergies,
            created_at: Utc::now(),
        }
    }
}

/// A prescription on a patient's medication list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub patient_id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescriber: String,
    pub specialty: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: MedicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub interactions: Vec<String>,
    #[serde(default)]
    pub refills_remaining: u32,
}

impl Medication {
    pub fn is_active(&self) -> bool {
        self.status == MedicationStatus::Active
    }
}

/// Payload for adding a prescription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedication {
    pub patient_id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescriber: String,
    pub specialty: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl From<NewMedication> for Medication {
    fn from(new: NewMedication) -> Self {
        Self {
            id: new_id(),
            patient_id: new.patient_id,
            name: new.name,
            dosage: new.dosage,
            frequency: new.frequency,
            prescriber: new.prescriber,
            specialty: new.specialty,
            start_date: new.start_date,
            end_date: None,
            status: MedicationStatus::Active,
            instructions: new.instructions,
            side_effects: Vec::new(),
            interactions: Vec::new(),
            refills_remaining: 0,
        }
    }
}

/// A visit with a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub provider_name: String,
    pub specialty: String,
    pub facility: String,
    pub appointment_date: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub telehealth: bool,
}

fn default_duration() -> u32 {
    30
}

impl Appointment {
    /// Scheduled and strictly in the future
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == AppointmentStatus::Scheduled && self.appointment_date > now
    }
}

/// Payload for booking an appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: String,
    pub provider_name: String,
    pub specialty: String,
    pub facility: String,
    pub appointment_date: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    pub reason: String,
    #[serde(default)]
    pub telehealth: bool,
}

impl From<NewAppointment> for Appointment {
    fn from(new: NewAppointment) -> Self {
        Self {
            id: new_id(),
            patient_id: new.patient_id,
            provider_name: new.provider_name,
            specialty: new.specialty,
            facility: new.facility,
            appointment_date: new.appointment_date,
            duration_minutes: new.duration_minutes,
            status: AppointmentStatus::Scheduled,
            reason: new.reason,
            notes: None,
            telehealth: new.telehealth,
        }
    }
}

/// A documented lapse against a clinical guideline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareGap {
    pub id: String,
    pub patient_id: String,
    pub title: String,
    pub description: String,
    pub severity: CareGapSeverity,
    pub category: String,
    pub guideline_reference: String,
    pub recommended_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub detected_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    Agent,
}

/// One entry in a patient's chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub patient_id: String,
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl ChatMessage {
    pub fn new(patient_id: impl Into<String>, role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            patient_id: patient_id.into(),
            role,
            content: content.into(),
            agent_name: None,
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
