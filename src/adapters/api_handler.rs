//! REST API handlers for patient records and chat
//!
//! The HTTP layer is the only writer to the care record store; the
//! orchestrator behind `/api/chat` only reads.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::agents::domain::OrchestrationResult;
use crate::agents::error::AgentError;
use crate::agents::Orchestrator;
use crate::domain::{
    Appointment, CareGap, ChatMessage, ChatRole, HealthSummary, Medication, NewAppointment,
    NewMedication, NewPatient, Patient,
};
use crate::persistence::{PersistenceError, SharedCareStore};

const DEFAULT_HISTORY_LIMIT: usize = 50;
const ORCHESTRATOR_NAME: &str = "CareOrbit Orchestrator";

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub store: SharedCareStore,
    pub orchestrator: Arc<Orchestrator>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler failure, rendered as an `ApiResponse` error envelope
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PersistenceError::Unavailable(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::PatientNotFound(id) => ApiError::NotFound(format!("Patient not found: {}", id)),
            AgentError::Store(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

async fn require_patient(state: &ApiState, patient_id: &str) -> Result<Patient, ApiError> {
    state
        .store
        .get_patient(patient_id)
        .await?
        .ok_or_else(|| PersistenceError::not_found("patient", patient_id).into())
}

// ============================================================================
// Query and request types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MedicationQuery {
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentQuery {
    #[serde(default)]
    pub upcoming_only: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CareGapQuery {
    #[serde(default)]
    pub include_resolved: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub patient_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

// ============================================================================
// Patients
// ============================================================================

pub async fn list_patients(State(state): State<ApiState>) -> ApiResult<Vec<Patient>> {
    ok(state.store.list_patients().await?)
}

pub async fn create_patient(
    State(state): State<ApiState>,
    Json(new_patient): Json<NewPatient>,
) -> ApiResult<Patient> {
    let patient = state.store.create_patient(new_patient).await?;
    info!(patient_id = %patient.id, "Registered patient");
    created(patient)
}

pub async fn get_patient(
    State(state): State<ApiState>,
    Path(patient_id): Path<String>,
) -> ApiResult<Patient> {
    ok(require_patient(&state, &patient_id).await?)
}

pub async fn get_health_summary(
    State(state): State<ApiState>,
    Path(patient_id): Path<String>,
) -> ApiResult<HealthSummary> {
    let patient = require_patient(&state, &patient_id).await?;
    let medications = state.store.medications_for(&patient_id).await?;
    let appointments = state.store.appointments_for(&patient_id).await?;
    let care_gaps = state.store.care_gaps_for(&patient_id).await?;

    ok(HealthSummary::build(
        &patient,
        &medications,
        &appointments,
        &care_gaps,
        Utc::now(),
    ))
}

// ============================================================================
// Medications
// ============================================================================

pub async fn get_medications(
    State(state): State<ApiState>,
    Path(patient_id): Path<String>,
    Query(query): Query<MedicationQuery>,
) -> ApiResult<Vec<Medication>> {
    require_patient(&state, &patient_id).await?;
    let medications = if query.active_only {
        state.store.active_medications(&patient_id).await?
    } else {
        state.store.medications_for(&patient_id).await?
    };
    ok(medications)
}

pub async fn create_medication(
    State(state): State<ApiState>,
    Json(new_medication): Json<NewMedication>,
) -> ApiResult<Medication> {
    created(state.store.create_medication(new_medication).await?)
}

// ============================================================================
// Appointments
// ============================================================================

/// Sorted by date, earliest first
pub async fn get_appointments(
    State(state): State<ApiState>,
    Path(patient_id): Path<String>,
    Query(query): Query<AppointmentQuery>,
) -> ApiResult<Vec<Appointment>> {
    require_patient(&state, &patient_id).await?;
    let now = Utc::now();
    let mut appointments: Vec<Appointment> = state
        .store
        .appointments_for(&patient_id)
        .await?
        .into_iter()
        .filter(|a| !query.upcoming_only || a.is_upcoming(now))
        .collect();
    appointments.sort_by_key(|a| a.appointment_date);
    ok(appointments)
}

pub async fn create_appointment(
    State(state): State<ApiState>,
    Json(new_appointment): Json<NewAppointment>,
) -> ApiResult<Appointment> {
    created(state.store.create_appointment(new_appointment).await?)
}

// ============================================================================
// Care gaps
// ============================================================================

/// Sorted most urgent first; ties keep store order
pub async fn get_care_gaps(
    State(state): State<ApiState>,
    Path(patient_id): Path<String>,
    Query(query): Query<CareGapQuery>,
) -> ApiResult<Vec<CareGap>> {
    require_patient(&state, &patient_id).await?;
    let mut gaps = if query.include_resolved {
        state.store.care_gaps_for(&patient_id).await?
    } else {
        state.store.open_care_gaps(&patient_id).await?
    };
    gaps.sort_by_key(|g| g.severity.urgency_rank());
    ok(gaps)
}

pub async fn resolve_care_gap(
    State(state): State<ApiState>,
    Path(gap_id): Path<String>,
) -> ApiResult<CareGap> {
    let gap = state.store.resolve_care_gap(&gap_id).await?;
    info!(gap_id = %gap.id, patient_id = %gap.patient_id, "Resolved care gap");
    ok(gap)
}

// ============================================================================
// Chat
// ============================================================================

/// Run one message through the orchestrator and record both sides of the
/// exchange. Dropping the request cancels in-flight agents.
pub async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<OrchestrationResult> {
    require_patient(&state, &request.patient_id).await?;

    state
        .store
        .append_chat(ChatMessage::new(
            &request.patient_id,
            ChatRole::User,
            &request.message,
        ))
        .await?;

    let result = state
        .orchestrator
        .process_message_with(
            &request.patient_id,
            &request.message,
            request.context,
            &CancellationToken::new(),
        )
        .await?;

    let agents_used: Vec<&str> = result
        .agent_contributions
        .iter()
        .map(|c| c.agent_name.as_str())
        .collect();
    let gaps_mentioned: Vec<&str> = result
        .care_gaps_detected
        .iter()
        .map(|g| g.id.as_str())
        .collect();

    let mut reply = ChatMessage::new(
        &request.patient_id,
        ChatRole::Assistant,
        &result.primary_response,
    )
    .with_metadata("agents_used", json!(agents_used))
    .with_metadata("care_gaps_mentioned", json!(gaps_mentioned));
    reply.agent_name = Some(ORCHESTRATOR_NAME.to_string());
    state.store.append_chat(reply).await?;

    ok(result)
}

pub async fn get_chat_history(
    State(state): State<ApiState>,
    Path(patient_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Vec<ChatMessage>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    ok(state.store.chat_history(&patient_id, limit).await?)
}
