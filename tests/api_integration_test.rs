use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use careorbit::adapters::api_handler::ApiState;
use careorbit::agents::core::Narrator;
use careorbit::agents::{OrchestrationConfig, Orchestrator, RouterConfig};
use careorbit::persistence::{InMemoryCareStore, SharedCareStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> Router {
    let store: SharedCareStore = Arc::new(InMemoryCareStore::with_demo_data());
    let orchestrator = Arc::new(Orchestrator::new(
        store.clone(),
        Narrator::demo(),
        &OrchestrationConfig::default(),
        &RouterConfig::default(),
    ));
    careorbit::create_app(ApiState {
        store,
        orchestrator,
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, body_json)
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completion_service"], "demo_mode");
    assert_eq!(body["agents"].as_array().unwrap().len(), 4);
    assert_eq!(body["agents"][0]["kind"], "history");
}

#[tokio::test]
async fn test_patient_lookup_and_summary() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/patients/patient-001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["first_name"], "Eleanor");

    let (status, body) = send(&app, "GET", "/api/patients/patient-999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some());

    let (status, body) = send(&app, "GET", "/api/patients/patient-001/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["active_medications"], 5);
    assert_eq!(body["data"]["upcoming_appointments"], 3);
    assert_eq!(body["data"]["open_care_gaps"], 4);
    assert_eq!(body["data"]["overall_status"], "Needs Attention");
}

#[tokio::test]
async fn test_care_gaps_sorted_and_resolvable() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/patients/patient-001/care-gaps", None).await;
    assert_eq!(status, StatusCode::OK);
    let severities: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["severity"].as_str().unwrap())
        .collect();
    assert_eq!(severities, vec!["high", "high", "medium", "medium"]);

    let (status, body) = send(&app, "PATCH", "/api/care-gaps/gap-001/resolve", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["resolved"], true);

    let (_, body) = send(&app, "GET", "/api/patients/patient-001/care-gaps", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = send(
        &app,
        "GET",
        "/api/patients/patient-001/care-gaps?include_resolved=true",
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, _) = send(&app, "PATCH", "/api/care-gaps/gap-999/resolve", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_appointments_sorted_by_date() {
    let app = app();

    let (_, body) = send(&app, "GET", "/api/patients/patient-001/appointments", None).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["apt-004", "apt-001", "apt-002", "apt-003"]);

    let (_, body) = send(
        &app,
        "GET",
        "/api/patients/patient-001/appointments?upcoming_only=true",
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_patient_and_medication() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/patients",
        Some(json!({
            "first_name": "Marcus",
            "last_name": "Reyes",
            "date_of_birth": "1968-07-02",
            "gender": "Male",
            "conditions": ["Asthma"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let patient_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/medications",
        Some(json!({
            "patient_id": patient_id,
            "name": "Albuterol",
            "dosage": "90mcg",
            "frequency": "As needed",
            "prescriber": "Dr. Okafor",
            "specialty": "Pulmonology",
            "start_date": "2024-05-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "active");

    let uri = format!("/api/patients/{}/medications?active_only=true", patient_id);
    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/api/medications",
        Some(json!({
            "patient_id": "patient-999",
            "name": "Albuterol",
            "dosage": "90mcg",
            "frequency": "As needed",
            "prescriber": "Dr. Okafor",
            "specialty": "Pulmonology",
            "start_date": "2024-05-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chat_records_both_sides() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({
            "patient_id": "patient-001",
            "message": "Do I have any overdue screenings?"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["care_gaps_detected"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["data"]["agent_contributions"][0]["agent_name"],
        "Care Gap Detection Agent"
    );

    let (_, body) = send(&app, "GET", "/api/patients/patient-001/chat-history", None).await;
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[1]["role"], "assistant");
    assert_eq!(
        history[1]["metadata"]["agents_used"],
        json!(["Care Gap Detection Agent"])
    );
    assert_eq!(
        history[1]["metadata"]["care_gaps_mentioned"],
        json!(["gap-001", "gap-002", "gap-003"])
    );

    let (_, body) = send(
        &app,
        "GET",
        "/api/patients/patient-001/chat-history?limit=1",
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["role"], "assistant");
}

#[tokio::test]
async fn test_chat_unknown_patient_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({ "patient_id": "patient-999", "message": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
