//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ChatRequest, ErrorResponse, FilterRequest, HandoffResponse, QueuedResponse, SeverityRequest,
    SymptomsQuery, SymptomsResponse, ToggleRequest,
};
use super::AppState;
use crate::runtime::{RuntimeError, SessionSnapshot, SseEvent, WizardSnapshot};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Conversation
        .route("/api/chat", get(get_chat).post(send_chat))
        .route("/api/chat/stream", get(stream_chat))
        // Symptom catalog
        .route("/api/symptoms", get(list_symptoms))
        // Triage wizard
        .route("/api/wizard", get(get_wizard))
        .route("/api/wizard/stream", get(stream_wizard))
        .route("/api/wizard/toggle", post(toggle_symptom))
        .route("/api/wizard/filter", post(set_search_filter))
        .route("/api/wizard/severity", post(set_severity))
        .route("/api/wizard/advance", post(advance))
        .route("/api/wizard/retreat", post(retreat))
        .route("/api/wizard/reset", post(reset))
        .route("/api/wizard/handoff", post(handoff))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversation
// ============================================================

async fn get_chat(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot())
}

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.session.send_message(req.text).await?;
    Ok(Json(QueuedResponse::queued()))
}

async fn stream_chat(State(state): State<AppState>) -> impl IntoResponse {
    // Subscribe before reading the snapshot so no change falls in between
    let broadcast_rx = state.session.subscribe();
    let snapshot = serde_json::to_value(state.session.snapshot()).unwrap_or(Value::Null);
    sse_stream(SseEvent::Init { snapshot }, broadcast_rx)
}

// ============================================================
// Symptom Catalog
// ============================================================

async fn list_symptoms(
    State(state): State<AppState>,
    Query(query): Query<SymptomsQuery>,
) -> Json<SymptomsResponse> {
    let symptoms = state
        .catalog
        .filter(&query.q)
        .into_iter()
        .cloned()
        .collect();
    Json(SymptomsResponse { symptoms })
}

// ============================================================
// Triage Wizard
// ============================================================

async fn get_wizard(State(state): State<AppState>) -> Json<WizardSnapshot> {
    Json(state.wizard.snapshot())
}

async fn stream_wizard(State(state): State<AppState>) -> impl IntoResponse {
    let broadcast_rx = state.wizard.subscribe();
    let snapshot = serde_json::to_value(state.wizard.snapshot()).unwrap_or(Value::Null);
    sse_stream(SseEvent::Init { snapshot }, broadcast_rx)
}

async fn toggle_symptom(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.wizard.toggle_symptom(req.symptom_id).await?;
    Ok(Json(QueuedResponse::queued()))
}

async fn set_search_filter(
    State(state): State<AppState>,
    Json(req): Json<FilterRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.wizard.set_search_filter(req.filter).await?;
    Ok(Json(QueuedResponse::queued()))
}

async fn set_severity(
    State(state): State<AppState>,
    Json(req): Json<SeverityRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.wizard.set_severity(req.symptom_id, req.severity).await?;
    Ok(Json(QueuedResponse::queued()))
}

async fn advance(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state.wizard.advance().await?;
    Ok(Json(QueuedResponse::queued()))
}

async fn retreat(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state.wizard.retreat().await?;
    Ok(Json(QueuedResponse::queued()))
}

async fn reset(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state.wizard.reset().await?;
    Ok(Json(QueuedResponse::queued()))
}

/// Forward the finished triage run into the conversation
async fn handoff(State(state): State<AppState>) -> Result<Json<HandoffResponse>, AppError> {
    let message = state
        .wizard
        .handoff_message()
        .ok_or_else(|| AppError::BadRequest("Analysis is not ready".to_string()))?;

    tracing::info!("Handing triage result to the conversation");
    state.session.send_message(message.clone()).await?;
    Ok(Json(HandoffResponse {
        queued: true,
        message,
    }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("healthpal ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        tracing::error!(error = %e, "Runtime unavailable");
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
