//! REST API route handlers.
//!
//! Request bodies are taken as `Result<Json<T>, JsonRejection>` so that a
//! malformed body is reported with the same `{"detail"}` shape and 422
//! status as any other schema failure.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::{Value, json};

use feynmind_relay::validate;
use feynmind_relay::{ChatRequest, ChatResponse, Quiz, QuizRequest};
use feynmind_store::{QuizAttempt, StudyMinutes};

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned by the progress endpoints.
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

/// Liveness probe.  Does not touch the upstream API or the progress store.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

// ---------------------------------------------------------------------------
// POST /api/quiz
// ---------------------------------------------------------------------------

/// Generate a quiz on the requested topic.
pub async fn quiz(
    State(state): State<Arc<AppState>>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<Quiz>, ApiError> {
    let Json(req) = body?;
    let params = validate::validate_quiz(&req)?;
    let quiz = state.relay.generate_quiz(&params).await?;
    Ok(Json(quiz))
}

// ---------------------------------------------------------------------------
// POST /api/chat
// ---------------------------------------------------------------------------

/// Produce the tutor's next reply.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = body?;
    let params = validate::validate_chat(&req)?;
    let reply = state.relay.tutor_chat(&params).await?;
    Ok(Json(reply))
}

// ---------------------------------------------------------------------------
// Progress endpoints
// ---------------------------------------------------------------------------

/// POST /api/minutes — record time spent studying a topic.
pub async fn save_minutes(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StudyMinutes>, JsonRejection>,
) -> Result<Json<SavedResponse>, ApiError> {
    let Json(mut entry) = body?;
    entry.topic = validate::validate_topic(&entry.topic)?;
    state.progress.record_minutes(entry).await?;
    Ok(Json(SavedResponse { success: true }))
}

/// POST /api/attempt — record a finished quiz attempt.
pub async fn save_attempt(
    State(state): State<Arc<AppState>>,
    body: Result<Json<QuizAttempt>, JsonRejection>,
) -> Result<Json<SavedResponse>, ApiError> {
    let Json(mut attempt) = body?;
    attempt.validate()?;
    attempt.topic = validate::validate_topic(&attempt.topic)?;
    state.progress.record_attempt(attempt).await?;
    Ok(Json(SavedResponse { success: true }))
}
