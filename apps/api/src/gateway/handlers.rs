//! Axum route handlers for the forwarding gateway.
//!
//! Handlers only validate inbound shape and delegate; all payload
//! construction lives in the gateway operations.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::errors::AppError;
use crate::gateway::{self, ChatRequest, ResumeAnalysisRequest, RoadmapRequest};
use crate::state::AppState;

/// POST /api/generate-roadmap
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<Value>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let response = gateway::generate_roadmap(state.upstream.as_ref(), request).await?;
    Ok(Json(response))
}

/// POST /api/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let is_empty = request
        .contents
        .as_array()
        .map_or(true, |turns| turns.is_empty());
    if is_empty {
        return Err(AppError::Validation(
            "contents must be a non-empty array of turns".to_string(),
        ));
    }

    let response = gateway::chat(state.upstream.as_ref(), request).await?;
    Ok(Json(response))
}

/// POST /api/analyze-resume
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<ResumeAnalysisRequest>,
) -> Result<Json<Value>, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation("jobTitle cannot be empty".to_string()));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resumeText cannot be empty".to_string(),
        ));
    }

    let response = gateway::analyze_resume(state.upstream.as_ref(), request).await?;
    Ok(Json(response))
}
