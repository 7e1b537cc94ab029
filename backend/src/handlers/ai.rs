// src/handlers/ai.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{
    ai::{self, GenerativeModel},
    error::AppError,
    models::{question::Difficulty, quiz_result::AnalyzeRequest},
    state::AppState,
};

fn model(state: &AppState) -> Result<Arc<dyn GenerativeModel>, AppError> {
    state
        .ai
        .clone()
        .ok_or_else(|| AppError::UpstreamError("AI service is not configured".to_string()))
}

/// DTO for the AI question generator.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 50))]
    pub count: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_count() -> u32 {
    5
}

/// Generates questions about a topic and appends them to the bank.
/// Admin only.
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let model = model(&state)?;

    // The bank is not locked while the provider works.
    let generated = ai::generate_questions(
        model.as_ref(),
        &payload.topic,
        payload.count,
        payload.difficulty,
    )
    .await
    .map_err(|e| {
        tracing::error!("AI Generation failed: {}", e);
        AppError::UpstreamError("AI Generation failed".to_string())
    })?;

    state.bank.write().await.append_questions(generated.clone());
    tracing::info!(
        "Added {} AI-generated questions about '{}'",
        generated.len(),
        payload.topic
    );

    Ok((StatusCode::CREATED, Json(generated)))
}

/// Produces an AI study report for a learner's answers.
pub async fn analyze_performance(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let model = model(&state)?;

    let questions = state.bank.read().await.questions().to_vec();
    let report = ai::analyze_performance(model.as_ref(), &questions, &payload.answers)
        .await
        .map_err(|e| {
            tracing::error!("AI Analysis failed: {}", e);
            AppError::UpstreamError("AI Analysis failed".to_string())
        })?;

    Ok(Json(report))
}
