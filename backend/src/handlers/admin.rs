// src/handlers/admin.rs

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    bank::SharedBank,
    error::AppError,
    handlers::Confirmation,
    models::{question::QuestionDraft, settings::QuizSettings},
    store::LocalStore,
    utils::csv,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

/// Lists questions, optionally filtered by a case-insensitive text search.
/// Admin only.
pub async fn list_questions(
    State(bank): State<SharedBank>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = bank.read().await.search(&params.search);
    Ok(Json(questions))
}

/// Saves the question editor form.
/// Without an id a new question is created (201), with an id it is replaced (200).
/// Admin only.
pub async fn save_question(
    State(bank): State<SharedBank>,
    Json(payload): Json<QuestionDraft>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let is_new = payload.id.as_deref().is_none_or(|id| id.trim().is_empty());
    let saved = bank.write().await.save_question(payload).map_err(|e| {
        tracing::warn!("Failed to save question: {}", e);
        AppError::from(e)
    })?;

    let status = if is_new {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(saved)))
}

/// Deletes a question by ID.
/// Admin only. Requires `?confirm=true`.
pub async fn delete_question(
    State(bank): State<SharedBank>,
    Path(id): Path<String>,
    Query(confirmation): Query<Confirmation>,
) -> Result<impl IntoResponse, AppError> {
    confirmation.require("delete this question")?;

    bank.write().await.delete_question(&id)?;
    tracing::info!("Deleted question {}", id);

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes every question in the bank.
/// Admin only. Requires `?confirm=true`.
pub async fn clear_questions(
    State(bank): State<SharedBank>,
    Query(confirmation): Query<Confirmation>,
) -> Result<impl IntoResponse, AppError> {
    confirmation.require("delete every question")?;

    let removed = bank.write().await.clear_questions();
    tracing::warn!("Question bank wiped ({} questions removed)", removed);

    Ok(Json(json!({ "removed": removed })))
}

/// Imports questions from an uploaded CSV file (raw request body).
/// Malformed rows are skipped; an unreadable file rejects the whole import.
/// Admin only.
pub async fn import_csv(
    State(bank): State<SharedBank>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let questions = csv::import(&body).map_err(|e| {
        tracing::error!("CSV import failed: {}", e);
        AppError::from(e)
    })?;

    let imported = bank.write().await.append_questions(questions);
    tracing::info!("Imported {} questions from CSV", imported);

    Ok(Json(json!({ "imported": imported })))
}

fn csv_download(body: String, file_name: &'static str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
}

/// Downloads the CSV import template.
/// Admin only.
pub async fn csv_template() -> impl IntoResponse {
    csv_download(csv::template(), csv::TEMPLATE_FILE_NAME)
}

/// Downloads the whole bank as CSV.
/// Admin only.
pub async fn export_csv(State(bank): State<SharedBank>) -> impl IntoResponse {
    let body = csv::export(bank.read().await.questions());
    csv_download(body, "gyandeep_questions.csv")
}

/// Lists learner records cached in local storage. Read-only.
/// Admin only.
pub async fn list_users(State(store): State<LocalStore>) -> Result<impl IntoResponse, AppError> {
    let users = store.load_users().await?;
    Ok(Json(users))
}

pub async fn get_settings(State(bank): State<SharedBank>) -> impl IntoResponse {
    Json(bank.read().await.settings().clone())
}

/// Replaces the quiz-wide settings.
/// Admin only.
pub async fn update_settings(
    State(bank): State<SharedBank>,
    Json(payload): Json<QuizSettings>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let settings = bank.write().await.update_settings(payload)?;
    tracing::info!(
        "Quiz settings updated: {} questions, {}s per question, timer {}",
        settings.questions_per_quiz,
        settings.time_limit_per_question,
        if settings.show_timer { "shown" } else { "hidden" }
    );

    Ok(Json(settings))
}
