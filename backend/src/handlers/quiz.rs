// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    bank::SharedBank,
    error::AppError,
    models::{
        question::PublicQuestion,
        quiz_result::{QuizPaper, SubmitQuizRequest},
    },
};

/// Categories learners can take quizzes in.
pub async fn list_categories(State(bank): State<SharedBank>) -> impl IntoResponse {
    Json(bank.read().await.enabled_categories())
}

pub async fn get_settings(State(bank): State<SharedBank>) -> impl IntoResponse {
    Json(bank.read().await.settings().clone())
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuizParams {
    pub category: String,
}

/// Draws a random quiz for a category.
///
/// Questions are returned without answers, explanations or hints.
pub async fn generate_quiz(
    State(bank): State<SharedBank>,
    Query(params): Query<GenerateQuizParams>,
) -> Result<impl IntoResponse, AppError> {
    let bank = bank.read().await;
    let questions = bank.draw_quiz(&params.category)?;

    if questions.is_empty() {
        return Err(AppError::NotFound(format!(
            "No questions available in category '{}'",
            params.category
        )));
    }

    let settings = bank.settings();
    Ok(Json(QuizPaper {
        quiz_id: uuid::Uuid::new_v4().to_string(),
        category: params.category,
        questions: questions.iter().map(PublicQuestion::from).collect(),
        time_limit_per_question: settings.time_limit_per_question,
        show_timer: settings.show_timer,
    }))
}

/// Scores a submitted quiz.
///
/// Each answer is matched to its question by id; unknown ids count as wrong.
pub async fn submit_quiz(
    State(bank): State<SharedBank>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let quiz_id = req
        .quiz_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let result = bank.read().await.score(quiz_id, req.category, req.answers);
    tracing::info!(
        "Quiz {} in '{}' scored {}% ({}/{} correct)",
        result.quiz_id,
        result.category,
        result.score,
        result.correct_count,
        result.total_questions
    );

    Ok(Json(result))
}
