// src/ai/questions.rs

//! Question generation through the generative model.

use serde::Deserialize;
use serde_json::{Value, json};

use super::{AiError, GenerativeModel};
use crate::{
    models::{
        category::slugify,
        question::{Difficulty, OPTION_COUNT, Question, is_valid_answer_index, new_question_id},
    },
    utils::html::{clean_html, clean_optional},
};

/// Upper bound on questions requested in one call.
pub const MAX_QUESTIONS_PER_REQUEST: u32 = 50;

pub fn build_prompt(topic: &str, count: u32, difficulty: Difficulty) -> String {
    format!(
        "Generate {count} Multiple Choice Questions for a Nepal competitive exam (like Loksewa Aayog) about the topic: \"{topic}\".\n\
         The questions should be in the specified difficulty: {difficulty}.\n\
         Include questions in both English and Nepali (Devanagari) where appropriate.\n\
         Each question has exactly four options and correctAnswer is the 0-based index of the right one.\n\
         Output in strictly valid JSON format matching the GyanDeep schema."
    )
}

/// Declared output schema: an array of question objects.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {"type": "STRING"},
                "options": {
                    "type": "ARRAY",
                    "items": {"type": "STRING"},
                    "minItems": 4,
                    "maxItems": 4
                },
                "correctAnswer": {"type": "INTEGER", "description": "Index 0-3"},
                "explanation": {"type": "STRING"},
                "hint": {"type": "STRING"},
                "difficulty": {"type": "STRING", "enum": ["Easy", "Medium", "Hard"]},
                "category": {"type": "STRING"}
            },
            "required": ["question", "options", "correctAnswer", "explanation", "difficulty"]
        }
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    question: String,
    options: Vec<String>,
    correct_answer: i64,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Turns the model's JSON text into bank questions.
///
/// Every question gets a fresh id. A missing or blank category becomes the
/// slugified topic. Items that do not carry exactly four options or whose
/// answer index is out of range are dropped.
pub fn shape_questions(
    raw: &str,
    topic: &str,
    difficulty: Difficulty,
) -> Result<Vec<Question>, AiError> {
    let generated: Vec<GeneratedQuestion> = serde_json::from_str(raw)?;
    let fallback_category = slugify(topic);

    let questions = generated
        .into_iter()
        .filter_map(|g| {
            let options: [String; OPTION_COUNT] = match g.options.try_into() {
                Ok(options) => options,
                Err(options) => {
                    tracing::warn!(
                        "Dropping generated question with {} options: {}",
                        options.len(),
                        g.question
                    );
                    return None;
                }
            };
            if !is_valid_answer_index(g.correct_answer) {
                tracing::warn!(
                    "Dropping generated question with answer index {}: {}",
                    g.correct_answer,
                    g.question
                );
                return None;
            }

            let category = g
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| fallback_category.clone());

            Some(Question {
                id: new_question_id(),
                category,
                sub_category: None,
                question: clean_html(&g.question),
                options: options.map(|o| clean_html(&o)),
                correct_answer: g.correct_answer as u8,
                explanation: clean_html(&g.explanation),
                hint: clean_optional(g.hint).filter(|h| !h.is_empty()),
                difficulty: g
                    .difficulty
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(difficulty),
                reference: None,
            })
        })
        .collect();

    Ok(questions)
}

/// Asks the model for `count` questions about `topic`.
pub async fn generate_questions(
    model: &dyn GenerativeModel,
    topic: &str,
    count: u32,
    difficulty: Difficulty,
) -> Result<Vec<Question>, AiError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AiError::InvalidRequest("topic is required".to_string()));
    }
    if count == 0 || count > MAX_QUESTIONS_PER_REQUEST {
        return Err(AiError::InvalidRequest(format!(
            "count must be between 1 and {}",
            MAX_QUESTIONS_PER_REQUEST
        )));
    }

    let prompt = build_prompt(topic, count, difficulty);
    let raw = model.generate_json(&prompt, &response_schema()).await?;
    let questions = shape_questions(&raw, topic, difficulty)?;

    tracing::info!("Generated {} questions about '{}'", questions.len(), topic);
    Ok(questions)
}
