// src/models/question.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// Difficulty level of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// A multiple-choice question in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    /// Category id (slug), e.g. `gk` or `loksewa`.
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    /// The question narrative.
    pub question: String,

    /// Exactly four answer options.
    pub options: [String; OPTION_COUNT],

    /// Index of the correct option, 0-3.
    pub correct_answer: u8,

    #[serde(default)]
    pub explanation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Question {
    pub fn is_correct(&self, selected: u8) -> bool {
        self.correct_answer == selected
    }
}

/// Fresh unique id for a question entering the bank.
pub fn new_question_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// `true` when `index` addresses one of the four options.
pub fn is_valid_answer_index(index: i64) -> bool {
    (0..OPTION_COUNT as i64).contains(&index)
}

/// DTO for sending a question to a learner (excludes answer, explanation and hint).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: String,
    pub category: String,
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub difficulty: Difficulty,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            category: q.category.clone(),
            question: q.question.clone(),
            options: q.options.clone(),
            difficulty: q.difficulty,
        }
    }
}

/// DTO for the create/edit question form.
/// A missing `id` creates a new question, a present one edits it.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub question: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[validate(custom(function = validate_options))]
    pub options: [String; OPTION_COUNT],
    #[serde(default)]
    #[validate(range(max = 3))]
    pub correct_answer: u8,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub explanation: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub hint: Option<String>,
    #[serde(default = "default_draft_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub reference: Option<String>,
}

// The editor form opens on Easy.
fn default_draft_difficulty() -> Difficulty {
    Difficulty::Easy
}

fn validate_options(options: &[String; OPTION_COUNT]) -> Result<(), validator::ValidationError> {
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("EASY".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn question_uses_camel_case_json() {
        let q = Question {
            id: "1".to_string(),
            category: "gk".to_string(),
            sub_category: None,
            question: "Where is Lumbini?".to_string(),
            options: [
                "Nepal".to_string(),
                "India".to_string(),
                "Bhutan".to_string(),
                "Tibet".to_string(),
            ],
            correct_answer: 0,
            explanation: String::new(),
            hint: None,
            difficulty: Difficulty::Easy,
            reference: None,
        };

        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["correctAnswer"], 0);
        assert_eq!(value["difficulty"], "Easy");
        assert!(value.get("hint").is_none());
    }

    #[test]
    fn draft_rejects_five_options() {
        let json = serde_json::json!({
            "question": "Q",
            "category": "gk",
            "options": ["a", "b", "c", "d", "e"],
            "correctAnswer": 0
        });
        assert!(serde_json::from_value::<QuestionDraft>(json).is_err());
    }

    #[test]
    fn draft_validation_catches_blank_option_and_bad_index() {
        let draft: QuestionDraft = serde_json::from_value(serde_json::json!({
            "question": "Q",
            "category": "gk",
            "options": ["a", " ", "c", "d"],
            "correctAnswer": 7
        }))
        .unwrap();

        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }
}
