// src/models/settings.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Quiz-wide parameters edited from the admin settings tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    #[validate(range(min = 1, max = 200))]
    pub questions_per_quiz: u32,

    /// Seconds allowed per question.
    #[validate(range(min = 1, max = 3600))]
    pub time_limit_per_question: u32,

    pub show_timer: bool,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            questions_per_quiz: 10,
            time_limit_per_question: 30,
            show_timer: true,
        }
    }
}
