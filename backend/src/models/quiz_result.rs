// src/models/quiz_result.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::question::{PublicQuestion, Question};

/// A learner's answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: String,
    /// `None` when the question was skipped.
    pub selected_option: Option<u8>,
    /// Seconds.
    #[serde(default)]
    pub time_taken: u32,
}

/// Aggregated outcome of one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,
    pub category: String,
    /// Percentage of correct answers, rounded.
    pub score: u32,
    pub total_questions: usize,
    pub correct_count: usize,
    pub wrong_count: usize,
    pub skipped_count: usize,
    /// Seconds, summed over all answers.
    pub time_spent: u64,
    /// RFC 3339 timestamp.
    pub date: String,
    pub answers: Vec<UserAnswer>,
}

impl QuizResult {
    /// Scores `answers` by looking each `question_id` up through `lookup`.
    ///
    /// Skipped answers count as skipped even when the question is unknown;
    /// any other answer to an unknown question counts as wrong.
    pub fn tally<'a, F>(quiz_id: String, category: String, answers: Vec<UserAnswer>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a Question>,
    {
        let mut correct_count = 0;
        let mut wrong_count = 0;
        let mut skipped_count = 0;
        let mut time_spent = 0u64;

        for answer in &answers {
            time_spent += u64::from(answer.time_taken);
            match answer.selected_option {
                None => skipped_count += 1,
                Some(selected) => match lookup(&answer.question_id) {
                    Some(q) if q.is_correct(selected) => correct_count += 1,
                    _ => wrong_count += 1,
                },
            }
        }

        let total_questions = answers.len();
        let score = if total_questions == 0 {
            0
        } else {
            ((correct_count as f64 / total_questions as f64) * 100.0).round() as u32
        };

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            quiz_id,
            category,
            score,
            total_questions,
            correct_count,
            wrong_count,
            skipped_count,
            time_spent,
            date: chrono::Utc::now().to_rfc3339(),
            answers,
        }
    }
}

/// DTO returned when a learner starts a quiz.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPaper {
    pub quiz_id: String,
    pub category: String,
    pub questions: Vec<PublicQuestion>,
    pub time_limit_per_question: u32,
    pub show_timer: bool,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    /// The id received with the quiz paper; a new one is assigned when absent.
    #[serde(default)]
    pub quiz_id: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(min = 1, max = 200, message = "Between 1 and 200 answers are accepted"))]
    pub answers: Vec<UserAnswer>,
}

/// DTO for requesting an AI performance analysis.
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, max = 200, message = "Between 1 and 200 answers are accepted"))]
    pub answers: Vec<UserAnswer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;

    fn question(id: &str, correct: u8) -> Question {
        Question {
            id: id.to_string(),
            category: "gk".to_string(),
            sub_category: None,
            question: format!("Question {}", id),
            options: ["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct,
            explanation: String::new(),
            hint: None,
            difficulty: Difficulty::Easy,
            reference: None,
        }
    }

    fn answer(id: &str, selected: Option<u8>, time: u32) -> UserAnswer {
        UserAnswer {
            question_id: id.to_string(),
            selected_option: selected,
            time_taken: time,
        }
    }

    #[test]
    fn tally_counts_correct_wrong_and_skipped() {
        let bank = vec![question("a", 1), question("b", 2), question("c", 0)];
        let answers = vec![
            answer("a", Some(1), 10),
            answer("b", Some(0), 5),
            answer("c", None, 30),
            answer("ghost", Some(0), 1),
        ];

        let result = QuizResult::tally("quiz".into(), "gk".into(), answers, |id| {
            bank.iter().find(|q| q.id == id)
        });

        assert_eq!(result.total_questions, 4);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.wrong_count, 2);
        assert_eq!(result.skipped_count, 1);
        assert_eq!(result.score, 25);
        assert_eq!(result.time_spent, 46);
    }

    #[test]
    fn answer_count_is_bounded() {
        let answers = |n: usize| -> Vec<UserAnswer> {
            (0..n).map(|i| answer(&i.to_string(), Some(0), 1)).collect()
        };

        assert!(AnalyzeRequest { answers: answers(200) }.validate().is_ok());
        assert!(AnalyzeRequest { answers: answers(201) }.validate().is_err());
        assert!(AnalyzeRequest { answers: answers(0) }.validate().is_err());

        let submit = SubmitQuizRequest {
            quiz_id: None,
            category: "gk".to_string(),
            answers: answers(201),
        };
        assert!(submit.validate().is_err());
    }

    #[test]
    fn tally_of_nothing_scores_zero() {
        let result = QuizResult::tally("quiz".into(), "gk".into(), vec![], |_| None);
        assert_eq!(result.score, 0);
        assert_eq!(result.total_questions, 0);
    }
}
