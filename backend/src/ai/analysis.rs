// src/ai/analysis.rs

//! Learner performance analysis through the generative model.

use serde_json::{Value, json};

use super::{AiError, GenerativeModel};
use crate::models::{
    analysis::{AnalysisReport, PerformanceRecord},
    question::Question,
    quiz_result::UserAnswer,
};

/// Joins each answer with its question.
pub fn performance_records(questions: &[Question], answers: &[UserAnswer]) -> Vec<PerformanceRecord> {
    answers
        .iter()
        .map(|answer| {
            let question = questions.iter().find(|q| q.id == answer.question_id);
            PerformanceRecord {
                question: question.map(|q| q.question.clone()),
                category: question.map(|q| q.category.clone()),
                difficulty: question.map(|q| q.difficulty),
                is_correct: match (question, answer.selected_option) {
                    (Some(q), Some(selected)) => q.is_correct(selected),
                    _ => false,
                },
                time_taken: answer.time_taken,
                skipped: answer.selected_option.is_none(),
            }
        })
        .collect()
}

pub fn build_prompt(records: &[PerformanceRecord]) -> Result<String, AiError> {
    let data = serde_json::to_string(records)?;
    Ok(format!(
        "Analyze the following Nepal competitive exam performance data and provide a detailed study report.\n\
         Data: {data}\n\
         Provide the analysis in JSON format."
    ))
}

/// Declared output schema: the fixed report object.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "strengths": {"type": "ARRAY", "items": {"type": "STRING"}},
            "weaknesses": {"type": "ARRAY", "items": {"type": "STRING"}},
            "patterns": {"type": "ARRAY", "items": {"type": "STRING"}},
            "timeManagement": {"type": "STRING"},
            "actionPlan": {"type": "ARRAY", "items": {"type": "STRING"}},
            "motivationalMessage": {"type": "STRING"}
        },
        "required": [
            "strengths",
            "weaknesses",
            "patterns",
            "timeManagement",
            "actionPlan",
            "motivationalMessage"
        ]
    })
}

/// Asks the model for a study report on `answers`.
pub async fn analyze_performance(
    model: &dyn GenerativeModel,
    questions: &[Question],
    answers: &[UserAnswer],
) -> Result<AnalysisReport, AiError> {
    if answers.is_empty() {
        return Err(AiError::InvalidRequest("no answers to analyze".to_string()));
    }

    let records = performance_records(questions, answers);
    let prompt = build_prompt(&records)?;
    let raw = model.generate_json(&prompt, &response_schema()).await?;

    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_questions;
    use async_trait::async_trait;

    struct FixedModel(String);

    #[async_trait]
    impl GenerativeModel for FixedModel {
        async fn generate_json(&self, prompt: &str, _schema: &Value) -> Result<String, AiError> {
            assert!(prompt.contains("\"isCorrect\""));
            Ok(self.0.clone())
        }
    }

    fn answers() -> Vec<UserAnswer> {
        vec![
            UserAnswer {
                question_id: "1".into(),
                selected_option: Some(1),
                time_taken: 12,
            },
            UserAnswer {
                question_id: "4".into(),
                selected_option: Some(3),
                time_taken: 40,
            },
            UserAnswer {
                question_id: "n1".into(),
                selected_option: None,
                time_taken: 30,
            },
            UserAnswer {
                question_id: "gone".into(),
                selected_option: Some(0),
                time_taken: 2,
            },
        ]
    }

    #[test]
    fn records_join_answers_with_questions() {
        let records = performance_records(&sample_questions(), &answers());

        assert!(records[0].is_correct);
        assert_eq!(records[0].category.as_deref(), Some("gk"));
        assert!(!records[1].is_correct);
        assert!(records[2].skipped && !records[2].is_correct);
        assert!(records[3].question.is_none() && !records[3].is_correct);
    }

    #[tokio::test]
    async fn report_is_parsed_from_model_output() {
        let model = FixedModel(
            json!({
                "strengths": ["Geography"],
                "weaknesses": ["Reasoning"],
                "patterns": ["Slow on codes"],
                "timeManagement": "Spend less time on IQ questions.",
                "actionPlan": ["Practice coding-decoding daily"],
                "motivationalMessage": "मिहिनेत नै सफलताको कडी हो।"
            })
            .to_string(),
        );

        let report = analyze_performance(&model, &sample_questions(), &answers())
            .await
            .unwrap();
        assert_eq!(report.strengths, vec!["Geography"]);
        assert_eq!(report.time_management, "Spend less time on IQ questions.");
    }

    #[tokio::test]
    async fn report_missing_fields_is_malformed() {
        let model = FixedModel(json!({"strengths": []}).to_string());
        let err = analyze_performance(&model, &sample_questions(), &answers())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::MalformedOutput(_)));
    }
}
