// src/models/analysis.rs

use serde::{Deserialize, Serialize};

use super::question::Difficulty;

/// Study report produced by the AI service from a learner's answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub patterns: Vec<String>,
    pub time_management: String,
    pub action_plan: Vec<String>,
    pub motivational_message: String,
}

/// One answered question, flattened for the analysis prompt.
/// Question fields are `None` when the answer references an unknown question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub question: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub is_correct: bool,
    pub time_taken: u32,
    pub skipped: bool,
}
