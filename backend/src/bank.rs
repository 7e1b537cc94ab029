// src/bank.rs

//! In-memory question bank: questions, categories and quiz settings.
//!
//! The bank is the single owner of this state. The HTTP layer shares it as
//! `SharedBank` and mutates it only through the methods below.

use std::sync::Arc;

use rand::seq::SliceRandom;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::{
    models::{
        category::{Category, CategoryOverview, CategoryPatch, DEFAULT_CATEGORY_ICON, category_id_for},
        question::{Question, QuestionDraft, is_valid_answer_index, new_question_id},
        quiz_result::{QuizResult, UserAnswer},
        settings::QuizSettings,
    },
    seed,
    utils::html::{clean_html, clean_optional},
};

pub type SharedBank = Arc<RwLock<QuestionBank>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("Question '{0}' not found")]
    QuestionNotFound(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Category '{0}' is disabled")]
    CategoryDisabled(String),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    categories: Vec<Category>,
    settings: QuizSettings,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, categories: Vec<Category>, settings: QuizSettings) -> Self {
        Self {
            questions,
            categories,
            settings,
        }
    }

    /// Default categories and the sample questions.
    pub fn seeded() -> Self {
        Self::new(
            seed::sample_questions(),
            seed::default_categories(),
            QuizSettings::default(),
        )
    }

    pub fn into_shared(self) -> SharedBank {
        Arc::new(RwLock::new(self))
    }

    // ---- questions ----

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions whose text contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<Question> {
        let needle = term.trim().to_lowercase();
        self.questions
            .iter()
            .filter(|q| needle.is_empty() || q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Saves the editor form.
    ///
    /// Without an id the question is appended under a fresh id; with an id it
    /// replaces the existing question at the same position.
    pub fn save_question(&mut self, draft: QuestionDraft) -> Result<Question, BankError> {
        if draft.question.trim().is_empty() || draft.category.trim().is_empty() {
            return Err(BankError::Invalid(
                "Question text and category are required".to_string(),
            ));
        }
        if !is_valid_answer_index(i64::from(draft.correct_answer)) {
            return Err(BankError::Invalid(format!(
                "Correct answer index {} is out of range",
                draft.correct_answer
            )));
        }

        let existing_id = draft.id.clone().filter(|id| !id.trim().is_empty());
        let slot = match &existing_id {
            Some(id) => Some(
                self.questions
                    .iter()
                    .position(|q| &q.id == id)
                    .ok_or_else(|| BankError::QuestionNotFound(id.clone()))?,
            ),
            None => None,
        };

        let question = Question {
            id: existing_id.unwrap_or_else(new_question_id),
            category: draft.category.trim().to_string(),
            sub_category: clean_optional(draft.sub_category),
            question: clean_html(&draft.question),
            options: draft.options.map(|opt| clean_html(&opt)),
            correct_answer: draft.correct_answer,
            explanation: clean_html(&draft.explanation),
            hint: clean_optional(draft.hint).filter(|h| !h.is_empty()),
            difficulty: draft.difficulty,
            reference: clean_optional(draft.reference),
        };

        match slot {
            Some(index) => self.questions[index] = question.clone(),
            None => self.questions.push(question.clone()),
        }
        Ok(question)
    }

    pub fn delete_question(&mut self, id: &str) -> Result<Question, BankError> {
        let index = self
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| BankError::QuestionNotFound(id.to_string()))?;
        Ok(self.questions.remove(index))
    }

    /// Removes every question. Returns how many were removed.
    pub fn clear_questions(&mut self) -> usize {
        let removed = self.questions.len();
        self.questions.clear();
        removed
    }

    /// Appends an imported or generated batch. Returns the batch size.
    pub fn append_questions(&mut self, batch: Vec<Question>) -> usize {
        let added = batch.len();
        self.questions.extend(batch);
        added
    }

    // ---- categories ----

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn enabled_categories(&self) -> Vec<Category> {
        self.categories.iter().filter(|c| c.enabled).cloned().collect()
    }

    fn category_mut(&mut self, id: &str) -> Result<&mut Category, BankError> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BankError::CategoryNotFound(id.to_string()))
    }

    /// Adds a category whose id is derived from its name.
    /// New categories start enabled and capped at the current questions-per-quiz.
    pub fn add_category(&mut self, name: &str, icon: Option<&str>) -> Result<Category, BankError> {
        let name = name.trim();
        let id = category_id_for(name);
        if id.is_empty() {
            return Err(BankError::Invalid("Category name is required".to_string()));
        }
        if self.categories.iter().any(|c| c.id == id) {
            return Err(BankError::DuplicateCategory(id));
        }

        let icon = icon
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .unwrap_or(DEFAULT_CATEGORY_ICON);

        let category = Category {
            id,
            name: clean_html(name),
            icon: icon.to_string(),
            enabled: true,
            max_questions: Some(self.settings.questions_per_quiz),
        };
        self.categories.push(category.clone());
        Ok(category)
    }

    pub fn update_category(&mut self, id: &str, patch: CategoryPatch) -> Result<Category, BankError> {
        if patch.max_questions == Some(0) {
            return Err(BankError::Invalid(
                "Max questions must be at least 1".to_string(),
            ));
        }

        let category = self.category_mut(id)?;
        if let Some(name) = patch.name {
            category.name = clean_html(name.trim());
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }
        if let Some(enabled) = patch.enabled {
            category.enabled = enabled;
        }
        if let Some(max) = patch.max_questions {
            category.max_questions = Some(max);
        }
        Ok(category.clone())
    }

    /// Flips `enabled` on exactly one category.
    pub fn toggle_category(&mut self, id: &str) -> Result<Category, BankError> {
        let category = self.category_mut(id)?;
        category.enabled = !category.enabled;
        Ok(category.clone())
    }

    /// Removes the category. Its questions stay in the bank.
    pub fn remove_category(&mut self, id: &str) -> Result<Category, BankError> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| BankError::CategoryNotFound(id.to_string()))?;
        Ok(self.categories.remove(index))
    }

    pub fn category_overview(&self) -> Vec<CategoryOverview> {
        self.categories
            .iter()
            .map(|c| CategoryOverview {
                category: c.clone(),
                question_count: self.questions.iter().filter(|q| q.category == c.id).count(),
            })
            .collect()
    }

    // ---- settings ----

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: QuizSettings) -> Result<QuizSettings, BankError> {
        if settings.questions_per_quiz == 0 || settings.time_limit_per_question == 0 {
            return Err(BankError::Invalid(
                "Questions per quiz and time limit must be positive".to_string(),
            ));
        }
        self.settings = settings;
        Ok(self.settings.clone())
    }

    // ---- quiz ----

    /// Draws a random quiz for an enabled category.
    ///
    /// The quiz holds at most the category cap (or questions-per-quiz when the
    /// category has none) and never more than the category has.
    pub fn draw_quiz(&self, category_id: &str) -> Result<Vec<Question>, BankError> {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| BankError::CategoryNotFound(category_id.to_string()))?;
        if !category.enabled {
            return Err(BankError::CategoryDisabled(category_id.to_string()));
        }

        let cap = category
            .max_questions
            .unwrap_or(self.settings.questions_per_quiz) as usize;
        let pool: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| q.category == category_id)
            .collect();

        let mut rng = rand::thread_rng();
        Ok(pool
            .choose_multiple(&mut rng, cap.min(pool.len()))
            .map(|q| (*q).clone())
            .collect())
    }

    pub fn score(&self, quiz_id: String, category: String, answers: Vec<UserAnswer>) -> QuizResult {
        QuizResult::tally(quiz_id, category, answers, |id| self.find(id))
    }
}
