// src/models/category.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category ids are cut to this many characters.
pub const CATEGORY_ID_MAX_CHARS: usize = 15;

pub const DEFAULT_CATEGORY_ICON: &str = "📚";

/// An exam category. Quizzes are drawn per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,

    /// Disabled categories are hidden from learners.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Per-category cap on questions per quiz; falls back to the quiz settings.
    #[serde(default)]
    pub max_questions: Option<u32>,
}

fn default_enabled() -> bool {
    true
}

/// Lowercases and joins words with `_`. ASCII punctuation and symbols
/// separate words and never reach the slug.
/// "Nepal History" -> "nepal_history".
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !is_slug_char(c))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn is_slug_char(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric() || c == '-'
    } else {
        !c.is_whitespace()
    }
}

/// Slug of `name`, truncated to `CATEGORY_ID_MAX_CHARS` characters.
pub fn category_id_for(name: &str) -> String {
    slugify(name).chars().take(CATEGORY_ID_MAX_CHARS).collect()
}

/// DTO for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 60, message = "Category name must be between 1 and 60 characters."))]
    pub name: String,
    #[validate(length(max = 16))]
    pub icon: Option<String>,
}

/// DTO for updating a category. Fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[validate(length(min = 1, max = 60))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 16))]
    pub icon: Option<String>,
    pub enabled: Option<bool>,
    #[validate(range(min = 1))]
    pub max_questions: Option<u32>,
}

/// A category with the number of questions the bank holds for it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOverview {
    #[serde(flatten)]
    pub category: Category,
    pub question_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(slugify("Nepal  History"), "nepal_history");
        assert_eq!(slugify("  Rivers of Nepal "), "rivers_of_nepal");
        assert_eq!(slugify("GK"), "gk");
    }

    #[test]
    fn slug_drops_markup_characters() {
        assert_eq!(
            slugify("<img src=x onerror=alert(1)>"),
            "img_src_x_onerror_alert_1"
        );
        assert_eq!(slugify("Maths & IQ"), "maths_iq");
        assert_eq!(slugify("\"'<>&"), "");
    }

    #[test]
    fn category_id_is_truncated_by_characters() {
        assert_eq!(category_id_for("Computer Basics For Officers"), "computer_basics");
        // Multi-byte names must not be cut inside a character.
        let id = category_id_for("सामान्य ज्ञान तथा समसामयिक");
        assert_eq!(id.chars().count(), CATEGORY_ID_MAX_CHARS);
    }

    #[test]
    fn missing_enabled_defaults_to_true() {
        let cat: Category =
            serde_json::from_str(r#"{"id":"gk","name":"GK","icon":"🌍"}"#).unwrap();
        assert!(cat.enabled);
        assert_eq!(cat.max_questions, None);
    }
}
