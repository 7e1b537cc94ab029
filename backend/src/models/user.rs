// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A learner record as cached in local storage.
///
/// Records are written by the learner-facing side, so every field other
/// than the identity is optional on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub exam_preference: String,
    pub total_quizzes: u32,
    /// Percentage, 0-100.
    pub accuracy: f64,
    pub rank: u32,
    pub streak: u32,
    pub max_streak: u32,
    pub badges: Vec<String>,
    pub is_admin: bool,
    /// Minutes.
    pub time_spent: u64,
    pub last_active: Option<String>,
}

/// The single administrator account, loaded from configuration at startup.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    /// Argon2 hash of the configured password.
    pub password_hash: String,
}

/// DTO for admin login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
