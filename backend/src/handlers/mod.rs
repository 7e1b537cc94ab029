// src/handlers/mod.rs

use serde::Deserialize;

use crate::error::AppError;

pub mod admin;
pub mod ai;
pub mod auth;
pub mod categories;
pub mod quiz;

/// Query flag destructive endpoints must carry (`?confirm=true`).
#[derive(Debug, Default, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub confirm: bool,
}

impl Confirmation {
    pub fn require(&self, action: &str) -> Result<(), AppError> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Confirmation required to {}: repeat the request with ?confirm=true",
                action
            )))
        }
    }
}
