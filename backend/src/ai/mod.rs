// src/ai/mod.rs

//! Generative-AI integration: question generation and performance analysis.
//!
//! The provider is reached through the `GenerativeModel` trait so handlers
//! and tests do not depend on a concrete HTTP client.

pub mod analysis;
pub mod gemini;
pub mod questions;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use analysis::analyze_performance;
pub use gemini::GeminiClient;
pub use questions::generate_questions;

/// A model that answers a prompt with JSON text conforming to `schema`.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the raw JSON text produced by the model.
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, AiError>;
}

/// Errors from the AI service boundary.
#[derive(Debug, Error)]
pub enum AiError {
    /// The caller asked for something the client will not send.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The API key was rejected.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("network error: {0}")]
    NetworkError(String),

    /// The provider answered without any text.
    #[error("empty response from model")]
    EmptyResponse,

    /// The text did not match the declared schema.
    #[error("malformed model output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}
