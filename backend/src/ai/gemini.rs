// src/ai/gemini.rs

//! Google Gemini `generateContent` client with JSON-mode output.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::{AiError, GenerativeModel};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, AiError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AiError::NetworkError(e.to_string()))
}

impl GeminiClient {
    pub fn new(api_key: &str, model: Option<String>, base_url: Option<String>) -> Result<Self, AiError> {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        let client = http_client(timeout)?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout,
            client,
        })
    }

    /// Replaces the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, AiError> {
        self.client = http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    #[instrument(skip(self, prompt, schema), fields(model = %self.model))]
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, AiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout(self.timeout.as_secs())
                } else {
                    AiError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::AuthenticationFailed(body));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError {
                status,
                message: body,
            });
        }

        let api_response: GenerateContentResponse =
            response.json().await.map_err(|e| AiError::ApiError {
                status,
                message: format!("failed to parse response: {e}"),
            })?;

        let text: String = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        tracing::debug!("Model returned {} bytes of JSON", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidate(text: &str) -> Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn sends_prompt_and_schema_and_returns_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "ARRAY"}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("[]")))
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("test-key", Some("test-model".into()), Some(server.uri())).unwrap();
        let text = client
            .generate_json("hello", &serde_json::json!({"type": "ARRAY"}))
            .await
            .unwrap();

        assert_eq!(text, "[]");
    }

    #[tokio::test]
    async fn rejected_key_is_an_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = GeminiClient::new("bad", None, Some(server.uri())).unwrap();
        let err = client
            .generate_json("hello", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::AuthenticationFailed(ref body) if body.contains("not valid")));
    }

    #[tokio::test]
    async fn server_error_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let client = GeminiClient::new("key", None, Some(server.uri())).unwrap();
        let err = client
            .generate_json("hello", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::ApiError { status: 500, .. }));
    }

    #[tokio::test]
    async fn missing_candidates_is_an_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = GeminiClient::new("key", None, Some(server.uri())).unwrap();
        let err = client
            .generate_json("hello", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::EmptyResponse));
    }

    #[tokio::test]
    async fn slow_response_is_a_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate("[]"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new("key", None, Some(server.uri()))
            .unwrap()
            .with_timeout(Duration::from_millis(100))
            .unwrap();
        let err = client
            .generate_json("hello", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::Timeout(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let client =
            GeminiClient::new("key", None, Some(format!("http://127.0.0.1:{port}"))).unwrap();
        let err = client
            .generate_json("hello", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::NetworkError(_)));
    }

    #[test]
    fn endpoint_uses_model_and_trims_base() {
        let client =
            GeminiClient::new("k", None, Some("http://localhost:9000/".to_string())).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert_eq!(client.model(), DEFAULT_MODEL);
    }
}
