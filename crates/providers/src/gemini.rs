//! Google Gemini provider implementation.
//!
//! Uses the `generateContent` endpoint of the Generative Language API.
//!
//! Features:
//! - `x-goog-api-key` header authentication (the key never appears in URLs)
//! - Single-turn request: the prompt is the sole content part
//! - One bounded wait per call, no retries
//! - Text of the first candidate only, parts joined with newlines

use std::time::Duration;

use async_trait::async_trait;
use campuschat_core::error::ProviderError;
use campuschat_core::message::EMPTY_GENERATION_REPLY;
use campuschat_core::provider::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    name: String,
    base_url: String,
    api_key: String,
    default_model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            default_model: DEFAULT_MODEL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client,
        })
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Model used when a request leaves `model` empty, and for health checks.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Upper bound on a single call, connect through body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Map a reqwest failure to the transport family of errors.
    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(format!(
                "No response from Gemini within {}s",
                self.timeout.as_secs_f32()
            ))
        } else if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }

    /// Turn a raw HTTP status + body into a response or an upstream error.
    fn parse_response(
        status: u16,
        raw: &str,
        model: String,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let parsed: Option<serde_json::Value> = serde_json::from_str(raw).ok();

        if !(200..300).contains(&status) {
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("error"))
                .map(|e| e.to_string())
                .unwrap_or_else(|| raw.to_string());
            return Err(ProviderError::Upstream {
                status_code: status,
                message,
            });
        }

        let value = parsed.ok_or_else(|| {
            ProviderError::MalformedResponse("Gemini returned a non-JSON body".into())
        })?;

        if let Some(error) = value.get("error") {
            return Err(ProviderError::Upstream {
                status_code: status,
                message: error.to_string(),
            });
        }

        let api_resp: GenerateContentResponse = serde_json::from_value(value).map_err(|e| {
            ProviderError::MalformedResponse(format!("Failed to parse Gemini response: {e}"))
        })?;

        let candidate_count = api_resp.candidates.len();
        let text = api_resp.first_candidate_text();
        let text = if text.is_empty() {
            EMPTY_GENERATION_REPLY.to_string()
        } else {
            text
        };

        Ok(ProviderResponse {
            text,
            model,
            candidate_count,
        })
    }
}

#[async_trait]
impl campuschat_core::Provider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model
        };
        let url = self.generate_url(&model);
        let body = GenerateContentRequest::single_turn(&request.prompt);

        debug!(provider = "gemini", model = %model, prompt_len = request.prompt.len(), "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(provider = "gemini", model = %model, status, body = %raw, "Gemini raw response");

        let result = Self::parse_response(status, &raw, model);
        if let Err(ref e) = result {
            warn!(provider = "gemini", status, error = %e, "Gemini request failed");
        }
        result
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/models/{}", self.base_url, self.default_model);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        Ok(response.status().is_success())
    }
}

// --- Gemini API types ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn single_turn(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    // Absent when generation was blocked
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Newline-joined text of the first candidate, trimmed.
    /// Non-text parts contribute empty lines.
    fn first_candidate_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_deref().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}
