//! Provider trait: the abstraction over the remote text-generation backend.
//!
//! A Provider takes one prompt for one model and returns one answer. There is
//! no conversation, no streaming and no retry: a single request, a single
//! bounded wait.
//!
//! Implementations: Google Gemini (`campuschat-providers`), plus test doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gemini-2.0-flash")
    pub model: String,

    /// The complete prompt, sent as the sole content part
    pub prompt: String,
}

impl ProviderRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The extracted answer text. Never empty for a successful call.
    pub text: String,

    /// Which model answered
    pub model: String,

    /// How many candidates the backend returned (only the first is used)
    #[serde(default)]
    pub candidate_count: usize,
}

/// The core Provider trait.
///
/// The router calls `complete()` without knowing which backend is behind it,
/// so tests can swap in scripted or failing providers.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;

    /// Health check: can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl Provider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            request: ProviderRequest,
        ) -> std::result::Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse {
                text: request.prompt,
                model: request.model,
                candidate_count: 1,
            })
        }
    }

    #[test]
    fn request_constructor() {
        let req = ProviderRequest::new("gemini-2.0-flash", "hello");
        assert_eq!(req.model, "gemini-2.0-flash");
        assert_eq!(req.prompt, "hello");
    }

    #[tokio::test]
    async fn default_health_check_is_ok() {
        let provider = EchoProvider;
        assert!(provider.health_check().await.unwrap());
        let resp = provider
            .complete(ProviderRequest::new("m", "ping"))
            .await
            .unwrap();
        assert_eq!(resp.text, "ping");
        assert_eq!(resp.model, "m");
    }
}
