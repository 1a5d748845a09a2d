//! Remote text-generation providers for CampusChat.
//!
//! All providers implement the `campuschat_core::Provider` trait.
//! [`build_from_config`] turns the loaded configuration into the provider the
//! router falls back to.

pub mod gemini;

use std::sync::Arc;
use std::time::Duration;

use campuschat_core::{Error, Provider};

pub use gemini::GeminiProvider;

/// Build the fallback provider from configuration.
///
/// Fails if no API key is configured; there is no built-in credential.
pub fn build_from_config(
    config: &campuschat_config::AppConfig,
) -> Result<Arc<dyn Provider>, Error> {
    let api_key = config.require_api_key().map_err(|e| Error::Config {
        message: e.to_string(),
    })?;

    let provider = GeminiProvider::new(api_key)?
        .with_base_url(&config.gemini.api_url)
        .with_model(&config.gemini.model)
        .with_timeout(Duration::from_secs(config.gemini.timeout_secs));

    tracing::debug!(
        provider = provider.name(),
        model = %config.gemini.model,
        timeout_secs = config.gemini.timeout_secs,
        "Fallback provider configured"
    );

    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use campuschat_config::AppConfig;

    #[test]
    fn build_without_api_key_fails() {
        let config = AppConfig::default();
        let err = build_from_config(&config).err().unwrap();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn build_with_api_key() {
        let mut config = AppConfig::default();
        config.gemini.api_key = Some("test-key".into());
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
    }
}
