//! Error types for the CampusChat domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for CampusChat operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a provider failure.
///
/// The router treats every kind the same way (one generic reply); the kind
/// only decides how loudly the failure is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote service answered, but with a failure status or error object.
    Upstream,
    /// The call never produced a usable answer: timeout, connect, bad body.
    Transport,
    /// The provider could not even be built or addressed.
    Configuration,
}

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Upstream API error (status: {status_code}): {message}")]
    Upstream { status_code: u16, message: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Which family of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Timeout(_) | Self::Network(_) | Self::MalformedResponse(_) => {
                ErrorKind::Transport
            }
            Self::NotConfigured(_) => ErrorKind::Configuration,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_displays_correctly() {
        let err = Error::Provider(ProviderError::Upstream {
            status_code: 403,
            message: r#"{"code":403,"message":"API key not valid"}"#.into(),
        });
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn transport_errors_are_classified() {
        assert!(ProviderError::Timeout("30s".into()).is_transport());
        assert!(ProviderError::Network("connection refused".into()).is_transport());
        assert!(ProviderError::MalformedResponse("not json".into()).is_transport());
    }

    #[test]
    fn upstream_and_config_errors_are_not_transport() {
        let upstream = ProviderError::Upstream {
            status_code: 500,
            message: "boom".into(),
        };
        assert_eq!(upstream.kind(), ErrorKind::Upstream);
        assert!(!upstream.is_transport());
        assert_eq!(
            ProviderError::NotConfigured("no key".into()).kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn config_error_displays_message() {
        let err = Error::Config {
            message: "gemini.api_key is missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: gemini.api_key is missing"
        );
    }
}
