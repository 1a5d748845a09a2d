//! The message router: static rules first, remote fallback second.

use std::sync::Arc;

use campuschat_core::ErrorKind;
use campuschat_core::message::{EMPTY_MESSAGE_REPLY, SERVER_PROBLEM_REPLY};
use campuschat_core::provider::{Provider, ProviderRequest};
use tracing::{debug, error, info, warn};

use crate::predicate::NormalizedInput;
use crate::prompt::PromptTemplate;
use crate::rules::RuleTable;

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Empty or whitespace-only input
    Empty,
    /// A static rule matched
    Rule(&'static str),
    /// The remote provider answered
    Fallback,
    /// The remote provider failed; the generic reply was used
    FallbackFailed(ErrorKind),
}

/// A reply together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub reply: String,
    pub route: Route,
}

/// Routes one message to a reply. Holds only read-only state, so a single
/// instance is shared by every request.
pub struct MessageRouter {
    rules: Arc<RuleTable>,
    provider: Arc<dyn Provider>,
    model: String,
    prompt: PromptTemplate,
}

impl MessageRouter {
    /// Router over the built-in rule table with the default prompt.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            rules: Arc::new(RuleTable::builtin()),
            provider,
            model: model.into(),
            prompt: PromptTemplate::default(),
        }
    }

    pub fn from_config(config: &campuschat_config::AppConfig, provider: Arc<dyn Provider>) -> Self {
        Self::new(provider, &config.gemini.model)
            .with_prompt(PromptTemplate::from_config(&config.fallback))
    }

    pub fn with_rules(mut self, rules: Arc<RuleTable>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Log every keyword an earlier rule captures first.
    pub fn warn_shadowed_rules(&self) {
        for shadowing in self.rules.shadowed_terms() {
            warn!(
                rule = shadowing.rule,
                term = shadowing.term,
                shadowed_by = shadowing.shadowed_by,
                "Rule keyword is captured by an earlier rule"
            );
        }
    }

    /// Whether the fallback provider answers its health check.
    pub async fn upstream_healthy(&self) -> bool {
        match self.provider.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Upstream health check failed");
                false
            }
        }
    }

    /// Produce the reply text for a raw message.
    pub async fn reply(&self, raw: &str) -> String {
        self.route(raw).await.reply
    }

    /// Produce the reply for a raw message and report how it was chosen.
    ///
    /// Never fails: provider errors are logged and replaced by a fixed reply.
    pub async fn route(&self, raw: &str) -> Routed {
        let message = raw.trim();
        if message.is_empty() {
            debug!("Empty message");
            return Routed {
                reply: EMPTY_MESSAGE_REPLY.to_string(),
                route: Route::Empty,
            };
        }

        let input = NormalizedInput::new(message);
        if let Some(rule) = self.rules.find(&input) {
            info!(rule = rule.name, "Answered from static rule");
            return Routed {
                reply: rule.response().to_string(),
                route: Route::Rule(rule.name),
            };
        }

        let request = ProviderRequest::new(&self.model, self.prompt.render(message));
        info!(
            provider = self.provider.name(),
            model = %self.model,
            "No rule matched, asking remote model"
        );

        match self.provider.complete(request).await {
            Ok(response) => Routed {
                reply: response.text,
                route: Route::Fallback,
            },
            Err(e) => {
                let kind = e.kind();
                match kind {
                    ErrorKind::Transport => {
                        warn!(provider = self.provider.name(), error = %e, "Remote model unreachable")
                    }
                    _ => error!(provider = self.provider.name(), error = %e, "Remote model failed"),
                }
                Routed {
                    reply: SERVER_PROBLEM_REPLY.to_string(),
                    route: Route::FallbackFailed(kind),
                }
            }
        }
    }
}
