//! Stateless relay between the chat widget and the completion provider.
//!
//! Each call composes `[system instruction] + prior history + [new user turn]`,
//! forwards it to the provider, and collapses whatever happens into a
//! [`ChatReply`]. Provider errors never escape this module.

use std::time::Duration;

use leadrelay_types::chat::ChatReply;
use leadrelay_types::config::RelayConfig;
use leadrelay_types::llm::{CompletionRequest, LlmError, Message};

use crate::llm::box_provider::BoxLlmProvider;

/// Behavioural instruction prepended to every provider request.
pub const SYSTEM_INSTRUCTION: &str = "You are an assistant that helps collect information for AI services. \
First, ask the user what they need help with. Then, based on their response, \
ask for the required details (name, email, address, availability). \
Ask if they'd like to sign up for a free account to receive updates and newsletters. \
Keep responses short and friendly. \
After gathering all info, thank them and let them know someone will contact them soon.";

/// Reply sent when the provider call fails for any reason.
pub const PROVIDER_FAILURE_REPLY: &str = "Something went wrong. Please try again later.";

/// Reply sent when the provider answers without usable text.
pub const EMPTY_REPLY_FALLBACK: &str = "Sorry, I didn\u{2019}t get that.";

/// Fixed sampling parameters for relay calls.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub provider_timeout: Option<Duration>,
}

impl From<&RelayConfig> for RelaySettings {
    fn from(config: &RelayConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            provider_timeout: config.provider_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::from(&RelayConfig::default())
    }
}

/// Result of one provider call, before it is collapsed into a [`ChatReply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// The provider answered; the text may still be empty.
    Reply(String),
    /// The provider call failed. Details have already been logged.
    Failed,
}

impl ProviderOutcome {
    /// Collapse into the single response shape returned to the widget.
    pub fn into_reply(self) -> ChatReply {
        match self {
            ProviderOutcome::Reply(text) if text.trim().is_empty() => {
                ChatReply::new(EMPTY_REPLY_FALLBACK)
            }
            ProviderOutcome::Reply(text) => ChatReply::new(text),
            ProviderOutcome::Failed => ChatReply::new(PROVIDER_FAILURE_REPLY),
        }
    }
}

/// The relay operation behind `POST /chat`.
///
/// Holds no per-request state; share it behind an `Arc` across handlers.
pub struct RelayService {
    provider: Option<BoxLlmProvider>,
    settings: RelaySettings,
}

impl RelayService {
    /// Create a relay. `provider` is `None` when no credential was found, in
    /// which case every call takes the failure path.
    pub fn new(provider: Option<BoxLlmProvider>, settings: RelaySettings) -> Self {
        Self { provider, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Compose the outbound provider request.
    ///
    /// `prior` is trusted as-is; the instruction is prepended on every call.
    pub fn build_request(&self, message: &str, prior: &[Message]) -> CompletionRequest {
        let mut messages = Vec::with_capacity(prior.len() + 2);
        messages.push(Message::system(SYSTEM_INSTRUCTION));
        messages.extend(prior.iter().cloned());
        messages.push(Message::user(message));

        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        }
    }

    /// Call the provider and tag the result.
    pub async fn call_provider(&self, request: &CompletionRequest) -> ProviderOutcome {
        let result = match &self.provider {
            None => Err(LlmError::NotConfigured),
            Some(provider) => match self.settings.provider_timeout {
                Some(limit) => tokio::time::timeout(limit, provider.complete(request))
                    .await
                    .unwrap_or(Err(LlmError::Timeout(limit.as_secs()))),
                None => provider.complete(request).await,
            },
        };

        match result {
            Ok(response) => {
                tracing::debug!(
                    model = %response.model,
                    stop_reason = %response.stop_reason,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "provider replied"
                );
                ProviderOutcome::Reply(response.content.unwrap_or_default())
            }
            Err(e) => {
                tracing::error!(error = %e, "completion provider call failed");
                ProviderOutcome::Failed
            }
        }
    }

    /// Answer a JSON body that does not describe a chat turn (missing or
    /// `null` message, wrongly typed fields). Takes the provider-failure path
    /// without calling the provider.
    pub fn reject_unusable(&self, reason: &str) -> ChatReply {
        tracing::warn!(%reason, "unusable chat request");
        ProviderOutcome::Failed.into_reply()
    }

    /// Relay one user message with its prior history. Never fails.
    pub async fn relay(&self, message: &str, prior: &[Message]) -> ChatReply {
        let request = self.build_request(message, prior);
        tracing::info!(prior_turns = prior.len(), "relaying chat message");
        self.call_provider(&request).await.into_reply()
    }
}
