//! Application state shared by the HTTP handlers.

use std::sync::Arc;

use leadrelay_core::relay::{RelayService, RelaySettings};
use leadrelay_infra::llm::create_provider;
use leadrelay_infra::secret::api_key_from_env;
use leadrelay_types::config::LeadrelayConfig;

/// Cloned into every handler; all fields are cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
    pub config: Arc<LeadrelayConfig>,
}

impl AppState {
    /// Wire the relay from configuration.
    ///
    /// A missing API key is not fatal: the server starts and every `/chat`
    /// call answers with the provider-failure apology.
    pub fn init(config: LeadrelayConfig) -> Self {
        let api_key = api_key_from_env(&config.relay.api_key_env);

        let provider = match create_provider(&config.relay, api_key) {
            Ok(provider) => {
                tracing::info!(
                    provider = provider.name(),
                    model = %config.relay.model,
                    "completion provider ready"
                );
                Some(provider)
            }
            Err(e) => {
                tracing::warn!(
                    env = %config.relay.api_key_env,
                    error = %e,
                    "no completion provider configured, /chat will answer with an apology"
                );
                None
            }
        };

        let relay = RelayService::new(provider, RelaySettings::from(&config.relay));
        Self::with_relay(relay, config)
    }

    pub fn with_relay(relay: RelayService, config: LeadrelayConfig) -> Self {
        Self {
            relay: Arc::new(relay),
            config: Arc::new(config),
        }
    }
}
