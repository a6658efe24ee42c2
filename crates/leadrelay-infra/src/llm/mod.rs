//! Completion provider implementations.
//!
//! [`create_provider`] turns the `[relay]` config section plus a resolved
//! API key into a [`BoxLlmProvider`] for the relay service.

pub mod openai_compat;

use secrecy::SecretString;

use leadrelay_core::llm::box_provider::BoxLlmProvider;
use leadrelay_types::config::RelayConfig;
use leadrelay_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] from the relay configuration.
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key was resolved.
pub fn create_provider(
    config: &RelayConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;

    let provider = match config.base_url.as_deref() {
        Some(base_url) => OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: "openai-compatible".to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: key,
            model: config.model.clone(),
        }),
        None => OpenAiCompatibleProvider::openai(key, &config.model),
    };

    Ok(BoxLlmProvider::new(provider))
}
