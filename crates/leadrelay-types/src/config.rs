//! Configuration types for Leadrelay.
//!
//! `LeadrelayConfig` is the top-level `leadrelay.toml`. Every section and
//! field has a default, so an empty or missing file yields a working setup.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadrelayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Where the relay server listens and what it serves besides `/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of static site assets served as the fallback route.
    /// Skipped when the directory does not exist.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_web_dir() -> String {
    "public".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
        }
    }
}

/// Completion provider settings used by the relay endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Name of the environment variable holding the provider API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Override for the provider base URL (OpenAI-compatible endpoint).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Upper bound on a single provider call. Unset means no bound.
    #[serde(default)]
    pub provider_timeout_secs: Option<u64>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f64 {
    0.7
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            base_url: None,
            provider_timeout_secs: None,
        }
    }
}

/// Conversation client (chat widget) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the relay server; `/chat` is appended.
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
    /// Upper bound on one relay round trip. Unset means no bound.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Opening assistant line shown when the widget starts.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Canned prompts offered as one-key shortcuts.
    #[serde(default = "default_quick_prompts")]
    pub quick_prompts: Vec<String>,
}

fn default_relay_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_greeting() -> String {
    "Hey there! I'm your AI strategist. What kind of workflow or customer journey should we transform first?".to_string()
}

fn default_quick_prompts() -> Vec<String> {
    vec![
        "I run a dental clinic and need appointment reminders".to_string(),
        "Can you automate follow-ups for my sales leads?".to_string(),
        "I want a chatbot that answers customer FAQs".to_string(),
    ]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            request_timeout_secs: None,
            greeting: default_greeting(),
            quick_prompts: default_quick_prompts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = LeadrelayConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.relay.model, "gpt-4o-mini");
        assert_eq!(config.relay.max_tokens, 150);
        assert!((config.relay.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.relay.api_key_env, "OPENAI_API_KEY");
        assert!(config.relay.provider_timeout_secs.is_none());
        assert!(config.client.request_timeout_secs.is_none());
        assert_eq!(config.client.quick_prompts.len(), 3);
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: LeadrelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client.relay_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_config_deserialize_partial_sections() {
        let toml_str = r#"
[server]
port = 8080

[relay]
model = "gpt-4o"
provider_timeout_secs = 20

[client]
quick_prompts = ["Book a demo"]
"#;
        let config: LeadrelayConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.relay.model, "gpt-4o");
        assert_eq!(config.relay.max_tokens, 150);
        assert_eq!(config.relay.provider_timeout_secs, Some(20));
        assert_eq!(config.client.quick_prompts, vec!["Book a demo".to_string()]);
    }
}
