//! `leadrelay.toml` loading.

use std::path::Path;

use leadrelay_types::config::LeadrelayConfig;
use leadrelay_types::error::ConfigError;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "leadrelay.toml";

/// Load configuration from `path`.
///
/// Never fails: a missing file, unreadable file, or malformed TOML all fall
/// back to defaults with a log line. Use [`try_load_config`] to surface the
/// error instead.
pub async fn load_config(path: &Path) -> LeadrelayConfig {
    match try_load_config(path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            LeadrelayConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            LeadrelayConfig::default()
        }
    }
}

/// Load configuration from `path`, returning `Ok(None)` when the file is absent.
pub async fn try_load_config(path: &Path) -> Result<Option<LeadrelayConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    let config = toml::from_str::<LeadrelayConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;

    validate(&config)?;
    Ok(Some(config))
}

fn validate(config: &LeadrelayConfig) -> Result<(), ConfigError> {
    if config.relay.max_tokens == 0 {
        return Err(ConfigError::Invalid("relay.max_tokens must be positive".into()));
    }
    if !(0.0..=2.0).contains(&config.relay.temperature) {
        return Err(ConfigError::Invalid(format!(
            "relay.temperature must be within 0.0..=2.0, got {}",
            config.relay.temperature
        )));
    }
    if config.relay.api_key_env.trim().is_empty() {
        return Err(ConfigError::Invalid("relay.api_key_env must not be empty".into()));
    }
    Ok(())
}
